//! Derived mowing metrics.
//!
//! The game does not count grass at runtime: the stage record carries the
//! goal and a fixed-point "percent per mowed tile" increment, both computed
//! by the editor. They must be refreshed after every tile or width change
//! or the in-game completion meter drifts.

use crate::stage::stage::{StageMeta, TileGrid};
use crate::stage::{GRID_WIDTH, TILE_GRASS};

/// Count tall-grass tiles inside the playable area. Column 0 (the hidden
/// border) and columns past `width` never count, even though their tiles
/// are still stored in the packed bytes.
pub fn tall_grass_count(grid: &TileGrid, width: u8) -> u32 {
    let mut count = 0;
    for (i, &tile) in grid.tiles.iter().enumerate() {
        let col = i % GRID_WIDTH;
        if col == 0 || col > width as usize {
            continue;
        }
        if tile == TILE_GRASS {
            count += 1;
        }
    }
    count
}

/// Percent-of-lawn credit per mowed tile as a (lo, hi) pair of 1/255ths.
///
/// The low value starts as the truncation of `100 / count * 255` and sheds
/// 256 into the high byte while it exceeds 256. Stopping at `> 256` rather
/// than `>= 256` means a low value of exactly 256 would be kept instead of
/// carried; that is how shipped ROMs were built, so it is preserved
/// unchanged. No count a 30×11 lawn can produce actually lands on 256.
pub fn percent_increment(count: u32) -> (u16, u8) {
    if count == 0 {
        return (0, 0);
    }
    let mut lo = (100.0 / count as f64 * 255.0) as u32;
    let mut hi = 0u8;
    while lo > 256 {
        hi += 1;
        lo -= 256;
    }
    (lo as u16, hi)
}

/// Refresh the derived fields of `meta` from the grid. Returns the raw
/// tall-grass count; the stored goal clamps it to a byte, the title bar
/// shows it unclamped.
pub fn recompute(grid: &TileGrid, meta: &mut StageMeta) -> u32 {
    let count = tall_grass_count(grid, meta.width);
    let (lo, hi) = percent_increment(count);
    meta.grass_goal = count.min(255) as u8;
    meta.percent_lo = lo;
    meta.percent_hi = hi;
    count
}
