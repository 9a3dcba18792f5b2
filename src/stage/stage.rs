//! Stage codec: ROM bytes to tile grid and metadata, and back.
//!
//! Each stage record is 95 bytes at `0x5010 + 95 * index`. The first 88
//! bytes pack the 32×11 tile grid, four 2-bit tiles per byte with the first
//! tile in the top two bits. The 7 metadata bytes follow: playable width,
//! spawn X, spawn Y, grass goal, a reserved zero, and the low/high percent
//! increment pair. Goal and percent are derived from the grid, so decoding
//! recomputes them instead of trusting what a previous editor stored, and
//! encoding refreshes them before writing.

use crate::rom::{RomError, RomImage};
use crate::stage::{
    GRID_HEIGHT, GRID_WIDTH, MAX_LAWN_WIDTH, MIN_LAWN_WIDTH, SPAWN_X_OFFSET, SPAWN_Y_OFFSET,
    STAGE_COUNT, STAGE_DATA_SIZE, STAGE_TABLE_OFFSET, TILE_COUNT, TILE_DATA_SIZE, metrics,
};

/// Unpack one tile byte into four tile values, first tile in the top bits.
pub fn unpack_tiles(byte: u8) -> [u8; 4] {
    [(byte >> 6) & 3, (byte >> 4) & 3, (byte >> 2) & 3, byte & 3]
}

/// Pack four tile values back into one byte.
pub fn pack_tiles(tiles: [u8; 4]) -> u8 {
    (tiles[0] & 3) << 6 | (tiles[1] & 3) << 4 | (tiles[2] & 3) << 2 | (tiles[3] & 3)
}

/// The unpacked 32×11 tile grid, row-major. Column 0 of every row is the
/// game's left border: stored and packed like any other tile, but hidden by
/// the editor and excluded from grass counting.
pub struct TileGrid {
    pub tiles: [u8; TILE_COUNT],
}

impl TileGrid {
    pub fn new() -> TileGrid {
        TileGrid { tiles: [0; TILE_COUNT] }
    }

    /// Grid index of playable coordinate (x, y); x is shifted right by one
    /// past the border column.
    pub fn data_offset(x: usize, y: usize) -> usize {
        (x + 1) + GRID_WIDTH * y
    }

    /// Tile at playable (x, y), or 0 outside the grid.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.tiles.get(Self::data_offset(x, y)).copied().unwrap_or(0)
    }

    /// Set the tile at playable (x, y), masked to two bits. Coordinates
    /// outside the grid are ignored so stray clicks stay harmless.
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if let Some(tile) = self.tiles.get_mut(Self::data_offset(x, y)) {
            *tile = value & 3;
        }
    }
}

impl Default for TileGrid {
    fn default() -> TileGrid {
        TileGrid::new()
    }
}

/// Per-stage metadata as stored after the tile bytes. Spawn coordinates
/// carry the border offsets (+1, +3) the game itself uses.
pub struct StageMeta {
    pub width: u8,
    pub spawn_x: u8,
    pub spawn_y: u8,
    /// Tall-grass count, clamped to one byte for storage.
    pub grass_goal: u8,
    /// Low part of the percent increment. The derivation can stop at 256,
    /// one past a clean byte, so this is kept wider than what is stored;
    /// see [`metrics::percent_increment`].
    pub percent_lo: u16,
    pub percent_hi: u8,
}

impl StageMeta {
    /// Move the player start to playable (x, y), storing the offset form.
    /// Ignored outside the current lawn.
    pub fn set_spawn(&mut self, x: usize, y: usize) {
        if x < self.width as usize && y < GRID_HEIGHT {
            self.spawn_x = (x + SPAWN_X_OFFSET) as u8;
            self.spawn_y = (y + SPAWN_Y_OFFSET) as u8;
        }
    }

    /// Grow or shrink the playable width. The result is clamped to
    /// 14..=30, which also normalizes the zero width of a blank image on
    /// the first adjustment.
    pub fn adjust_width(&mut self, delta: i32) {
        let width = self.width as i32 + delta;
        self.width = width.clamp(MIN_LAWN_WIDTH as i32, MAX_LAWN_WIDTH as i32) as u8;
    }
}

/// One decoded stage.
pub struct Stage {
    pub index: usize,
    pub grid: TileGrid,
    pub meta: StageMeta,
}

impl Stage {
    /// File offset of this stage's first tile byte.
    fn base(index: usize) -> usize {
        STAGE_TABLE_OFFSET + STAGE_DATA_SIZE * index
    }

    /// Decode stage `index` (0-9) from the image. The stored goal and
    /// percent bytes are editor output, not input: they are recomputed from
    /// the tiles so the returned stage is self-consistent even when the
    /// image holds stale values.
    pub fn decode(rom: &RomImage, index: usize) -> Result<Stage, RomError> {
        if index >= STAGE_COUNT {
            return Err(RomError::NoSuchStage(index));
        }
        let base = Self::base(index);

        let mut grid = TileGrid::new();
        for i in 0..TILE_DATA_SIZE {
            let quad = unpack_tiles(rom.read_byte(base + i)?);
            grid.tiles[i * 4..i * 4 + 4].copy_from_slice(&quad);
        }

        let mut meta = StageMeta {
            width: rom.read_byte(base + TILE_DATA_SIZE)?,
            spawn_x: rom.read_byte(base + TILE_DATA_SIZE + 1)?,
            spawn_y: rom.read_byte(base + TILE_DATA_SIZE + 2)?,
            grass_goal: 0,
            percent_lo: 0,
            percent_hi: 0,
        };
        metrics::recompute(&grid, &mut meta);

        Ok(Stage { index, grid, meta })
    }

    /// Encode this stage back into the image at its fixed offset, refreshing
    /// the derived metadata first. Returns the unclamped tall-grass count
    /// for the title bar. The reserved byte at offset 92 is never written.
    pub fn encode(&mut self, rom: &mut RomImage) -> Result<u32, RomError> {
        let raw_count = metrics::recompute(&self.grid, &mut self.meta);
        let base = Self::base(self.index);

        let t = &self.grid.tiles;
        for i in 0..TILE_DATA_SIZE {
            let byte = pack_tiles([t[i * 4], t[i * 4 + 1], t[i * 4 + 2], t[i * 4 + 3]]);
            rom.write_byte(base + i, byte)?;
        }

        rom.write_byte(base + TILE_DATA_SIZE, self.meta.width)?;
        rom.write_byte(base + TILE_DATA_SIZE + 1, self.meta.spawn_x)?;
        rom.write_byte(base + TILE_DATA_SIZE + 2, self.meta.spawn_y)?;
        rom.write_byte(base + TILE_DATA_SIZE + 3, self.meta.grass_goal)?;
        rom.write_byte(base + TILE_DATA_SIZE + 5, self.meta.percent_lo as u8)?;
        rom.write_byte(base + TILE_DATA_SIZE + 6, self.meta.percent_hi)?;

        Ok(raw_count)
    }
}
