//! Stage (lawn) data for Lawn Mower.
//!
//! Ten stages live back to back in PRG ROM at file offset 0x5010, 95 bytes
//! each: 88 bytes of packed tiles followed by 7 bytes of metadata.
//!
//! - **stage** – decode/encode one stage record: 2-bit tiles packed four to
//!   a byte, plus width, spawn, and the derived goal fields
//! - **metrics** – tall-grass goal and the fixed-point percent increment the
//!   game adds per mowed tile

pub mod metrics;
pub mod stage;

#[cfg(test)]
mod tests;

/// File offset of the first stage record.
pub const STAGE_TABLE_OFFSET: usize = 0x5010;
/// Packed tile bytes per stage: 352 tiles, 4 per byte.
pub const TILE_DATA_SIZE: usize = 0x58;
/// One stage record: tile bytes plus 7 metadata bytes.
pub const STAGE_DATA_SIZE: usize = TILE_DATA_SIZE + 7;
pub const STAGE_COUNT: usize = 10;

/// Stored grid width, including the hidden border column 0.
pub const GRID_WIDTH: usize = 32;
pub const GRID_HEIGHT: usize = 11;
pub const TILE_COUNT: usize = GRID_WIDTH * GRID_HEIGHT;

/// Playable width limits the editor enforces when resizing.
pub const MIN_LAWN_WIDTH: u8 = 14;
pub const MAX_LAWN_WIDTH: u8 = 30;

/// The game stores spawn coordinates shifted by the border and status rows.
pub const SPAWN_X_OFFSET: usize = 1;
pub const SPAWN_Y_OFFSET: usize = 3;

/// Tile values, two bits each.
pub const TILE_MOWED: u8 = 0;
pub const TILE_GRASS: u8 = 1;
pub const TILE_FLOWER: u8 = 2;
pub const TILE_ROCK: u8 = 3;
