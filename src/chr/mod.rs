//! CHR (pattern table) graphics from the cartridge.
//!
//! The 8 KiB CHR ROM sits right after the 16 KiB PRG ROM in the image:
//! two 4 KiB pattern tables of 8×8-pixel cells in the planar 2-bits-per-
//! pixel format (<https://www.nesdev.org/wiki/PPU_pattern_tables>). Decoded
//! once per ROM load; the editor samples the result for tile artwork.

pub mod chr;

/// File offset of CHR ROM: 16-byte iNES header + 16 KiB PRG.
pub const PATTERN_TABLE_OFFSET: usize = 0x4010;
/// One pattern table: 256 cells × 16 bytes.
pub const BANK_SIZE: usize = 0x1000;
pub const BANK_COUNT: usize = 2;
/// Edge of a decoded table in pixels: 16 cells × 8.
pub const BANK_DIM: usize = 128;
