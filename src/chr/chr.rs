//! Pattern table decoding and game-tile composition.
//!
//! Each 8×8 cell is 16 bytes: 8 bytes of bit plane 0, then 8 of plane 1,
//! most significant bit leftmost. Plane 1 contributes the high bit of the
//! 2-bit palette index. Cells decode into a 128×128 index buffer per bank,
//! laid out 16 cells across, and the game composes its 16×16 lawn tiles
//! from 2×2 blocks of adjacent cells.

use crate::chr::{BANK_COUNT, BANK_DIM, BANK_SIZE, PATTERN_TABLE_OFFSET};
use crate::rom::{RomError, RomImage};

/// Four 4-entry palettes (0xRRGGBB), one per background slot the game
/// uses: UI lettering, flowers, grass, rocks. Entries are stock NES
/// palette colors (<https://www.nesdev.org/wiki/PPU_palettes>).
pub const TILE_PALETTES: [[u32; 4]; 4] = [
    [0x000000, 0x747474, 0xBCBCBC, 0xFCFCFC], // lettering
    [0x00A800, 0xFC7460, 0xA81000, 0xFCFCFC], // flower
    [0x00A800, 0x00FC00, 0x005800, 0xFCFCFC], // grass
    [0x00A800, 0xBCBCBC, 0x747474, 0x000000], // rock
];

/// Both decoded pattern tables as 128×128 buffers of 2-bit palette indices.
pub struct PatternTables {
    pub banks: [[u8; BANK_DIM * BANK_DIM]; BANK_COUNT],
}

/// A composed 16×16 game tile, one 0xRRGGBB pixel per entry, row-major.
pub struct TileImage {
    pub pixels: [u32; 16 * 16],
}

impl PatternTables {
    /// Decode both banks from the fixed CHR region of the image.
    pub fn decode(rom: &RomImage) -> Result<PatternTables, RomError> {
        let mut banks = [[0u8; BANK_DIM * BANK_DIM]; BANK_COUNT];
        for (bank, pixels) in banks.iter_mut().enumerate() {
            let bank_base = PATTERN_TABLE_OFFSET + bank * BANK_SIZE;
            for cell in 0..256 {
                let (cell_x, cell_y) = (cell % 16, cell / 16);
                let cell_base = bank_base + cell * 16;
                for y in 0..8 {
                    let plane0 = rom.read_byte(cell_base + y)?;
                    let plane1 = rom.read_byte(cell_base + y + 8)?;
                    for x in 0..8 {
                        let bit = 7 - x;
                        let index = ((plane1 >> bit) & 1) << 1 | ((plane0 >> bit) & 1);
                        pixels[(cell_y * 8 + y) * BANK_DIM + cell_x * 8 + x] = index;
                    }
                }
            }
        }
        Ok(PatternTables { banks })
    }

    /// Compose the 16×16 game tile whose top-left cell is (cell_x, cell_y):
    /// a 2×2 block of adjacent cells mapped through one of
    /// [`TILE_PALETTES`]. Source coordinates wrap at the table edge, so any
    /// cell index is safe to ask for.
    pub fn tile_image(
        &self,
        bank: usize,
        cell_x: usize,
        cell_y: usize,
        palette: usize,
    ) -> TileImage {
        let table = &self.banks[bank % BANK_COUNT];
        let colors = &TILE_PALETTES[palette % TILE_PALETTES.len()];
        let mut pixels = [0u32; 16 * 16];
        for y in 0..16 {
            for x in 0..16 {
                let sx = (cell_x * 8 + x) % BANK_DIM;
                let sy = (cell_y * 8 + y) % BANK_DIM;
                pixels[y * 16 + x] = colors[(table[sy * BANK_DIM + sx] & 3) as usize];
            }
        }
        TileImage { pixels }
    }
}
