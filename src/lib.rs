//! Lawnscaper: a stage editor for *Lawn Mower*, an NES homebrew game.
//!
//! Works directly on the 24592-byte cartridge image
//! ([iNES](https://www.nesdev.org/wiki/INES) NROM: 16-byte header, 16 KiB
//! PRG, 8 KiB CHR). The ten lawn layouts live at fixed PRG offsets as
//! packed 2-bit tiles; the tile artwork comes from the CHR
//! [pattern tables](https://www.nesdev.org/wiki/PPU_pattern_tables).
//!
//! ## Modules
//!
//! - **rom** – the flat image: bounds-checked byte access, load and save
//! - **stage** – stage records: packed tile codec, width/spawn metadata,
//!   derived grass goal and percent increment
//! - **chr** – pattern table decoding and 16×16 game-tile composition
//! - **session** – the editing session the window drives: open stage,
//!   brush, write-through sync, save

pub mod chr;
pub mod rom;
pub mod session;
pub mod stage;
