//! The editing session: one ROM image, one stage open at a time.
//!
//! Every mutation re-encodes the open stage into the image straight away,
//! so the buffer is always current when it is saved and the derived goal
//! fields can never go stale. Switching stages decodes fresh from the
//! image; an index outside 0-9 or an unreadable record leaves the current
//! stage in place.

use std::path::PathBuf;

use ansi_term::Colour::{Green, Red, White};

use crate::rom::{RomError, RomImage};
use crate::stage::stage::Stage;
use crate::stage::{GRID_WIDTH, TILE_FLOWER, TILE_GRASS, TILE_MOWED};

pub struct EditSession {
    pub rom: RomImage,
    pub stage: Option<Stage>,
    brush: u8,
    grass_raw: u32,
    output: Option<PathBuf>,
}

impl EditSession {
    /// Start a session on an image and open stage 0.
    pub fn new(rom: RomImage, output: Option<PathBuf>) -> EditSession {
        let mut session = EditSession {
            rom,
            stage: None,
            brush: TILE_GRASS,
            grass_raw: 0,
            output,
        };
        session.load_stage(0);
        session
    }

    /// Open stage `index`, replacing the current one. Declined (current
    /// stage kept) when the index or the image can't back it.
    pub fn load_stage(&mut self, index: usize) {
        match Stage::decode(&self.rom, index) {
            Ok(stage) => {
                log::info!(
                    "lawn {}: width {}, spawn ({}, {})",
                    index + 1,
                    stage.meta.width,
                    stage.meta.spawn_x,
                    stage.meta.spawn_y
                );
                print_lawn(&stage);
                self.stage = Some(stage);
                self.sync();
            }
            Err(err) => log::debug!("lawn {} not opened: {}", index + 1, err),
        }
    }

    pub fn next_stage(&mut self) {
        if let Some(index) = self.stage.as_ref().map(|stage| stage.index) {
            self.load_stage(index + 1);
        }
    }

    pub fn prev_stage(&mut self) {
        if let Some(index) = self.stage.as_ref().map(|stage| stage.index) {
            if index > 0 {
                self.load_stage(index - 1);
            }
        }
    }

    /// Tile value painted by [`paint`](Self::paint), masked to two bits.
    pub fn set_brush(&mut self, value: u8) {
        self.brush = value & 3;
    }

    pub fn brush(&self) -> u8 {
        self.brush
    }

    /// Paint the brush at playable (x, y). Off-lawn coordinates fall
    /// through to the grid's own bounds handling.
    pub fn paint(&mut self, x: usize, y: usize) {
        if let Some(stage) = &mut self.stage {
            stage.grid.set(x, y, self.brush);
        }
        self.sync();
    }

    /// Move the player spawn to playable (x, y).
    pub fn set_spawn(&mut self, x: usize, y: usize) {
        if let Some(stage) = &mut self.stage {
            stage.meta.set_spawn(x, y);
        }
        self.sync();
    }

    /// Widen or narrow the lawn by `delta` columns.
    pub fn adjust_width(&mut self, delta: i32) {
        if let Some(stage) = &mut self.stage {
            stage.meta.adjust_width(delta);
        }
        self.sync();
    }

    /// Write the edited image to the session's output path.
    pub fn save(&self) -> Result<(), RomError> {
        let path = self.output.as_ref().ok_or(RomError::NoSelection)?;
        self.rom.save(path)?;
        log::info!("saved {}", path.display());
        Ok(())
    }

    /// Window title: 1-based lawn number and the unclamped grass count.
    pub fn title(&self) -> String {
        match &self.stage {
            Some(stage) => format!(
                "Lawnscaper - Lawn {} - Grass {} / 255",
                stage.index + 1,
                self.grass_raw
            ),
            None => String::from("Lawnscaper"),
        }
    }

    /// Re-encode the open stage into the image, refreshing the derived
    /// metadata and the title count.
    fn sync(&mut self) {
        if let Some(stage) = &mut self.stage {
            match stage.encode(&mut self.rom) {
                Ok(raw) => self.grass_raw = raw,
                Err(err) => log::warn!("lawn {} not written back: {}", stage.index + 1, err),
            }
        }
    }
}

/// Dump the stage's tile values to stdout, tinted by tile kind, one row of
/// 32 digits per grid row.
fn print_lawn(stage: &Stage) {
    for (i, &tile) in stage.grid.tiles.iter().enumerate() {
        let digit = tile.to_string();
        let painted = match tile {
            TILE_MOWED => Green.bold().paint(digit),
            TILE_GRASS => Green.paint(digit),
            TILE_FLOWER => Red.paint(digit),
            _ => White.dimmed().paint(digit),
        };
        print!("{painted}");
        if (i + 1) % GRID_WIDTH == 0 {
            println!();
        }
    }
    println!("lawn {}", stage.index + 1);
}
