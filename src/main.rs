//! Lawnscaper editor window.
//!
//! Usage: lawnscaper <lawn_mower.nes> [output.nes]
//!
//! Left mouse paints the current brush, right mouse moves the spawn.
//! Keys 1-4 pick the brush (mowed, grass, flower, rock), PageUp/PageDown
//! switch lawns, `-` and `=` resize the lawn, Ctrl+S saves, Escape quits.
//! Without an output argument, saves land next to the source image as
//! `Lawn_Mower_custom.nes`.

use std::env;
use std::path::{Path, PathBuf};
use std::process;

use lawnscaper::chr::chr::{PatternTables, TileImage};
use lawnscaper::rom::RomImage;
use lawnscaper::session::EditSession;
use lawnscaper::stage::{
    GRID_HEIGHT, MAX_LAWN_WIDTH, SPAWN_X_OFFSET, SPAWN_Y_OFFSET, TILE_FLOWER, TILE_GRASS,
    TILE_MOWED, TILE_ROCK,
};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

/// On-screen pixels per lawn cell: the 16×16 tile art at 2×.
const TILE_SIZE: usize = 32;
/// The window fits the widest lawn; narrower lawns leave the right side
/// black. Column 0 of the stored grid is the hidden border and never shown.
const VIEW_COLS: usize = MAX_LAWN_WIDTH as usize;
const VIEW_W: usize = VIEW_COLS * TILE_SIZE;
const VIEW_H: usize = GRID_HEIGHT * TILE_SIZE;

/// CHR cell (x, y) and palette drawn for each tile value, all from the
/// background pattern table. Game tiles span 2×2 cells.
const TILE_ART: [(usize, usize, usize); 4] = [
    (0, 8, 2), // mowed
    (2, 8, 2), // tall grass
    (4, 8, 1), // flower
    (6, 8, 3), // rock
];

/// Flat fallback colors per tile value when the CHR region is unreadable.
const CANVAS_COLORS: [u32; 4] = [0x00FF00, 0x00A500, 0xFC7460, 0xBCBCBC];

const GRID_COLOR: u32 = 0xFFFFFF;
const SPAWN_COLOR: u32 = 0xFF0000;
const SPAWN_INSET: usize = 10;

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let Some(rom_path) = args.next() else {
        eprintln!("usage: lawnscaper <lawn_mower.nes> [output.nes]");
        process::exit(1);
    };
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output(&rom_path));

    let rom = match RomImage::load(&rom_path) {
        Ok(rom) => rom,
        Err(err) => {
            eprintln!("failed to read {rom_path}: {err}");
            process::exit(1);
        }
    };

    let art = match PatternTables::decode(&rom) {
        Ok(tables) => Some(tile_art(&tables)),
        Err(err) => {
            log::warn!("CHR tiles unavailable, drawing flat colors: {}", err);
            None
        }
    };

    let mut session = EditSession::new(rom, Some(output));

    let mut window = Window::new(&session.title(), VIEW_W, VIEW_H, WindowOptions::default())
        .expect("Failed to create window");
    window.set_target_fps(60);

    let mut framebuffer = vec![0u32; VIEW_W * VIEW_H];
    while window.is_open() && !window.is_key_down(Key::Escape) {
        handle_input(&window, &mut session);
        draw(&mut framebuffer, &session, art.as_ref());
        window.set_title(&session.title());
        window
            .update_with_buffer(&framebuffer, VIEW_W, VIEW_H)
            .expect("Failed to update window");
    }
}

/// Default save name, placed next to the source image.
fn default_output(rom_path: &str) -> PathBuf {
    Path::new(rom_path).with_file_name("Lawn_Mower_custom.nes")
}

/// Compose the four lawn tile images the canvas draws.
fn tile_art(tables: &PatternTables) -> [TileImage; 4] {
    TILE_ART.map(|(cell_x, cell_y, palette)| tables.tile_image(0, cell_x, cell_y, palette))
}

fn handle_input(window: &Window, session: &mut EditSession) {
    let ctrl = window.is_key_down(Key::LeftCtrl) || window.is_key_down(Key::RightCtrl);
    for key in window.get_keys_pressed(KeyRepeat::No) {
        match key {
            Key::Key1 => session.set_brush(TILE_MOWED),
            Key::Key2 => session.set_brush(TILE_GRASS),
            Key::Key3 => session.set_brush(TILE_FLOWER),
            Key::Key4 => session.set_brush(TILE_ROCK),
            Key::PageUp => session.prev_stage(),
            Key::PageDown => session.next_stage(),
            Key::Minus => session.adjust_width(-1),
            Key::Equal => session.adjust_width(1),
            Key::S if ctrl => {
                if let Err(err) = session.save() {
                    log::error!("save failed: {}", err);
                }
            }
            _ => {}
        }
    }

    // Held buttons, not clicks: dragging paints a stroke.
    if let Some((mx, my)) = window.get_mouse_pos(MouseMode::Discard) {
        let x = mx as usize / TILE_SIZE;
        let y = my as usize / TILE_SIZE;
        let cols = session
            .stage
            .as_ref()
            .map_or(0, |stage| stage.meta.width as usize);
        if x < cols && y < GRID_HEIGHT {
            if window.get_mouse_down(MouseButton::Left) {
                session.paint(x, y);
            }
            if window.get_mouse_down(MouseButton::Right) {
                session.set_spawn(x, y);
            }
        }
    }
}

fn draw(framebuffer: &mut [u32], session: &EditSession, art: Option<&[TileImage; 4]>) {
    framebuffer.fill(0x000000);
    let Some(stage) = &session.stage else {
        return;
    };

    let cols = (stage.meta.width as usize).min(VIEW_COLS);
    for y in 0..GRID_HEIGHT {
        for x in 0..cols {
            let tile = (stage.grid.get(x, y) & 3) as usize;
            let px = x * TILE_SIZE;
            let py = y * TILE_SIZE;
            match art {
                Some(images) => blit_tile(framebuffer, &images[tile], px, py),
                None => fill_tile(framebuffer, CANVAS_COLORS[tile], px, py),
            }
            outline_tile(framebuffer, px, py);
            if stage.meta.spawn_x as usize == x + SPAWN_X_OFFSET
                && stage.meta.spawn_y as usize == y + SPAWN_Y_OFFSET
            {
                mark_spawn(framebuffer, px, py);
            }
        }
    }
}

/// Draw one 16×16 tile image at 2× scale.
fn blit_tile(framebuffer: &mut [u32], image: &TileImage, px: usize, py: usize) {
    for ty in 0..TILE_SIZE {
        for tx in 0..TILE_SIZE {
            framebuffer[(py + ty) * VIEW_W + px + tx] = image.pixels[(ty / 2) * 16 + tx / 2];
        }
    }
}

fn fill_tile(framebuffer: &mut [u32], color: u32, px: usize, py: usize) {
    for ty in 0..TILE_SIZE {
        for tx in 0..TILE_SIZE {
            framebuffer[(py + ty) * VIEW_W + px + tx] = color;
        }
    }
}

/// One-pixel cell outline so the lawn reads as a grid.
fn outline_tile(framebuffer: &mut [u32], px: usize, py: usize) {
    for i in 0..TILE_SIZE {
        framebuffer[py * VIEW_W + px + i] = GRID_COLOR;
        framebuffer[(py + TILE_SIZE - 1) * VIEW_W + px + i] = GRID_COLOR;
        framebuffer[(py + i) * VIEW_W + px] = GRID_COLOR;
        framebuffer[(py + i) * VIEW_W + px + TILE_SIZE - 1] = GRID_COLOR;
    }
}

/// Red square inset into the spawn cell.
fn mark_spawn(framebuffer: &mut [u32], px: usize, py: usize) {
    for ty in SPAWN_INSET..TILE_SIZE - SPAWN_INSET {
        for tx in SPAWN_INSET..TILE_SIZE - SPAWN_INSET {
            framebuffer[(py + ty) * VIEW_W + px + tx] = SPAWN_COLOR;
        }
    }
}
