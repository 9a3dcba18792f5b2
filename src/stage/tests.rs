//! Stage codec tests against synthetic ROM images.

use crate::rom::{ROM_SIZE, RomError, RomImage};
use crate::stage::stage::{Stage, StageMeta, TileGrid, pack_tiles, unpack_tiles};
use crate::stage::{
    STAGE_DATA_SIZE, STAGE_TABLE_OFFSET, TILE_DATA_SIZE, TILE_GRASS, TILE_ROCK,
};

fn blank_rom() -> RomImage {
    RomImage::from_bytes(vec![0; ROM_SIZE])
}

fn stage_base(index: usize) -> usize {
    STAGE_TABLE_OFFSET + STAGE_DATA_SIZE * index
}

#[test]
fn pack_then_unpack_restores_any_byte() {
    for byte in 0..=255u8 {
        assert_eq!(pack_tiles(unpack_tiles(byte)), byte);
    }
}

#[test]
fn first_tile_sits_in_the_top_bits() {
    assert_eq!(unpack_tiles(0b1110_0100), [3, 2, 1, 0]);
    assert_eq!(pack_tiles([3, 2, 1, 0]), 0b1110_0100);
}

#[test]
fn grid_offset_skips_the_border_column() {
    assert_eq!(TileGrid::data_offset(0, 0), 1);
    assert_eq!(TileGrid::data_offset(0, 1), 33);
    assert_eq!(TileGrid::data_offset(30, 10), 351);
}

#[test]
fn grid_access_past_the_edge_is_harmless() {
    let mut grid = TileGrid::new();
    grid.set(31, 10, TILE_ROCK);
    assert!(grid.tiles.iter().all(|&t| t == 0));
    assert_eq!(grid.get(31, 10), 0);
}

#[test]
fn grid_set_masks_to_two_bits() {
    let mut grid = TileGrid::new();
    grid.set(4, 2, 0xFF);
    assert_eq!(grid.get(4, 2), 3);
}

#[test]
fn decode_reads_width_and_spawn() {
    let mut rom = blank_rom();
    let base = stage_base(3);
    rom.write_byte(base + TILE_DATA_SIZE, 16).unwrap();
    rom.write_byte(base + TILE_DATA_SIZE + 1, 5).unwrap();
    rom.write_byte(base + TILE_DATA_SIZE + 2, 7).unwrap();
    let stage = Stage::decode(&rom, 3).unwrap();
    assert_eq!(stage.index, 3);
    assert_eq!(stage.meta.width, 16);
    assert_eq!(stage.meta.spawn_x, 5);
    assert_eq!(stage.meta.spawn_y, 7);
}

#[test]
fn decode_recomputes_stale_goal_and_percent() {
    let mut rom = blank_rom();
    let base = stage_base(0);
    rom.write_byte(base + TILE_DATA_SIZE, 14).unwrap();
    // stale derived bytes from some earlier editor
    rom.write_byte(base + TILE_DATA_SIZE + 3, 200).unwrap();
    rom.write_byte(base + TILE_DATA_SIZE + 5, 9).unwrap();
    rom.write_byte(base + TILE_DATA_SIZE + 6, 9).unwrap();
    let stage = Stage::decode(&rom, 0).unwrap();
    assert_eq!(stage.meta.grass_goal, 0);
    assert_eq!(stage.meta.percent_lo, 0);
    assert_eq!(stage.meta.percent_hi, 0);
}

#[test]
fn decode_rejects_bad_stage_index() {
    let rom = blank_rom();
    assert!(matches!(Stage::decode(&rom, 10), Err(RomError::NoSuchStage(10))));
    assert!(matches!(Stage::decode(&rom, 99), Err(RomError::NoSuchStage(99))));
}

#[test]
fn decode_fails_cleanly_on_a_short_image() {
    let rom = RomImage::from_bytes(vec![0; STAGE_TABLE_OFFSET + 10]);
    assert!(matches!(Stage::decode(&rom, 0), Err(RomError::OutOfRange { .. })));
}

#[test]
fn encode_writes_the_record_layout() {
    let mut rom = blank_rom();
    let mut stage = Stage::decode(&rom, 0).unwrap();
    stage.meta.width = 14;
    stage.meta.set_spawn(2, 5);
    stage.grid.set(0, 0, TILE_GRASS);
    let raw = stage.encode(&mut rom).unwrap();
    assert_eq!(raw, 1);

    let base = stage_base(0);
    // (0, 0) lands at grid index 1: second tile of the first byte
    assert_eq!(rom.read_byte(base).unwrap(), 0b0001_0000);
    assert_eq!(rom.read_byte(base + TILE_DATA_SIZE).unwrap(), 14);
    assert_eq!(rom.read_byte(base + TILE_DATA_SIZE + 1).unwrap(), 3);
    assert_eq!(rom.read_byte(base + TILE_DATA_SIZE + 2).unwrap(), 8);
    assert_eq!(rom.read_byte(base + TILE_DATA_SIZE + 3).unwrap(), 1);
    assert_eq!(rom.read_byte(base + TILE_DATA_SIZE + 5).unwrap(), 156);
    assert_eq!(rom.read_byte(base + TILE_DATA_SIZE + 6).unwrap(), 99);
}

#[test]
fn encode_never_touches_the_reserved_byte() {
    let mut rom = blank_rom();
    let base = stage_base(0);
    rom.write_byte(base + TILE_DATA_SIZE + 4, 0x77).unwrap();
    let mut stage = Stage::decode(&rom, 0).unwrap();
    stage.grid.set(2, 2, TILE_GRASS);
    stage.encode(&mut rom).unwrap();
    assert_eq!(rom.read_byte(base + TILE_DATA_SIZE + 4).unwrap(), 0x77);
}

#[test]
fn encode_only_touches_its_own_record() {
    let mut rom = RomImage::from_bytes(vec![0x24; ROM_SIZE]);
    let mut stage = Stage::decode(&rom, 3).unwrap();
    stage.grid.set(1, 1, TILE_GRASS);
    stage.encode(&mut rom).unwrap();

    let base = stage_base(3);
    for (offset, &byte) in rom.as_bytes().iter().enumerate() {
        let inside = offset >= base && offset < base + STAGE_DATA_SIZE;
        if !inside || offset == base + TILE_DATA_SIZE + 4 {
            assert_eq!(byte, 0x24, "byte at {offset:#06X} changed");
        }
    }
}

#[test]
fn round_trip_preserves_tiles_and_meta() {
    let mut rom = blank_rom();
    let mut stage = Stage::decode(&rom, 7).unwrap();
    for i in 0..stage.grid.tiles.len() {
        stage.grid.tiles[i] = ((i * 7 + 3) % 4) as u8;
    }
    stage.meta.width = 30;
    stage.meta.set_spawn(5, 5);
    stage.encode(&mut rom).unwrap();

    let decoded = Stage::decode(&rom, 7).unwrap();
    assert_eq!(decoded.grid.tiles, stage.grid.tiles);
    assert_eq!(decoded.meta.width, 30);
    assert_eq!(decoded.meta.spawn_x, 6);
    assert_eq!(decoded.meta.spawn_y, 8);
    assert_eq!(decoded.meta.grass_goal, stage.meta.grass_goal);
    assert_eq!(decoded.meta.percent_lo, stage.meta.percent_lo);
    assert_eq!(decoded.meta.percent_hi, stage.meta.percent_hi);
}

#[test]
fn second_encode_is_byte_identical() {
    let mut rom = blank_rom();
    let mut stage = Stage::decode(&rom, 2).unwrap();
    stage.meta.width = 20;
    stage.grid.set(3, 3, TILE_GRASS);
    stage.grid.set(9, 9, TILE_ROCK);
    stage.encode(&mut rom).unwrap();
    let snapshot = rom.as_bytes().to_vec();
    stage.encode(&mut rom).unwrap();
    assert_eq!(rom.as_bytes(), snapshot.as_slice());
}

#[test]
fn tiles_past_the_width_are_stored_but_uncounted() {
    let mut rom = blank_rom();
    let mut stage = Stage::decode(&rom, 0).unwrap();
    stage.meta.width = 14;
    stage.grid.set(20, 0, TILE_GRASS);
    let raw = stage.encode(&mut rom).unwrap();
    assert_eq!(raw, 0);
    assert_eq!(stage.meta.grass_goal, 0);

    let decoded = Stage::decode(&rom, 0).unwrap();
    assert_eq!(decoded.grid.get(20, 0), TILE_GRASS);
}

#[test]
fn spawn_outside_the_lawn_is_rejected() {
    let mut meta = StageMeta {
        width: 14,
        spawn_x: 1,
        spawn_y: 3,
        grass_goal: 0,
        percent_lo: 0,
        percent_hi: 0,
    };
    meta.set_spawn(14, 0);
    assert_eq!((meta.spawn_x, meta.spawn_y), (1, 3));
    meta.set_spawn(0, 11);
    assert_eq!((meta.spawn_x, meta.spawn_y), (1, 3));
    meta.set_spawn(13, 10);
    assert_eq!((meta.spawn_x, meta.spawn_y), (14, 13));
}

#[test]
fn width_adjustment_clamps_to_the_playable_range() {
    let mut meta = StageMeta {
        width: 16,
        spawn_x: 1,
        spawn_y: 3,
        grass_goal: 0,
        percent_lo: 0,
        percent_hi: 0,
    };
    meta.adjust_width(100);
    assert_eq!(meta.width, 30);
    meta.adjust_width(-100);
    assert_eq!(meta.width, 14);

    // a blank image's zero width normalizes on the first nudge
    meta.width = 0;
    meta.adjust_width(1);
    assert_eq!(meta.width, 14);
    meta.width = 0;
    meta.adjust_width(-1);
    assert_eq!(meta.width, 14);
}

#[test]
fn blank_rom_edit_cycle() {
    let mut rom = blank_rom();
    let mut stage = Stage::decode(&rom, 0).unwrap();
    assert_eq!(stage.meta.width, 0);
    assert!(stage.grid.tiles.iter().all(|&t| t == 0));

    stage.meta.adjust_width(1);
    stage.grid.set(0, 0, TILE_GRASS);
    assert_eq!(stage.encode(&mut rom).unwrap(), 1);

    let decoded = Stage::decode(&rom, 0).unwrap();
    assert_eq!(decoded.meta.width, 14);
    assert_eq!(decoded.grid.get(0, 0), TILE_GRASS);
    assert_eq!(decoded.grid.tiles.iter().filter(|&&t| t != 0).count(), 1);
    assert_eq!(decoded.meta.grass_goal, 1);
    assert_eq!(decoded.meta.percent_lo, 156);
    assert_eq!(decoded.meta.percent_hi, 99);
}
