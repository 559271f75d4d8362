use super::*;
use crate::registers::{BGP, IF, OBP0, SCX};

fn memory() -> Memory {
    Memory::from_rom(&vec![0u8; 0x8000], None, false).expect("32 KiB ROM-only image")
}

fn run_frame(ppu: &mut Ppu, mem: &mut Memory) -> (Frame, u32) {
    for dot in 1..=DOTS_PER_FRAME * 2 {
        if let Some(frame) = ppu.tick(mem) {
            return (frame, dot);
        }
    }
    panic!("no frame within two frames' worth of dots");
}

/// Tile 1 is solid colour 3, tile 2 solid colour 1.
fn load_tiles(mem: &mut Memory) {
    for row in 0..8u16 {
        mem.write(0x8010 + row * 2, 0xFF, false);
        mem.write(0x8011 + row * 2, 0xFF, false);
        mem.write(0x8020 + row * 2, 0xFF, false);
        mem.write(0x8021 + row * 2, 0x00, false);
    }
}

fn write_sprite(mem: &mut Memory, index: u16, y: u8, x: u8, tile: u8, attributes: u8) {
    let base = 0xFE00 + index * 4;
    mem.write(base, y, false);
    mem.write(base + 1, x, false);
    mem.write(base + 2, tile, false);
    mem.write(base + 3, attributes, false);
}

#[test]
fn object_scan_lasts_80_dots_and_locks_oam() {
    let mut mem = memory();
    let mut ppu = Ppu::new();

    for _ in 0..79 {
        ppu.tick(&mut mem);
    }
    assert_eq!(ppu.mode(), Some(LcdMode::ObjectScan));
    assert!(mem.oam_locked());
    assert!(!mem.vram_locked());
    assert_eq!(mem.read(STAT, false) & 0x03, LcdMode::ObjectScan as u8);

    ppu.tick(&mut mem);
    assert_eq!(ppu.mode(), Some(LcdMode::DrawPixels));
    assert_eq!(ppu.dot(), 80);
    assert!(mem.vram_locked());
    assert_eq!(mem.read(0x8000, false), 0xFF);
}

#[test]
fn scanline_is_456_dots() {
    let mut mem = memory();
    let mut ppu = Ppu::new();

    let mut dots = 0;
    let mut saw_hblank = false;
    while ppu.line() == 0 {
        ppu.tick(&mut mem);
        dots += 1;
        if ppu.mode() == Some(LcdMode::HorizontalBlank) {
            saw_hblank = true;
            assert!(!mem.vram_locked());
            assert!(!mem.oam_locked());
        }
    }
    assert!(saw_hblank);
    assert_eq!(dots, DOTS_PER_LINE);
    assert_eq!(ppu.dot(), 0);
    assert_eq!(mem.read(LY, false), 1);
}

#[test]
fn frame_covers_lines_0_to_153() {
    let mut mem = memory();
    let mut ppu = Ppu::new();
    mem.write(IF, 0, false);

    let mut highest_line = 0;
    let mut vblank_requested_at = None;
    let mut dots = 0;
    let frame = loop {
        dots += 1;
        let frame = ppu.tick(&mut mem);
        highest_line = highest_line.max(ppu.line());
        if vblank_requested_at.is_none() && mem.read(IF, false) & 0x01 != 0 {
            vblank_requested_at = Some(ppu.line());
        }
        if let Some(frame) = frame {
            break frame;
        }
    };

    assert_eq!(dots, DOTS_PER_FRAME);
    assert_eq!(highest_line, 153);
    assert_eq!(vblank_requested_at, Some(144));
    assert_eq!(frame.rows().len(), crate::SCREEN_HEIGHT);
    assert_eq!(ppu.line(), 0);
    assert_eq!(ppu.mode(), Some(LcdMode::ObjectScan));
}

#[test]
fn background_tiles_resolve_through_bgp() {
    let mut mem = memory();
    let mut ppu = Ppu::new();
    load_tiles(&mut mem);
    mem.write(0x9800, 0x01, false);
    mem.write(0x9801, 0x02, false);
    mem.write(BGP, 0xE4, false);

    let (frame, _) = run_frame(&mut ppu, &mut mem);
    assert_eq!(&frame.rows()[0][0..8], &[3; 8]);
    assert_eq!(&frame.rows()[7][8..16], &[1; 8]);
    assert_eq!(frame.pixel(16, 0), 0);
    assert_eq!(frame.pixel(0, 8), 0);
}

#[test]
fn fine_scroll_drops_pixels_from_first_tile() {
    let mut mem = memory();
    let mut ppu = Ppu::new();
    load_tiles(&mut mem);
    mem.write(0x9800, 0x01, false);
    mem.write(BGP, 0xE4, false);
    mem.write(SCX, 3, false);

    let (frame, _) = run_frame(&mut ppu, &mut mem);
    assert_eq!(&frame.rows()[0][0..6], &[3, 3, 3, 3, 3, 0]);
}

#[test]
fn disabled_background_renders_colour_zero() {
    let mut mem = memory();
    let mut ppu = Ppu::new();
    load_tiles(&mut mem);
    mem.write(0x9800, 0x01, false);
    mem.write(BGP, 0xE4, false);
    mem.write(LCDC, 0x90, false);

    let (frame, _) = run_frame(&mut ppu, &mut mem);
    assert_eq!(frame.pixel(0, 0), 0);
}

#[test]
fn window_replaces_background_from_wx() {
    let mut mem = memory();
    let mut ppu = Ppu::new();
    load_tiles(&mut mem);
    for addr in 0x9800..0x9C00u16 {
        mem.write(addr, 0x01, false);
    }
    mem.write(BGP, 0xE4, false);
    mem.write(WY, 0, false);
    mem.write(WX, 7 + 80, false);
    // Window on with the 0x9800 map, background on the empty 0x9C00 map.
    mem.write(LCDC, 0xB9, false);

    let (frame, _) = run_frame(&mut ppu, &mut mem);
    assert_eq!(frame.pixel(79, 0), 0);
    assert_eq!(frame.pixel(80, 0), 3);
    assert_eq!(frame.pixel(159, 143), 3);
}

#[test]
fn sprite_draws_over_background_colour_zero() {
    let mut mem = memory();
    let mut ppu = Ppu::new();
    load_tiles(&mut mem);
    mem.write(BGP, 0xE4, false);
    mem.write(OBP0, 0xE4, false);
    mem.write(LCDC, 0x93, false);
    write_sprite(&mut mem, 0, 16, 8, 0x02, 0x00);

    let (frame, _) = run_frame(&mut ppu, &mut mem);
    assert_eq!(&frame.rows()[0][0..9], &[1, 1, 1, 1, 1, 1, 1, 1, 0]);
    assert_eq!(frame.pixel(0, 7), 1);
    assert_eq!(frame.pixel(0, 8), 0);
}

#[test]
fn sprite_clipped_at_left_edge_and_flipped() {
    let mut mem = memory();
    let mut ppu = Ppu::new();
    // Tile 3: only the leftmost pixel is set (colour 1).
    for row in 0..8u16 {
        mem.write(0x8030 + row * 2, 0x80, false);
    }
    mem.write(OBP0, 0xE4, false);
    mem.write(LCDC, 0x93, false);
    // x=4 shows only the right half; X flip moves the set pixel to column 3.
    write_sprite(&mut mem, 0, 16, 4, 0x03, 0x20);

    let (frame, _) = run_frame(&mut ppu, &mut mem);
    assert_eq!(&frame.rows()[0][0..5], &[0, 0, 0, 1, 0]);
}

#[test]
fn earlier_sprite_wins_overlap() {
    let mut mem = memory();
    let mut ppu = Ppu::new();
    load_tiles(&mut mem);
    mem.write(OBP0, 0xE4, false);
    mem.write(LCDC, 0x93, false);
    // Same X: OAM order decides. Tile 2 is colour 1, tile 1 colour 3.
    write_sprite(&mut mem, 0, 16, 8, 0x02, 0x00);
    write_sprite(&mut mem, 1, 16, 8, 0x01, 0x00);

    let (frame, _) = run_frame(&mut ppu, &mut mem);
    assert_eq!(frame.pixel(0, 0), 1);
}

#[test]
fn transparent_sprite_pixel_shows_background() {
    let lcdc = Lcdc::DISPLAY_ENABLE | Lcdc::BG_WINDOW_ENABLE | Lcdc::OBJ_ENABLE;
    let bg = Pixel::background(2);
    let transparent = Pixel::TRANSPARENT;
    assert_eq!(mix(lcdc, bg, transparent), bg);

    let opaque = Pixel {
        color: 1,
        ..Pixel::TRANSPARENT
    };
    assert_eq!(mix(lcdc, bg, opaque), opaque);
    assert_eq!(mix(lcdc - Lcdc::OBJ_ENABLE, bg, opaque), bg);
}

#[test]
fn background_priority_hides_sprite_behind_non_zero_colours() {
    let lcdc = Lcdc::DISPLAY_ENABLE | Lcdc::BG_WINDOW_ENABLE | Lcdc::OBJ_ENABLE;
    let behind = Pixel {
        color: 3,
        bg_priority: true,
        ..Pixel::TRANSPARENT
    };
    assert_eq!(mix(lcdc, Pixel::background(1), behind), Pixel::background(1));
    assert_eq!(mix(lcdc, Pixel::background(0), behind), behind);
    // LCDC bit 0 clear turns the background into colour 0.
    assert_eq!(mix(lcdc - Lcdc::BG_WINDOW_ENABLE, Pixel::background(1), behind), behind);
}

#[test]
fn oam_scan_keeps_ten_lowest_x_sprites() {
    let mut mem = memory();
    for i in 0..11u16 {
        write_sprite(&mut mem, i, 16, 30 - i as u8, i as u8, 0);
    }
    // Off this line.
    write_sprite(&mut mem, 11, 40, 0, 0x50, 0);

    let sprites = sprite::scan_line(&mut mem, 0, false);
    assert_eq!(sprites.len(), sprite::MAX_SPRITES_PER_LINE);
    let xs: Vec<u8> = sprites.iter().map(|s| s.x).collect();
    assert_eq!(xs, (20..=29).collect::<Vec<u8>>());
    assert!(sprites.iter().all(|s| s.x != 30));
}

#[test]
fn oam_scan_orders_equal_x_by_oam_address_and_masks_tall_tiles() {
    let mut mem = memory();
    write_sprite(&mut mem, 0, 20, 50, 0x07, 0);
    write_sprite(&mut mem, 1, 10, 50, 0x05, 0);
    write_sprite(&mut mem, 2, 10, 12, 0x03, 0);

    let sprites = sprite::scan_line(&mut mem, 4, true);
    let order: Vec<(u16, u8)> = sprites.iter().map(|s| (s.address, s.tile)).collect();
    assert_eq!(order, vec![(0xFE08, 0x02), (0xFE00, 0x06), (0xFE04, 0x04)]);
}

#[test]
fn lyc_match_sets_flag_and_requests_stat_interrupt() {
    let mut mem = memory();
    let mut ppu = Ppu::new();
    mem.write(IF, 0, false);
    mem.write(LYC, 2, false);
    mem.write(STAT, Stat::LYC_INTERRUPT.bits(), false);

    while ppu.line() < 2 {
        ppu.tick(&mut mem);
    }
    assert_ne!(mem.read(STAT, false) & Stat::LYC_EQUAL.bits(), 0);
    assert_eq!(mem.read(IF, false) & 0x1F, Interrupts::LCD_STAT.bits());

    while ppu.line() < 3 {
        ppu.tick(&mut mem);
    }
    assert_eq!(mem.read(STAT, false) & Stat::LYC_EQUAL.bits(), 0);
}

#[test]
fn hblank_stat_interrupt_fires_when_enabled() {
    let mut mem = memory();
    let mut ppu = Ppu::new();
    mem.write(IF, 0, false);
    mem.write(STAT, Stat::HBLANK_INTERRUPT.bits(), false);

    while ppu.mode() != Some(LcdMode::HorizontalBlank) {
        ppu.tick(&mut mem);
        if ppu.mode() != Some(LcdMode::HorizontalBlank) {
            assert_eq!(mem.read(IF, false) & 0x1F, 0);
        }
    }
    assert_eq!(mem.read(IF, false) & 0x1F, Interrupts::LCD_STAT.bits());
}

#[test]
fn display_off_resets_ly_and_reenable_restarts_line_zero() {
    let mut mem = memory();
    let mut ppu = Ppu::new();
    for _ in 0..DOTS_PER_LINE * 3 + 100 {
        ppu.tick(&mut mem);
    }
    assert_eq!(ppu.line(), 3);

    mem.write(LCDC, 0x11, false);
    ppu.tick(&mut mem);
    assert_eq!(ppu.mode(), None);
    assert_eq!(mem.read(LY, false), 0);
    assert_eq!(mem.read(STAT, false) & 0x03, 0);
    assert!(!mem.vram_locked());
    assert!(!mem.oam_locked());

    // Stays off without advancing.
    for _ in 0..1000 {
        assert!(ppu.tick(&mut mem).is_none());
    }
    assert_eq!(ppu.dot(), 0);

    mem.write(LCDC, 0x91, false);
    ppu.tick(&mut mem);
    assert_eq!(ppu.mode(), Some(LcdMode::ObjectScan));
    assert_eq!(ppu.line(), 0);
    assert_eq!(ppu.dot(), 1);

    let (_, dots) = run_frame(&mut ppu, &mut mem);
    assert_eq!(dots, DOTS_PER_FRAME - 1);
}
