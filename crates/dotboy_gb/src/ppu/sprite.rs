use crate::machine::Memory;

use super::fifo::{Palette, Pixel};
use super::tiles;

/// Objects the OAM scan keeps for one line.
pub(crate) const MAX_SPRITES_PER_LINE: usize = 10;

const OAM_BASE: u16 = 0xFE00;
const OAM_ENTRIES: u16 = 40;

const ATTR_BG_PRIORITY: u8 = 0x80;
const ATTR_Y_FLIP: u8 = 0x40;
const ATTR_X_FLIP: u8 = 0x20;
const ATTR_PALETTE: u8 = 0x10;

/// One OAM entry. `y` and `x` keep the hardware offsets (+16, +8).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Sprite {
    pub y: u8,
    pub x: u8,
    pub tile: u8,
    pub attributes: u8,
    /// Source address in OAM.
    pub address: u16,
}

impl Sprite {
    fn read(mem: &mut Memory, address: u16) -> Self {
        Sprite {
            y: mem.read(address, true),
            x: mem.read(address + 1, true),
            tile: mem.read(address + 2, true),
            attributes: mem.read(address + 3, true),
            address,
        }
    }

    #[inline]
    fn covers_line(&self, line: u8, height: u8) -> bool {
        let top = line as u16 + 16;
        top >= self.y as u16 && top < self.y as u16 + height as u16
    }

    /// Fetch this object's row on `line` as eight pixels, leftmost first.
    pub(crate) fn pixels(&self, mem: &mut Memory, line: u8, height: u8) -> [Pixel; 8] {
        let mut row = (line as u16 + 16 - self.y as u16) as u8;
        if self.attributes & ATTR_Y_FLIP != 0 {
            row = height - 1 - row;
        }
        let addr = tiles::object_tile_row_address(self.tile, row);
        let low = mem.read(addr, true);
        let high = mem.read(addr + 1, true);

        let mut colors = tiles::decode_row(low, high);
        if self.attributes & ATTR_X_FLIP != 0 {
            colors.reverse();
        }

        let palette = if self.attributes & ATTR_PALETTE != 0 {
            Palette::Object1
        } else {
            Palette::Object0
        };
        colors.map(|color| Pixel {
            color,
            palette,
            bg_priority: self.attributes & ATTR_BG_PRIORITY != 0,
        })
    }
}

/// Objects visible on `line`, ordered by X with OAM order breaking ties,
/// at most ten of them.
pub(crate) fn scan_line(mem: &mut Memory, line: u8, tall: bool) -> Vec<Sprite> {
    let height = if tall { 16 } else { 8 };
    let mut sprites: Vec<Sprite> = (0..OAM_ENTRIES)
        .map(|index| Sprite::read(mem, OAM_BASE + index * 4))
        .filter(|sprite| sprite.covers_line(line, height))
        .collect();

    // `sort_by_key` is stable, so equal X keeps OAM order.
    sprites.sort_by_key(|sprite| sprite.x);
    sprites.truncate(MAX_SPRITES_PER_LINE);
    if tall {
        for sprite in &mut sprites {
            sprite.tile &= 0xFE;
        }
    }
    sprites
}
