use crate::machine::Memory;
use crate::registers::{Lcdc, LCDC, SCX, SCY};

use super::fifo::{Pixel, PixelQueue};
use super::tiles::{self, TILE_MAP_HIGH, TILE_MAP_LOW};

/// Dots spent in each of the three fetch stages.
const STAGE_DOTS: u8 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FetchStage {
    GetTile,
    GetTileDataLow,
    GetTileDataHigh,
    Push,
}

/// Background/window tile fetcher: walks one row of the tile map and
/// pushes eight pixels per tile into the background queue.
#[derive(Clone, Debug)]
pub(crate) struct Fetcher {
    stage: FetchStage,
    stage_dots: u8,
    /// Tile column within the 32-tile map row, relative to SCX / 8 for the
    /// background and to the window's left edge for the window.
    tile_column: u8,
    line: u8,
    /// Window row counter; only advances on lines that showed the window.
    window_line: u8,
    fetching_window: bool,
    window_drawn: bool,
    scroll_dropped: bool,
    tile: u8,
    low: u8,
    high: u8,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self {
            stage: FetchStage::GetTile,
            stage_dots: 0,
            tile_column: 0,
            line: 0,
            window_line: 0,
            fetching_window: false,
            window_drawn: false,
            scroll_dropped: false,
            tile: 0,
            low: 0,
            high: 0,
        }
    }
}

impl Fetcher {
    /// Reset for a new frame; the window row counter starts over.
    pub(crate) fn start_frame(&mut self) {
        *self = Self::default();
    }

    /// Reset for scanline `line`, keeping the window row counter.
    pub(crate) fn start_line(&mut self, line: u8) {
        let window_line = if self.window_drawn {
            self.window_line.wrapping_add(1)
        } else {
            self.window_line
        };
        *self = Self {
            line,
            window_line,
            ..Self::default()
        };
    }

    /// At a tile boundary, where an object fetch may take over.
    #[inline]
    pub(crate) fn is_idle(&self) -> bool {
        match self.stage {
            FetchStage::GetTile => self.stage_dots == 0,
            FetchStage::Push => true,
            _ => false,
        }
    }

    #[inline]
    pub(crate) fn fetching_window(&self) -> bool {
        self.fetching_window
    }

    /// Abandon the background tile in flight and restart from the first
    /// window tile.
    pub(crate) fn start_window(&mut self) {
        self.stage = FetchStage::GetTile;
        self.stage_dots = 0;
        self.tile_column = 0;
        self.fetching_window = true;
        self.window_drawn = true;
    }

    /// Advance one dot.
    pub(crate) fn tick(&mut self, mem: &mut Memory, queue: &mut PixelQueue) {
        if self.stage == FetchStage::Push {
            self.push(mem, queue);
            return;
        }

        self.stage_dots += 1;
        if self.stage_dots < STAGE_DOTS {
            return;
        }
        self.stage_dots = 0;

        let lcdc = Lcdc::from_bits_truncate(mem.read(LCDC, true));
        match self.stage {
            FetchStage::GetTile => {
                let addr = self.tile_map_address(mem, lcdc);
                self.tile = mem.read(addr, true);
                self.stage = FetchStage::GetTileDataLow;
            }
            FetchStage::GetTileDataLow => {
                let addr = self.tile_data_address(mem, lcdc);
                self.low = mem.read(addr, true);
                self.stage = FetchStage::GetTileDataHigh;
            }
            FetchStage::GetTileDataHigh => {
                let addr = self.tile_data_address(mem, lcdc);
                self.high = mem.read(addr + 1, true);
                self.stage = FetchStage::Push;
                self.push(mem, queue);
            }
            FetchStage::Push => {}
        }
    }

    fn tile_map_address(&self, mem: &mut Memory, lcdc: Lcdc) -> u16 {
        if self.fetching_window {
            let base = if lcdc.contains(Lcdc::WINDOW_TILE_MAP) {
                TILE_MAP_HIGH
            } else {
                TILE_MAP_LOW
            };
            tiles::tile_map_address(base, self.tile_column, self.window_line / 8)
        } else {
            let base = if lcdc.contains(Lcdc::BG_TILE_MAP) {
                TILE_MAP_HIGH
            } else {
                TILE_MAP_LOW
            };
            let column = (mem.read(SCX, true) / 8).wrapping_add(self.tile_column);
            let y = self.line.wrapping_add(mem.read(SCY, true));
            tiles::tile_map_address(base, column, y / 8)
        }
    }

    fn tile_data_address(&self, mem: &mut Memory, lcdc: Lcdc) -> u16 {
        let row = if self.fetching_window {
            self.window_line % 8
        } else {
            self.line.wrapping_add(mem.read(SCY, true)) % 8
        };
        tiles::bg_tile_row_address(lcdc, self.tile, row)
    }

    /// Stalls until the queue has drained, then emits the fetched tile.
    fn push(&mut self, mem: &mut Memory, queue: &mut PixelQueue) {
        if !queue.is_empty() {
            return;
        }

        let mut skip = 0;
        if !self.scroll_dropped && !self.fetching_window {
            skip = (mem.read(SCX, true) % 8) as usize;
        }
        self.scroll_dropped = true;

        for color in tiles::decode_row(self.low, self.high).into_iter().skip(skip) {
            queue.push(Pixel::background(color));
        }
        self.tile_column = (self.tile_column + 1) % 32;
        self.stage = FetchStage::GetTile;
    }
}
