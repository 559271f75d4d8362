//! Dot-level picture processing unit.
//!
//! Each call to [`Ppu::tick`] advances one dot. A visible line is an 80-dot
//! OAM scan, a variable-length pixel transfer driven by the background
//! fetcher and two pixel queues, and a horizontal blank padding the line
//! out to 456 dots. Lines 144-153 are vertical blank; the finished frame is
//! handed out when line 153 ends.

mod fetcher;
mod fifo;
mod frame;
mod sprite;
mod tiles;

use std::mem;

use crate::machine::Memory;
use crate::registers::{Interrupts, LcdMode, Lcdc, Stat, LCDC, LY, LYC, STAT, WX, WY};
use crate::SCREEN_WIDTH;

use fetcher::Fetcher;
use fifo::{Pixel, PixelQueue};
use sprite::Sprite;

pub use frame::Frame;

pub const DOTS_PER_LINE: u32 = 456;
pub const LINES_PER_FRAME: u32 = 154;
pub const DOTS_PER_FRAME: u32 = DOTS_PER_LINE * LINES_PER_FRAME;

const OBJECT_SCAN_DOTS: u32 = 80;
const FIRST_VBLANK_LINE: u8 = 144;
const LAST_LINE: u8 = 153;
/// Dots an object fetch holds up the pipeline.
const SPRITE_FETCH_DOTS: u8 = 6;

/// Pixel transfer progress for the current line.
#[derive(Debug)]
struct DrawPixels {
    x: u8,
    /// Objects not yet fetched, in X order.
    sprites: Vec<Sprite>,
    /// Micro-dot of an object fetch in progress.
    sprite_fetch: Option<u8>,
}

impl DrawPixels {
    fn sprite_pending(&self) -> bool {
        self.sprites.first().is_some_and(|sprite| sprite.x <= self.x + 8)
    }
}

#[derive(Debug)]
enum Mode {
    ObjectScan { sprites: Vec<Sprite> },
    DrawPixels(DrawPixels),
    HorizontalBlank,
    VerticalBlank,
    Disabled,
}

pub struct Ppu {
    mode: Mode,
    /// Dot within the current line, 0-455.
    dot: u32,
    line: u8,
    rows: Vec<[u8; SCREEN_WIDTH]>,
    line_buffer: [u8; SCREEN_WIDTH],
    bg_queue: PixelQueue,
    obj_queue: PixelQueue,
    fetcher: Fetcher,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    /// Start at dot 0 of line 0 in OAM scan.
    pub fn new() -> Self {
        Self {
            mode: Mode::ObjectScan {
                sprites: Vec::new(),
            },
            dot: 0,
            line: 0,
            rows: Vec::with_capacity(crate::SCREEN_HEIGHT),
            line_buffer: [0; SCREEN_WIDTH],
            bg_queue: PixelQueue::new(),
            obj_queue: PixelQueue::new(),
            fetcher: Fetcher::default(),
        }
    }

    #[inline]
    pub fn line(&self) -> u8 {
        self.line
    }

    #[inline]
    pub fn dot(&self) -> u32 {
        self.dot
    }

    /// Current mode, or `None` while the LCD is off.
    pub fn mode(&self) -> Option<LcdMode> {
        match self.mode {
            Mode::ObjectScan { .. } => Some(LcdMode::ObjectScan),
            Mode::DrawPixels(_) => Some(LcdMode::DrawPixels),
            Mode::HorizontalBlank => Some(LcdMode::HorizontalBlank),
            Mode::VerticalBlank => Some(LcdMode::VerticalBlank),
            Mode::Disabled => None,
        }
    }

    /// Advance one dot. Returns the finished frame on the dot that ends
    /// line 153.
    pub fn tick(&mut self, mem: &mut Memory) -> Option<Frame> {
        let lcdc = Lcdc::from_bits_truncate(mem.read(LCDC, true));
        if !lcdc.contains(Lcdc::DISPLAY_ENABLE) {
            if !matches!(self.mode, Mode::Disabled) {
                self.disable(mem);
            }
            return None;
        }
        if matches!(self.mode, Mode::Disabled) {
            self.enable(mem);
        }

        let mut frame = None;
        self.mode = match mem::replace(&mut self.mode, Mode::Disabled) {
            Mode::ObjectScan { sprites } => self.object_scan(mem, lcdc, sprites),
            Mode::DrawPixels(state) => self.draw_pixels(mem, lcdc, state),
            Mode::HorizontalBlank => self.horizontal_blank(mem),
            Mode::VerticalBlank => {
                let (next, finished) = self.vertical_blank(mem);
                frame = finished;
                next
            }
            Mode::Disabled => Mode::Disabled,
        };
        frame
    }

    fn object_scan(&mut self, mem: &mut Memory, lcdc: Lcdc, sprites: Vec<Sprite>) -> Mode {
        let sprites = if self.dot == 0 {
            self.set_mode(mem, LcdMode::ObjectScan);
            mem.set_oam_locked(true);
            sprite::scan_line(mem, self.line, lcdc.contains(Lcdc::OBJ_TALL))
        } else {
            sprites
        };

        self.dot += 1;
        if self.dot < OBJECT_SCAN_DOTS {
            return Mode::ObjectScan { sprites };
        }

        self.bg_queue.clear();
        self.obj_queue.clear();
        self.fetcher.start_line(self.line);
        mem.set_vram_locked(true);
        self.set_mode(mem, LcdMode::DrawPixels);
        Mode::DrawPixels(DrawPixels {
            x: 0,
            sprites,
            sprite_fetch: None,
        })
    }

    fn draw_pixels(&mut self, mem: &mut Memory, lcdc: Lcdc, mut state: DrawPixels) -> Mode {
        self.dot += 1;

        if !self.fetcher.fetching_window()
            && lcdc.contains(Lcdc::WINDOW_ENABLE)
            && self.line >= mem.read(WY, true)
            && state.x + 7 >= mem.read(WX, true)
        {
            self.fetcher.start_window();
            self.bg_queue.clear();
        }

        if lcdc.contains(Lcdc::OBJ_ENABLE) && (state.sprite_fetch.is_some() || state.sprite_pending()) {
            self.fetch_sprites(mem, lcdc, &mut state);
            return Mode::DrawPixels(state);
        }

        self.fetcher.tick(mem, &mut self.bg_queue);
        let Some(bg) = self.bg_queue.pop() else {
            return Mode::DrawPixels(state);
        };
        let obj = self.obj_queue.pop().unwrap_or(Pixel::TRANSPARENT);

        let pixel = mix(lcdc, bg, obj);
        let palette = mem.read(pixel.palette.register(), true);
        self.line_buffer[state.x as usize] = pixel.shade(palette);
        state.x += 1;

        if state.x as usize == SCREEN_WIDTH {
            self.set_mode(mem, LcdMode::HorizontalBlank);
            mem.set_vram_locked(false);
            mem.set_oam_locked(false);
            self.rows.push(self.line_buffer);
            return Mode::HorizontalBlank;
        }
        Mode::DrawPixels(state)
    }

    /// Object fetch: wait for the background fetcher to reach a tile
    /// boundary with pixels queued, let it run two more dots, then on the
    /// sixth dot merge every object starting at this column.
    fn fetch_sprites(&mut self, mem: &mut Memory, lcdc: Lcdc, state: &mut DrawPixels) {
        let micro_dot = match state.sprite_fetch {
            Some(dot) => dot + 1,
            None if self.fetcher.is_idle() && !self.bg_queue.is_empty() => 1,
            None => {
                self.fetcher.tick(mem, &mut self.bg_queue);
                return;
            }
        };

        if micro_dot <= 2 {
            self.fetcher.tick(mem, &mut self.bg_queue);
        }
        if micro_dot < SPRITE_FETCH_DOTS {
            state.sprite_fetch = Some(micro_dot);
            return;
        }

        state.sprite_fetch = None;
        let height = if lcdc.contains(Lcdc::OBJ_TALL) { 16 } else { 8 };
        while state.sprite_pending() {
            let sprite = state.sprites.remove(0);
            let skip = (state.x + 8 - sprite.x) as usize;
            let pixels = sprite.pixels(mem, self.line, height);
            self.obj_queue.merge_objects(pixels.into_iter().skip(skip));
        }
    }

    fn horizontal_blank(&mut self, mem: &mut Memory) -> Mode {
        self.dot += 1;
        if self.dot < DOTS_PER_LINE {
            return Mode::HorizontalBlank;
        }

        self.dot = 0;
        self.line += 1;
        self.update_ly(mem);
        if self.line == FIRST_VBLANK_LINE {
            Mode::VerticalBlank
        } else {
            Mode::ObjectScan {
                sprites: Vec::new(),
            }
        }
    }

    fn vertical_blank(&mut self, mem: &mut Memory) -> (Mode, Option<Frame>) {
        if self.dot == 0 {
            self.set_mode(mem, LcdMode::VerticalBlank);
            if self.line == FIRST_VBLANK_LINE {
                mem.request_interrupt(Interrupts::VBLANK);
            }
        }

        self.dot += 1;
        if self.dot < DOTS_PER_LINE {
            return (Mode::VerticalBlank, None);
        }

        self.dot = 0;
        if self.line < LAST_LINE {
            self.line += 1;
            self.update_ly(mem);
            return (Mode::VerticalBlank, None);
        }

        let frame = Frame::from_rows(mem::take(&mut self.rows));
        self.line = 0;
        self.fetcher.start_frame();
        self.update_ly(mem);
        (
            Mode::ObjectScan {
                sprites: Vec::new(),
            },
            Some(frame),
        )
    }

    fn disable(&mut self, mem: &mut Memory) {
        log::debug!("GB PPU: LCD off at LY={} dot={}", self.line, self.dot);
        self.mode = Mode::Disabled;
        self.line = 0;
        self.dot = 0;
        let stat = mem.read(STAT, true);
        mem.write(STAT, stat & !0x03, true);
        mem.write(LY, 0, true);
        mem.set_vram_locked(false);
        mem.set_oam_locked(false);
    }

    fn enable(&mut self, mem: &mut Memory) {
        log::debug!("GB PPU: LCD on");
        self.line = 0;
        self.dot = 0;
        self.rows.clear();
        self.fetcher.start_frame();
        self.mode = Mode::ObjectScan {
            sprites: Vec::new(),
        };
        self.update_ly(mem);
    }

    /// Write the mode into STAT and raise the STAT interrupt if the
    /// matching source is enabled.
    fn set_mode(&mut self, mem: &mut Memory, mode: LcdMode) {
        let stat = mem.read(STAT, true);
        mem.write(STAT, (stat & !0x03) | mode as u8, true);
        if let Some(source) = mode.interrupt_source() {
            if Stat::from_bits_truncate(stat).contains(source) {
                mem.request_interrupt(Interrupts::LCD_STAT);
            }
        }
    }

    fn update_ly(&mut self, mem: &mut Memory) {
        mem.write(LY, self.line, true);
        let stat = mem.read(STAT, true);
        if self.line == mem.read(LYC, true) {
            mem.write(STAT, stat | Stat::LYC_EQUAL.bits(), true);
            if Stat::from_bits_truncate(stat).contains(Stat::LYC_INTERRUPT) {
                mem.request_interrupt(Interrupts::LCD_STAT);
            }
        } else {
            mem.write(STAT, stat & !Stat::LYC_EQUAL.bits(), true);
        }
    }
}

/// Pick the visible pixel. The object wins only when objects are on, its
/// colour is opaque and it is not hidden behind a non-zero background.
/// With LCDC bit 0 clear the background counts as colour 0.
fn mix(lcdc: Lcdc, bg: Pixel, obj: Pixel) -> Pixel {
    let bg = if lcdc.contains(Lcdc::BG_WINDOW_ENABLE) {
        bg
    } else {
        Pixel::background(0)
    };
    if lcdc.contains(Lcdc::OBJ_ENABLE) && obj.color != 0 && (!obj.bg_priority || bg.color == 0) {
        obj
    } else {
        bg
    }
}

#[cfg(test)]
mod tests;
