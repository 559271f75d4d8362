//! Memory-mapped register addresses and the bit layouts the CPU and PPU
//! share through `Memory`.

use bitflags::bitflags;

pub const JOYP: u16 = 0xFF00;
pub const SB: u16 = 0xFF01;
pub const SC: u16 = 0xFF02;
pub const DIV: u16 = 0xFF04;
pub const TIMA: u16 = 0xFF05;
pub const TMA: u16 = 0xFF06;
pub const TAC: u16 = 0xFF07;
pub const IF: u16 = 0xFF0F;
pub const LCDC: u16 = 0xFF40;
pub const STAT: u16 = 0xFF41;
pub const SCY: u16 = 0xFF42;
pub const SCX: u16 = 0xFF43;
pub const LY: u16 = 0xFF44;
pub const LYC: u16 = 0xFF45;
pub const DMA: u16 = 0xFF46;
pub const BGP: u16 = 0xFF47;
pub const OBP0: u16 = 0xFF48;
pub const OBP1: u16 = 0xFF49;
pub const WY: u16 = 0xFF4A;
pub const WX: u16 = 0xFF4B;
pub const IE: u16 = 0xFFFF;

bitflags! {
    /// Interrupt request/enable bits (IF at 0xFF0F, IE at 0xFFFF).
    ///
    /// Bit order is also dispatch priority: VBlank is serviced first.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Interrupts: u8 {
        const VBLANK = 0x01;
        const LCD_STAT = 0x02;
        const TIMER = 0x04;
        const SERIAL = 0x08;
        const JOYPAD = 0x10;
    }
}

impl Interrupts {
    /// Jump target for a single interrupt source.
    pub fn vector(self) -> u16 {
        0x0040 + (self.bits().trailing_zeros() as u16) * 8
    }
}

bitflags! {
    /// LCD control register (LCDC, 0xFF40).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Lcdc: u8 {
        const BG_WINDOW_ENABLE = 0x01;
        const OBJ_ENABLE = 0x02;
        const OBJ_TALL = 0x04;
        const BG_TILE_MAP = 0x08;
        const TILE_DATA_UNSIGNED = 0x10;
        const WINDOW_ENABLE = 0x20;
        const WINDOW_TILE_MAP = 0x40;
        const DISPLAY_ENABLE = 0x80;
    }
}

bitflags! {
    /// Writable interrupt-source bits and the LYC flag of STAT (0xFF41).
    /// The mode lives in bits 0-1 and is handled through [`LcdMode`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Stat: u8 {
        const LYC_EQUAL = 0x04;
        const HBLANK_INTERRUPT = 0x08;
        const VBLANK_INTERRUPT = 0x10;
        const OAM_INTERRUPT = 0x20;
        const LYC_INTERRUPT = 0x40;
    }
}

/// PPU mode as reported in STAT bits 0-1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum LcdMode {
    HorizontalBlank = 0,
    VerticalBlank = 1,
    ObjectScan = 2,
    DrawPixels = 3,
}

impl LcdMode {
    /// STAT interrupt source that fires when this mode is entered, if any.
    pub fn interrupt_source(self) -> Option<Stat> {
        match self {
            LcdMode::HorizontalBlank => Some(Stat::HBLANK_INTERRUPT),
            LcdMode::VerticalBlank => Some(Stat::VBLANK_INTERRUPT),
            LcdMode::ObjectScan => Some(Stat::OAM_INTERRUPT),
            LcdMode::DrawPixels => None,
        }
    }
}
