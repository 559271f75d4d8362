//! A DMG Game Boy core that advances CPU and PPU one dot at a time.

pub mod cpu;
pub mod error;
pub mod machine;
pub mod ppu;
pub mod registers;

pub use error::{EmulationError, Result};
pub use machine::{Button, FramePacer, GameBoy, GameBoyConfig, Memory, PpuTiming, RomSource};
pub use ppu::Frame;

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
