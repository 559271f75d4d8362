mod cartridge;
mod config;
mod gameboy;
mod host;
mod joypad;
mod memory;
mod serial;

pub use config::{GameBoyConfig, PpuTiming};
pub use gameboy::GameBoy;
pub use host::{FramePacer, RomSource};
pub use joypad::Button;
pub use memory::Memory;

#[cfg(test)]
mod tests;
