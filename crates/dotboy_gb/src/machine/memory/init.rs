use super::Memory;
use crate::registers::{BGP, DIV, DMA, IF, LCDC, SC, STAT, TAC};

impl Memory {
    /// Initialize I/O registers to match the DMG power-on state after the
    /// boot ROM hands control to the cartridge.
    pub(super) fn apply_dmg_initial_io_state(&mut self) {
        let mut set = |addr: u16, value: u8| self.io[(addr - 0xFF00) as usize] = value;

        set(DIV, 0xAB);
        set(TAC, 0xF8);
        // VBlank is already requested at PC=0x0100.
        set(IF, 0x01);
        set(LCDC, 0x91);
        set(STAT, 0x85);
        set(DMA, 0xFF);
        set(BGP, 0xFC);
        // OBP0/OBP1 are officially uninitialised; we leave them at 0.

        self.serial.sc = 0x7E;
    }
}
