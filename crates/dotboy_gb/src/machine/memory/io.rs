use super::Memory;
use crate::registers::{Interrupts, DIV, DMA, IF, JOYP, LY, SB, SC, STAT};

impl Memory {
    pub(super) fn io_read(&self, addr: u16) -> u8 {
        match addr {
            JOYP => self.joypad.register(self.joypad_select),
            SB => self.serial.sb,
            SC => self.serial.sc,
            // Only the low five bits exist; the rest read as 1.
            IF => self.io[Self::io_index(IF)] | 0xE0,
            _ => self.io[Self::io_index(addr)],
        }
    }

    pub(super) fn io_write(&mut self, addr: u16, value: u8, from_ppu: bool) {
        match addr {
            JOYP => self.joypad_select = value & 0x30,
            SB => self.serial.write_sb(value),
            SC => {
                if self.serial.write_sc(value) {
                    self.request_interrupt(Interrupts::SERIAL);
                }
            }
            DIV => {
                // Any write clears DIV and the CPU's hidden counters.
                self.io[Self::io_index(DIV)] = 0;
                self.divider_reset = true;
            }
            IF => self.io[Self::io_index(IF)] = value & 0x1F,
            DMA => self.oam_dma(value),
            STAT if !from_ppu => {
                // Mode and LYC flag bits belong to the PPU.
                let current = self.io[Self::io_index(STAT)];
                self.io[Self::io_index(STAT)] = (current & 0x87) | (value & 0x78);
            }
            LY if !from_ppu => {}
            _ => self.io[Self::io_index(addr)] = value,
        }
    }

    pub(super) fn increment_div_register(&mut self) {
        let index = Self::io_index(DIV);
        self.io[index] = self.io[index].wrapping_add(1);
    }

    #[inline]
    fn io_index(addr: u16) -> usize {
        (addr - 0xFF00) as usize
    }
}
