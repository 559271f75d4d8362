use super::{unmapped, RAM_BANK_SIZE, ROM_BANK_SIZE};
use crate::error::Result;

/// MBC3 cartridge state.
///
/// ROM and RAM banking as described in Pandocs. The RTC register range
/// (selects 0x08-0x0C) is decoded but not backed by a clock: while one is
/// selected, reads return 0xFF and writes are dropped.
pub(crate) struct Mbc3Cartridge {
    rom: Vec<u8>,
    pub(super) ram: Vec<u8>,
    pub(super) battery: bool,
    num_rom_banks: usize,
    num_ram_banks: usize,
    rom_bank: u8,
    ram_bank: u8,
    rtc_selected: bool,
    ram_enable: bool,
}

impl Mbc3Cartridge {
    pub(super) fn new(rom: &[u8], ram_size: usize, battery: bool) -> Self {
        Self {
            rom: rom.to_vec(),
            ram: vec![0; ram_size],
            battery,
            num_rom_banks: (rom.len() / ROM_BANK_SIZE).max(1),
            num_ram_banks: (ram_size / RAM_BANK_SIZE).clamp(1, 4),
            rom_bank: 1,
            ram_bank: 0,
            rtc_selected: false,
            ram_enable: false,
        }
    }

    fn ram_offset(&self, addr: u16) -> usize {
        self.ram_bank as usize * RAM_BANK_SIZE + (addr - 0xA000) as usize
    }

    pub(super) fn read(&self, addr: u16) -> Result<u8> {
        let value = match addr {
            0x0000..=0x3FFF => self.rom.get(addr as usize).copied().unwrap_or(0xFF),
            0x4000..=0x7FFF => {
                let bank = self.rom_bank as usize % self.num_rom_banks;
                let index = bank * ROM_BANK_SIZE + (addr - 0x4000) as usize;
                self.rom.get(index).copied().unwrap_or(0xFF)
            }
            0xA000..=0xBFFF => {
                if !self.ram_enable || self.rtc_selected {
                    return Ok(0xFF);
                }
                self.ram.get(self.ram_offset(addr)).copied().unwrap_or(0xFF)
            }
            _ => return Err(unmapped(addr)),
        };
        Ok(value)
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) -> Result<()> {
        match addr {
            0x0000..=0x1FFF => {
                // RAM / RTC enable.
                self.ram_enable = (value & 0x0F) == 0x0A;
            }
            0x2000..=0x3FFF => {
                // 7-bit ROM bank number; 0 is remapped to 1.
                self.rom_bank = value & 0x7F;
                if self.rom_bank == 0 {
                    self.rom_bank = 1;
                }
            }
            0x4000..=0x5FFF => match value {
                0x00..=0x03 if (value as usize) < self.num_ram_banks => {
                    self.ram_bank = value;
                    self.rtc_selected = false;
                }
                0x08..=0x0C => self.rtc_selected = true,
                _ => log::trace!("GB MBC3: ignoring RAM/RTC select 0x{:02X}", value),
            },
            0x6000..=0x7FFF => {
                // Clock latch; there is no clock to latch.
            }
            0xA000..=0xBFFF => {
                if self.ram_enable && !self.rtc_selected {
                    let offset = self.ram_offset(addr);
                    if let Some(slot) = self.ram.get_mut(offset) {
                        *slot = value;
                    }
                }
            }
            _ => return Err(unmapped(addr)),
        }
        Ok(())
    }
}
