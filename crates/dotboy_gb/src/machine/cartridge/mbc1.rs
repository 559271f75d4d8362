use super::{unmapped, RAM_BANK_SIZE, ROM_BANK_SIZE};
use crate::error::Result;

/// MBC1 cartridge state.
///
/// ROM banking uses the 5-bit bank register plus a 2-bit secondary
/// register. The banking mode decides what the secondary register feeds:
/// mode 0 routes it into ROM bank bits 5-6 and pins RAM to bank 0, mode 1
/// uses it as the RAM bank number.
pub(crate) struct Mbc1Cartridge {
    rom: Vec<u8>,
    pub(super) ram: Vec<u8>,
    pub(super) battery: bool,
    num_rom_banks: usize,
    num_ram_banks: usize,
    rom_bank_low5: u8,
    bank_high2: u8,
    /// Last value of `bank_high2` that named an installed RAM bank.
    ram_bank: u8,
    ram_enable: bool,
    ram_banking_mode: bool,
}

impl Mbc1Cartridge {
    pub(super) fn new(rom: &[u8], ram_size: usize, battery: bool) -> Self {
        Self {
            rom: rom.to_vec(),
            ram: vec![0; ram_size],
            battery,
            num_rom_banks: (rom.len() / ROM_BANK_SIZE).max(1),
            num_ram_banks: (ram_size / RAM_BANK_SIZE).max(1),
            rom_bank_low5: 1,
            bank_high2: 0,
            ram_bank: 0,
            ram_enable: false,
            ram_banking_mode: false,
        }
    }

    /// Bank mapped into 0x4000-0x7FFF.
    fn switchable_rom_bank(&self) -> usize {
        let mut bank = self.rom_bank_low5 as usize;
        if !self.ram_banking_mode {
            bank |= (self.bank_high2 as usize) << 5;
        }
        bank % self.num_rom_banks
    }

    fn ram_offset(&self, addr: u16) -> usize {
        let bank = if self.ram_banking_mode {
            self.ram_bank as usize
        } else {
            0
        };
        bank * RAM_BANK_SIZE + (addr - 0xA000) as usize
    }

    pub(super) fn read(&self, addr: u16) -> Result<u8> {
        let value = match addr {
            0x0000..=0x3FFF => self.rom.get(addr as usize).copied().unwrap_or(0xFF),
            0x4000..=0x7FFF => {
                let index = self.switchable_rom_bank() * ROM_BANK_SIZE + (addr - 0x4000) as usize;
                self.rom.get(index).copied().unwrap_or(0xFF)
            }
            0xA000..=0xBFFF => {
                if !self.ram_enable {
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
                // RAM enable: lower 4 bits must be 0x0A.
                self.ram_enable = (value & 0x0F) == 0x0A;
            }
            0x2000..=0x3FFF => {
                self.rom_bank_low5 = value & 0x1F;
                if self.rom_bank_low5 == 0 {
                    self.rom_bank_low5 = 1;
                }
            }
            0x4000..=0x5FFF => {
                self.bank_high2 = value & 0x03;
                if (self.bank_high2 as usize) < self.num_ram_banks {
                    self.ram_bank = self.bank_high2;
                } else {
                    log::trace!(
                        "GB MBC1: RAM bank {} not installed (cartridge has {})",
                        self.bank_high2,
                        self.num_ram_banks
                    );
                }
            }
            0x6000..=0x7FFF => {
                self.ram_banking_mode = (value & 0x01) != 0;
            }
            0xA000..=0xBFFF => {
                if self.ram_enable {
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
