use super::unmapped;
use crate::error::Result;

const ROM_SIZE: usize = 0x8000;

/// Cartridge without a bank controller: a fixed 32 KiB ROM image and at
/// most one fixed RAM bank.
pub(crate) struct RomOnlyCartridge {
    rom: Vec<u8>,
    pub(super) ram: Vec<u8>,
    pub(super) battery: bool,
    /// Lets test fixtures patch ROM bytes in place.
    pub(super) allow_rom_writes: bool,
}

impl RomOnlyCartridge {
    pub(super) fn new(rom: &[u8], ram_size: usize, battery: bool, allow_rom_writes: bool) -> Self {
        let mut image = rom.to_vec();
        image.resize(ROM_SIZE.max(rom.len()), 0xFF);
        Self {
            rom: image,
            ram: vec![0; ram_size],
            battery,
            allow_rom_writes,
        }
    }

    pub(super) fn read(&self, addr: u16) -> Result<u8> {
        match addr {
            0x0000..=0x7FFF => Ok(self.rom[addr as usize]),
            0xA000..=0xBFFF => {
                let offset = (addr - 0xA000) as usize;
                Ok(self.ram.get(offset).copied().unwrap_or(0xFF))
            }
            _ => Err(unmapped(addr)),
        }
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) -> Result<()> {
        match addr {
            0x0000..=0x7FFF => {
                if self.allow_rom_writes {
                    self.rom[addr as usize] = value;
                }
            }
            0xA000..=0xBFFF => {
                let offset = (addr - 0xA000) as usize;
                if let Some(slot) = self.ram.get_mut(offset) {
                    *slot = value;
                }
            }
            _ => return Err(unmapped(addr)),
        }
        Ok(())
    }
}
