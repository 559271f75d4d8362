mod mbc1;
mod mbc3;
mod rom_only;

pub(crate) use mbc1::Mbc1Cartridge;
pub(crate) use mbc3::Mbc3Cartridge;
pub(crate) use rom_only::RomOnlyCartridge;

use crate::error::{EmulationError, Result};

pub(crate) const ROM_BANK_SIZE: usize = 0x4000;
pub(crate) const RAM_BANK_SIZE: usize = 0x2000;

const CARTRIDGE_TYPE_OFFSET: usize = 0x147;
const RAM_SIZE_OFFSET: usize = 0x149;
const HEADER_END: usize = 0x150;

/// Cartridge bank controllers supported by the core.
pub(crate) enum Cartridge {
    RomOnly(RomOnlyCartridge),
    Mbc1(Mbc1Cartridge),
    Mbc3(Mbc3Cartridge),
}

impl Cartridge {
    /// Pick the bank controller named by the header and size its RAM.
    ///
    /// `save` is preloaded into external RAM when present; a missing save
    /// simply means the RAM starts zeroed.
    pub(crate) fn from_rom(rom: &[u8], save: Option<&[u8]>, allow_rom_writes: bool) -> Result<Self> {
        if rom.len() < HEADER_END {
            return Err(EmulationError::RomTooSmall { len: rom.len() });
        }

        let cartridge_type = rom[CARTRIDGE_TYPE_OFFSET];
        let ram_size = ram_size_from_header(rom[RAM_SIZE_OFFSET]);
        let battery = matches!(cartridge_type, 0x03 | 0x09 | 0x0F | 0x10 | 0x13);

        let mut cartridge = match cartridge_type {
            0x00 | 0x08 | 0x09 => {
                Cartridge::RomOnly(RomOnlyCartridge::new(rom, ram_size, battery, allow_rom_writes))
            }
            0x01..=0x03 => Cartridge::Mbc1(Mbc1Cartridge::new(rom, ram_size, battery)),
            0x0F..=0x13 => Cartridge::Mbc3(Mbc3Cartridge::new(rom, ram_size, battery)),
            other => {
                return Err(EmulationError::UnsupportedCartridge {
                    cartridge_type: other,
                })
            }
        };

        log::debug!(
            "GB cartridge: type=0x{:02X} rom={} bytes ram={} bytes battery={}",
            cartridge_type,
            rom.len(),
            ram_size,
            battery,
        );

        if let Some(save) = save {
            cartridge.load_ram(save);
        }
        Ok(cartridge)
    }

    pub(crate) fn read(&self, addr: u16) -> Result<u8> {
        match self {
            Cartridge::RomOnly(c) => c.read(addr),
            Cartridge::Mbc1(c) => c.read(addr),
            Cartridge::Mbc3(c) => c.read(addr),
        }
    }

    pub(crate) fn write(&mut self, addr: u16, value: u8) -> Result<()> {
        match self {
            Cartridge::RomOnly(c) => c.write(addr, value),
            Cartridge::Mbc1(c) => c.write(addr, value),
            Cartridge::Mbc3(c) => c.write(addr, value),
        }
    }

    pub(crate) fn has_battery(&self) -> bool {
        match self {
            Cartridge::RomOnly(c) => c.battery,
            Cartridge::Mbc1(c) => c.battery,
            Cartridge::Mbc3(c) => c.battery,
        }
    }

    /// Raw external RAM, all banks back to back.
    pub(crate) fn ram(&self) -> &[u8] {
        match self {
            Cartridge::RomOnly(c) => &c.ram,
            Cartridge::Mbc1(c) => &c.ram,
            Cartridge::Mbc3(c) => &c.ram,
        }
    }

    /// Overwrite external RAM with a saved snapshot. Extra bytes are
    /// dropped and a short snapshot leaves the tail untouched.
    pub(crate) fn load_ram(&mut self, data: &[u8]) {
        let ram = match self {
            Cartridge::RomOnly(c) => &mut c.ram,
            Cartridge::Mbc1(c) => &mut c.ram,
            Cartridge::Mbc3(c) => &mut c.ram,
        };
        let len = ram.len().min(data.len());
        ram[..len].copy_from_slice(&data[..len]);
    }

    pub(crate) fn set_allow_rom_writes(&mut self, allow: bool) {
        if let Cartridge::RomOnly(c) = self {
            c.allow_rom_writes = allow;
        }
    }
}

/// External RAM size for header byte 0x149.
///
/// Codes 0 and 1 still get a full 8 KiB bank so that addressing stays
/// uniform across cartridges.
pub(crate) fn ram_size_from_header(code: u8) -> usize {
    match code {
        0x00..=0x02 => RAM_BANK_SIZE,
        0x03 => 4 * RAM_BANK_SIZE,
        0x04 => 16 * RAM_BANK_SIZE,
        0x05 => 8 * RAM_BANK_SIZE,
        _ => RAM_BANK_SIZE,
    }
}

/// Fault for an address a bank controller does not decode.
pub(crate) fn unmapped(address: u16) -> EmulationError {
    EmulationError::AddressRouting { address, pc: 0 }
}
