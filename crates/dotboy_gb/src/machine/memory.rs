use std::mem;

use super::cartridge::Cartridge;
use super::joypad::{Button, Joypad};
use super::serial::Serial;
use crate::cpu::Bus;
use crate::error::{EmulationError, Result};
use crate::registers::{Interrupts, IF};

mod dma;
mod init;
mod io;

const VRAM_SIZE: usize = 0x2000;
const WRAM_SIZE: usize = 0x2000;
const OAM_SIZE: usize = 0xA0;
const IO_SIZE: usize = 0x80;
const HRAM_SIZE: usize = 0x7F;

/// The DMG address space.
///
/// Fixed regions (VRAM, WRAM, OAM, I/O, HRAM, IE) live here; the ROM and
/// external RAM windows are forwarded to the cartridge's bank controller.
/// Every access states whether it comes from the PPU: while the PPU holds
/// the VRAM or OAM lock, other readers see open bus (0xFF) and their
/// writes are dropped.
pub struct Memory {
    vram: [u8; VRAM_SIZE],
    wram: [u8; WRAM_SIZE],
    oam: [u8; OAM_SIZE],
    io: [u8; IO_SIZE],
    hram: [u8; HRAM_SIZE],
    ie: u8,
    vram_locked: bool,
    oam_locked: bool,
    cartridge: Cartridge,
    joypad: Joypad,
    /// P1 selection bits (5: actions, 4: directions); 0 selects.
    joypad_select: u8,
    serial: Serial,
    /// Set by a write to DIV; the CPU consumes it to clear its internal
    /// divider and timer counters.
    divider_reset: bool,
    /// First bank-controller fault since the CPU last checked.
    fault: Option<EmulationError>,
}

impl Memory {
    /// Build the address space around a cartridge image.
    pub fn from_rom(rom: &[u8], save: Option<&[u8]>, allow_rom_writes: bool) -> Result<Self> {
        let cartridge = Cartridge::from_rom(rom, save, allow_rom_writes)?;
        Ok(Self::with_cartridge(cartridge))
    }

    pub(crate) fn with_cartridge(cartridge: Cartridge) -> Self {
        let mut memory = Self {
            vram: [0; VRAM_SIZE],
            wram: [0; WRAM_SIZE],
            oam: [0; OAM_SIZE],
            io: [0; IO_SIZE],
            hram: [0; HRAM_SIZE],
            ie: 0,
            vram_locked: false,
            oam_locked: false,
            cartridge,
            joypad: Joypad::default(),
            joypad_select: 0x30,
            serial: Serial::default(),
            divider_reset: false,
            fault: None,
        };
        memory.apply_dmg_initial_io_state();
        memory
    }

    pub fn read(&mut self, addr: u16, from_ppu: bool) -> u8 {
        match addr >> 13 {
            // Cartridge ROM (0x0000-0x7FFF) and external RAM (0xA000-0xBFFF).
            0..=3 | 5 => self.cartridge_read(addr),
            // VRAM.
            4 => {
                if self.vram_locked && !from_ppu {
                    0xFF
                } else {
                    self.vram[(addr & 0x1FFF) as usize]
                }
            }
            // Work RAM.
            6 => self.wram[(addr & 0x1FFF) as usize],
            _ => self.read_high(addr, from_ppu),
        }
    }

    pub fn write(&mut self, addr: u16, value: u8, from_ppu: bool) {
        match addr >> 13 {
            0..=3 | 5 => self.cartridge_write(addr, value),
            4 => {
                if !self.vram_locked || from_ppu {
                    self.vram[(addr & 0x1FFF) as usize] = value;
                }
            }
            6 => self.wram[(addr & 0x1FFF) as usize] = value,
            _ => self.write_high(addr, value, from_ppu),
        }
    }

    /// 0xE000-0xFFFF: echo RAM, OAM, the unusable gap, I/O, HRAM and IE.
    fn read_high(&mut self, addr: u16, from_ppu: bool) -> u8 {
        match addr {
            0xE000..=0xFDFF => self.wram[(addr - 0xE000) as usize],
            0xFE00..=0xFE9F => {
                if self.oam_locked && !from_ppu {
                    0xFF
                } else {
                    self.oam[(addr - 0xFE00) as usize]
                }
            }
            0xFEA0..=0xFEFF => 0xFF,
            0xFF00..=0xFF7F => self.io_read(addr),
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize],
            0xFFFF => self.ie,
            _ => {
                self.latch_fault(EmulationError::AddressRouting { address: addr, pc: 0 });
                0xFF
            }
        }
    }

    fn write_high(&mut self, addr: u16, value: u8, from_ppu: bool) {
        match addr {
            0xE000..=0xFDFF => self.wram[(addr - 0xE000) as usize] = value,
            0xFE00..=0xFE9F => {
                if !self.oam_locked || from_ppu {
                    self.oam[(addr - 0xFE00) as usize] = value;
                }
            }
            0xFEA0..=0xFEFF => {}
            0xFF00..=0xFF7F => self.io_write(addr, value, from_ppu),
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize] = value,
            0xFFFF => self.ie = value,
            _ => self.latch_fault(EmulationError::AddressRouting { address: addr, pc: 0 }),
        }
    }

    fn cartridge_read(&mut self, addr: u16) -> u8 {
        match self.cartridge.read(addr) {
            Ok(value) => value,
            Err(err) => {
                self.latch_fault(err);
                0xFF
            }
        }
    }

    fn cartridge_write(&mut self, addr: u16, value: u8) {
        if let Err(err) = self.cartridge.write(addr, value) {
            self.latch_fault(err);
        }
    }

    fn latch_fault(&mut self, err: EmulationError) {
        if self.fault.is_none() {
            self.fault = Some(err);
        }
    }

    pub fn request_interrupt(&mut self, interrupt: Interrupts) {
        let pending = self.io_read(IF) | interrupt.bits();
        self.io_write(IF, pending, true);
    }

    pub fn set_vram_locked(&mut self, locked: bool) {
        self.vram_locked = locked;
    }

    pub fn set_oam_locked(&mut self, locked: bool) {
        self.oam_locked = locked;
    }

    pub fn vram_locked(&self) -> bool {
        self.vram_locked
    }

    pub fn oam_locked(&self) -> bool {
        self.oam_locked
    }

    /// Allow or forbid writes into the ROM image of a cartridge without a
    /// bank controller. Only meant for test fixtures.
    pub fn set_allow_rom_writes(&mut self, allow: bool) {
        self.cartridge.set_allow_rom_writes(allow);
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        if self.joypad.set_button(button, pressed) {
            self.request_interrupt(Interrupts::JOYPAD);
        }
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.joypad.is_pressed(button)
    }

    /// Bytes captured from the serial port so far.
    pub fn serial_output(&self) -> &[u8] {
        &self.serial.output
    }

    pub fn take_serial_output(&mut self) -> Vec<u8> {
        mem::take(&mut self.serial.output)
    }

    pub fn has_battery(&self) -> bool {
        self.cartridge.has_battery()
    }

    /// Raw external RAM for save persistence.
    pub fn cartridge_ram(&self) -> &[u8] {
        self.cartridge.ram()
    }
}

impl Bus for Memory {
    fn read8(&mut self, addr: u16) -> u8 {
        self.read(addr, false)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write(addr, value, false)
    }

    fn increment_divider(&mut self) {
        self.increment_div_register();
    }

    fn take_divider_reset(&mut self) -> bool {
        mem::take(&mut self.divider_reset)
    }

    fn take_fault(&mut self) -> Option<EmulationError> {
        self.fault.take()
    }
}
