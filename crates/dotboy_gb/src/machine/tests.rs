use super::cartridge::{Cartridge, ROM_BANK_SIZE};
use super::{Button, Memory};
use crate::cpu::Bus;
use crate::error::EmulationError;
use crate::registers::{DIV, DMA, IF, JOYP, LY, SB, SC, STAT};

/// ROM image whose every bank starts with its own bank number.
fn banked_rom(cartridge_type: u8, ram_code: u8, banks: usize) -> Vec<u8> {
    let mut rom = vec![0u8; banks * ROM_BANK_SIZE];
    for bank in 0..banks {
        rom[bank * ROM_BANK_SIZE] = bank as u8;
    }
    rom[0x147] = cartridge_type;
    rom[0x149] = ram_code;
    rom
}

fn memory_for(rom: &[u8]) -> Memory {
    Memory::from_rom(rom, None, false).expect("supported cartridge")
}

#[test]
fn mbc1_bank_zero_selects_bank_one() {
    let mut mem = memory_for(&banked_rom(0x01, 0x00, 8));

    mem.write(0x2000, 0x00, false);
    let bank_zero_view = mem.read(0x4000, false);
    mem.write(0x2000, 0x01, false);
    assert_eq!(bank_zero_view, mem.read(0x4000, false));
    assert_eq!(bank_zero_view, 1);

    mem.write(0x2000, 0x05, false);
    assert_eq!(mem.read(0x4000, false), 5);
    assert_eq!(mem.read(0x0000, false), 0);
}

#[test]
fn mbc1_secondary_register_feeds_upper_rom_bits_in_mode_zero() {
    let mut mem = memory_for(&banked_rom(0x01, 0x00, 64));

    mem.write(0x2000, 0x01, false);
    mem.write(0x4000, 0x01, false);
    assert_eq!(mem.read(0x4000, false), 0x21);

    mem.write(0x6000, 0x01, false);
    assert_eq!(mem.read(0x4000, false), 0x01);
}

#[test]
fn mbc1_secondary_register_is_shared_between_modes() {
    let mut mem = memory_for(&banked_rom(0x03, 0x03, 64));
    mem.write(0x0000, 0x0A, false);

    // Written as a RAM bank, read back as ROM bits 5-6.
    mem.write(0x6000, 0x01, false);
    mem.write(0x4000, 0x01, false);
    mem.write(0xA000, 0x77, false);
    mem.write(0x6000, 0x00, false);
    mem.write(0x2000, 0x01, false);
    assert_eq!(mem.read(0x4000, false), 0x21);

    // Mode 0 pins RAM to bank 0.
    assert_eq!(mem.read(0xA000, false), 0x00);
    mem.write(0x6000, 0x01, false);
    assert_eq!(mem.read(0xA000, false), 0x77);
    assert_eq!(mem.read(0x4000, false), 0x01);
}

#[test]
fn mbc1_ram_requires_enable_sentinel() {
    let mut mem = memory_for(&banked_rom(0x03, 0x02, 4));

    mem.write(0x0000, 0x0A, false);
    assert_eq!(mem.read(0xA000, false), 0x00);
    mem.write(0xA000, 0x42, false);
    assert_eq!(mem.read(0xA000, false), 0x42);

    mem.write(0x0000, 0x00, false);
    assert_eq!(mem.read(0xA000, false), 0xFF);
    mem.write(0xA001, 0x99, false);

    mem.write(0x0000, 0x1A, false);
    assert_eq!(mem.read(0xA000, false), 0x42);
    assert_eq!(mem.read(0xA001, false), 0x00);
}

#[test]
fn mbc1_ignores_ram_banks_the_cartridge_does_not_have() {
    // One 8 KiB bank: selecting bank 2 keeps bank 0.
    let mut mem = memory_for(&banked_rom(0x03, 0x02, 4));
    mem.write(0x0000, 0x0A, false);
    mem.write(0x6000, 0x01, false);
    mem.write(0xA000, 0x11, false);
    mem.write(0x4000, 0x02, false);
    assert_eq!(mem.read(0xA000, false), 0x11);

    // Four banks: each selection sees its own RAM.
    let mut mem = memory_for(&banked_rom(0x03, 0x03, 4));
    mem.write(0x0000, 0x0A, false);
    mem.write(0x6000, 0x01, false);
    mem.write(0x4000, 0x01, false);
    mem.write(0xA000, 0x22, false);
    mem.write(0x4000, 0x00, false);
    assert_eq!(mem.read(0xA000, false), 0x00);
    mem.write(0x4000, 0x03, false);
    mem.write(0xA000, 0x33, false);
    mem.write(0x4000, 0x01, false);
    assert_eq!(mem.read(0xA000, false), 0x22);
}

#[test]
fn mbc3_uses_seven_bit_rom_bank() {
    let mut mem = memory_for(&banked_rom(0x11, 0x00, 128));

    mem.write(0x2000, 0x45, false);
    assert_eq!(mem.read(0x4000, false), 0x45);
    mem.write(0x2000, 0x00, false);
    assert_eq!(mem.read(0x4000, false), 0x01);
    mem.write(0x2000, 0xFF, false);
    assert_eq!(mem.read(0x4000, false), 0x7F);
}

#[test]
fn mbc3_rtc_selection_reads_open_bus() {
    let mut mem = memory_for(&banked_rom(0x13, 0x03, 4));
    mem.write(0x0000, 0x0A, false);
    mem.write(0xA000, 0x5A, false);

    mem.write(0x4000, 0x08, false);
    assert_eq!(mem.read(0xA000, false), 0xFF);
    mem.write(0xA000, 0x00, false);

    mem.write(0x4000, 0x00, false);
    assert_eq!(mem.read(0xA000, false), 0x5A);
    assert!(mem.has_battery());
}

#[test]
fn rom_only_cartridge_drops_rom_writes_unless_bypassed() {
    let mut rom = banked_rom(0x00, 0x00, 2);
    rom[0x1234] = 0x77;
    let mut mem = memory_for(&rom);

    mem.write(0x1234, 0x00, false);
    assert_eq!(mem.read(0x1234, false), 0x77);

    // Header RAM size 0 still maps one fixed 8 KiB bank.
    mem.write(0xBFFF, 0x12, false);
    assert_eq!(mem.read(0xBFFF, false), 0x12);
    assert_eq!(mem.cartridge_ram().len(), 0x2000);

    mem.set_allow_rom_writes(true);
    mem.write(0x1234, 0x00, false);
    assert_eq!(mem.read(0x1234, false), 0x00);
}

#[test]
fn unknown_cartridge_types_and_short_roms_are_rejected() {
    let rom = banked_rom(0x19, 0x00, 2);
    assert_eq!(
        Memory::from_rom(&rom, None, false).err(),
        Some(EmulationError::UnsupportedCartridge {
            cartridge_type: 0x19
        })
    );
    assert_eq!(
        Memory::from_rom(&[0u8; 0x100], None, false).err(),
        Some(EmulationError::RomTooSmall { len: 0x100 })
    );
}

#[test]
fn bank_controller_rejects_addresses_outside_its_windows() {
    let rom = banked_rom(0x01, 0x00, 4);
    let mut cartridge = Cartridge::from_rom(&rom, None, false).expect("mbc1");
    assert_eq!(
        cartridge.read(0xC000),
        Err(EmulationError::AddressRouting {
            address: 0xC000,
            pc: 0
        })
    );
    assert!(cartridge.write(0x8000, 0).is_err());
}

#[test]
fn save_snapshot_is_preloaded() {
    let rom = banked_rom(0x03, 0x02, 4);
    let save = [0xDE, 0xAD];
    let mut mem = Memory::from_rom(&rom, Some(&save), false).expect("mbc1");
    mem.write(0x0000, 0x0A, false);
    assert_eq!(mem.read(0xA000, false), 0xDE);
    assert_eq!(mem.read(0xA001, false), 0xAD);
    assert_eq!(mem.read(0xA002, false), 0x00);
}

#[test]
fn oam_dma_copies_160_bytes_from_page() {
    let mut mem = memory_for(&banked_rom(0x00, 0x00, 2));
    for i in 0..0xA0u16 {
        mem.write(0xC100 + i, (i as u8).wrapping_mul(3), false);
    }

    mem.write(DMA, 0xC1, false);
    for i in 0..0xA0u16 {
        assert_eq!(mem.read(0xFE00 + i, false), mem.read(0xC100 + i, false));
    }
    assert_eq!(mem.read(DMA, false), 0xC1);
}

#[test]
fn divider_write_clears_register_and_requests_counter_reset() {
    let mut mem = memory_for(&banked_rom(0x00, 0x00, 2));
    for _ in 0..10 {
        mem.increment_divider();
    }
    assert_ne!(mem.read(DIV, false), 0);
    assert!(!mem.take_divider_reset());

    mem.write(DIV, 0x55, false);
    assert_eq!(mem.read(DIV, false), 0);
    assert!(mem.take_divider_reset());
    assert!(!mem.take_divider_reset());
}

#[test]
fn vram_and_oam_locks_only_bind_non_ppu_access() {
    let mut mem = memory_for(&banked_rom(0x00, 0x00, 2));
    mem.write(0x8000, 0x12, false);
    mem.write(0xFE00, 0x34, false);

    mem.set_vram_locked(true);
    mem.set_oam_locked(true);
    assert_eq!(mem.read(0x8000, false), 0xFF);
    assert_eq!(mem.read(0xFE00, false), 0xFF);
    mem.write(0x8000, 0x00, false);
    mem.write(0xFE00, 0x00, false);
    assert_eq!(mem.read(0x8000, true), 0x12);
    assert_eq!(mem.read(0xFE00, true), 0x34);

    mem.write(0x8000, 0x56, true);
    mem.set_vram_locked(false);
    mem.set_oam_locked(false);
    assert_eq!(mem.read(0x8000, false), 0x56);
    assert_eq!(mem.read(0xFE00, false), 0x34);
}

#[test]
fn echo_ram_and_unusable_region() {
    let mut mem = memory_for(&banked_rom(0x00, 0x00, 2));
    mem.write(0xC010, 0xAB, false);
    assert_eq!(mem.read(0xE010, false), 0xAB);
    mem.write(0xFDFF, 0xCD, false);
    assert_eq!(mem.read(0xDDFF, false), 0xCD);

    mem.write(0xFEA0, 0x11, false);
    assert_eq!(mem.read(0xFEA0, false), 0xFF);
}

#[test]
fn cpu_cannot_write_ly_or_stat_mode_bits() {
    let mut mem = memory_for(&banked_rom(0x00, 0x00, 2));
    mem.write(LY, 0x40, true);
    mem.write(LY, 0x10, false);
    assert_eq!(mem.read(LY, false), 0x40);

    mem.write(STAT, 0x02, true);
    mem.write(STAT, 0xFF, false);
    assert_eq!(mem.read(STAT, false), 0x7A);
}

#[test]
fn interrupt_flag_reads_with_upper_bits_set() {
    let mut mem = memory_for(&banked_rom(0x00, 0x00, 2));
    mem.write(IF, 0x04, false);
    assert_eq!(mem.read(IF, false), 0xE4);
}

#[test]
fn joypad_register_follows_selection_and_press_raises_interrupt() {
    let mut mem = memory_for(&banked_rom(0x00, 0x00, 2));
    mem.write(IF, 0x00, false);

    mem.set_button(Button::Down, true);
    assert_eq!(mem.read(IF, false) & 0x1F, 0x10);
    assert!(mem.is_pressed(Button::Down));

    mem.write(JOYP, 0x30, false);
    assert_eq!(mem.read(JOYP, false), 0xFF);
    mem.write(JOYP, 0x20, false);
    assert_eq!(mem.read(JOYP, false), 0xE7);
    mem.write(JOYP, 0x10, false);
    assert_eq!(mem.read(JOYP, false), 0xDF);
}

#[test]
fn serial_start_bit_captures_byte_and_requests_interrupt() {
    let mut mem = memory_for(&banked_rom(0x00, 0x00, 2));
    mem.write(IF, 0x00, false);

    mem.write(SB, b'O', false);
    mem.write(SC, 0x81, false);
    mem.write(SB, b'K', false);
    mem.write(SC, 0x01, false);
    mem.write(SC, 0x81, false);

    assert_eq!(mem.serial_output(), b"OK");
    assert_eq!(mem.read(SC, false) & 0x80, 0);
    assert_eq!(mem.read(IF, false) & 0x1F, 0x08);
    assert_eq!(mem.take_serial_output(), b"OK".to_vec());
    assert!(mem.serial_output().is_empty());
}
