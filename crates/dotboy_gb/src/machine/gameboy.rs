use std::io;

use dotboy_common::key::Key;

use super::config::GameBoyConfig;
use super::host::{FramePacer, RomSource};
use super::joypad::Button;
use super::memory::Memory;
use crate::cpu::Cpu;
use crate::error::{EmulationError, Result};
use crate::ppu::{Frame, Ppu, DOTS_PER_FRAME};

type FrameCallback = Box<dyn FnMut(&Frame)>;

/// The whole machine: CPU, address space and PPU, kept in lockstep.
///
/// Each [`GameBoy::step`] runs one CPU instruction and then advances the
/// PPU by the dots that instruction took (or by four dots in
/// [`PpuTiming::FixedFourDots`](super::PpuTiming::FixedFourDots) mode).
pub struct GameBoy {
    pub cpu: Cpu,
    memory: Memory,
    ppu: Ppu,
    config: GameBoyConfig,
    frame_callback: Option<FrameCallback>,
    pacer: Option<Box<dyn FramePacer>>,
    last_frame: Option<Frame>,
    frames: u64,
}

impl GameBoy {
    /// Build a machine in the post-boot state from a ROM image and an
    /// optional save RAM snapshot.
    pub fn new(rom: &[u8], save: Option<&[u8]>, config: GameBoyConfig) -> Result<Self> {
        let memory = Memory::from_rom(rom, save, config.allow_rom_writes)?;
        Ok(Self {
            cpu: Cpu::post_boot(),
            memory,
            ppu: Ppu::new(),
            config,
            frame_callback: None,
            pacer: None,
            last_frame: None,
            frames: 0,
        })
    }

    /// Load ROM and save through a [`RomSource`].
    pub fn from_source(source: &mut impl RomSource, config: GameBoyConfig) -> Result<Self> {
        let rom = source
            .load_rom()
            .map_err(|err| EmulationError::RomUnavailable(err.to_string()))?;
        let save = source.load_save();
        Self::new(&rom, save.as_deref(), config)
    }

    pub fn config(&self) -> &GameBoyConfig {
        &self.config
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    /// Frames completed since power-on.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    pub fn set_frame_callback(&mut self, callback: impl FnMut(&Frame) + 'static) {
        self.frame_callback = Some(Box::new(callback));
    }

    pub fn set_pacer(&mut self, pacer: impl FramePacer + 'static) {
        self.pacer = Some(Box::new(pacer));
    }

    /// Run one CPU step and the matching PPU dots. Returns the CPU's
    /// T-cycles.
    pub fn step(&mut self) -> Result<u32> {
        let cycles = self.cpu.step(&mut self.memory)?;
        for _ in 0..self.config.ppu_timing.dots_for(cycles) {
            if let Some(frame) = self.ppu.tick(&mut self.memory) {
                self.complete_frame(frame);
            }
        }
        Ok(cycles)
    }

    /// Step until the PPU finishes a frame. With the LCD off no frame ever
    /// completes, so this gives up after two frames' worth of dots.
    /// Returns the T-cycles consumed.
    pub fn run_frame(&mut self) -> Result<u64> {
        let start = self.frames;
        let budget = 2 * DOTS_PER_FRAME as u64;
        let mut dots = 0u64;
        let mut cycles = 0u64;
        while self.frames == start && dots < budget {
            let taken = self.step()?;
            cycles += taken as u64;
            dots += self.config.ppu_timing.dots_for(taken) as u64;
        }
        Ok(cycles)
    }

    fn complete_frame(&mut self, frame: Frame) {
        self.frames += 1;
        if let Some(callback) = self.frame_callback.as_mut() {
            callback(&frame);
        }
        if let Some(pacer) = self.pacer.as_mut() {
            pacer.frame_completed(self.frames);
        }
        self.last_frame = Some(frame);
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.memory.set_button(button, pressed);
    }

    /// Map a front-end key onto a DMG button:
    /// Z => A, X => B, Backspace => Select, Enter => Start, arrows => D-pad.
    pub fn handle_key(&mut self, key: Key, pressed: bool) {
        let button = match key {
            Key::Right => Button::Right,
            Key::Left => Button::Left,
            Key::Up => Button::Up,
            Key::Down => Button::Down,
            Key::Z => Button::A,
            Key::X => Button::B,
            Key::Backspace | Key::A => Button::Select,
            Key::Enter | Key::S => Button::Start,
            Key::Escape => return,
        };
        self.set_button(button, pressed);
    }

    /// Bytes written through the serial port so far.
    pub fn serial_output(&self) -> &[u8] {
        self.memory.serial_output()
    }

    pub fn take_serial_output(&mut self) -> Vec<u8> {
        self.memory.take_serial_output()
    }

    /// Battery-backed RAM worth persisting, if the cartridge has any.
    pub fn save_ram(&self) -> Option<&[u8]> {
        let ram = self.memory.cartridge_ram();
        (self.memory.has_battery() && !ram.is_empty()).then_some(ram)
    }

    /// Hand battery RAM back to the host. Returns whether anything was
    /// stored.
    pub fn shutdown(&self, source: &mut impl RomSource) -> io::Result<bool> {
        let Some(ram) = self.save_ram() else {
            return Ok(false);
        };
        source.store_save(ram)?;
        log::debug!("GB: stored {} bytes of save RAM", ram.len());
        Ok(true)
    }
}
