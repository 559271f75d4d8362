mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod interrupts;
mod regs;
mod step;
mod timer;

pub use bus::Bus;
pub use regs::{Flag, Registers};

use timer::Timer;

/// The SM83 core: registers, interrupt master enable, low-power states and
/// the hidden timer counters behind DIV/TIMA.
#[derive(Debug, Default)]
pub struct Cpu {
    pub regs: Registers,
    /// Interrupt master enable.
    pub ime: bool,
    pub halted: bool,
    pub stopped: bool,
    /// Next opcode fetch does not advance PC.
    halt_bug: bool,
    /// EI was executed; IME turns on after the next instruction.
    ime_enable_pending: bool,
    timer: Timer,
}

impl Cpu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Power-on state with the values the DMG boot ROM leaves behind, so
    /// execution starts at the cartridge entry point.
    pub fn post_boot() -> Self {
        let mut cpu = Self::new();
        cpu.apply_dmg_boot_state();
        cpu
    }

    pub fn apply_dmg_boot_state(&mut self) {
        self.regs.set_af(0x01B0);
        self.regs.set_bc(0x0013);
        self.regs.set_de(0x00D8);
        self.regs.set_hl(0x014D);
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;
        self.ime = false;
        self.halted = false;
        self.stopped = false;
        self.halt_bug = false;
        self.ime_enable_pending = false;
        self.timer = Timer::default();
    }
}
