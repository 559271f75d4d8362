use crate::registers::{IE, IF, Interrupts};

use super::{Bus, Cpu};

impl Cpu {
    /// Service the highest-priority pending interrupt, if any.
    ///
    /// Any enabled and requested interrupt wakes a halted CPU even with IME
    /// clear; only the joypad line ends STOP. Returns the dispatch cost
    /// (20 cycles) or 0 when nothing was serviced.
    pub(super) fn handle_interrupts<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let enabled = Interrupts::from_bits_truncate(bus.read8(IE));
        let requested = Interrupts::from_bits_truncate(bus.read8(IF));
        let pending = enabled & requested;
        if pending.is_empty() {
            return 0;
        }

        self.halted = false;
        if pending.contains(Interrupts::JOYPAD) {
            self.stopped = false;
        }
        if !self.ime {
            return 0;
        }

        let Some(source) = pending.iter().next() else {
            return 0;
        };
        self.ime = false;
        self.ime_enable_pending = false;
        bus.write8(IF, (requested - source).bits());

        // A HALT that hit the bug returns to itself.
        let ret = if self.halt_bug {
            self.halt_bug = false;
            self.regs.pc.wrapping_sub(1)
        } else {
            self.regs.pc
        };
        self.push_u16(bus, ret);
        self.regs.pc = source.vector();
        log::debug!(
            "GB CPU: dispatch {source:?} from PC=0x{ret:04X} to 0x{vector:04X}",
            vector = self.regs.pc
        );
        20
    }

    /// Commit a pending EI once the instruction after it has run.
    #[inline]
    pub(super) fn apply_ime_delay(&mut self, had_pending: bool) {
        if had_pending && self.ime_enable_pending {
            self.ime = true;
            self.ime_enable_pending = false;
        }
    }
}
