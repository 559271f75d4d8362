use crate::error::Result;
use crate::registers::JOYP;

use super::{Bus, Cpu};

impl Cpu {
    /// Execute one instruction (or one idle slice while halted/stopped),
    /// advance the timers, then dispatch a pending interrupt.
    ///
    /// Returns the T-cycles consumed including any interrupt dispatch. A
    /// routing fault raised by the bus during the instruction is returned
    /// as an error tagged with the faulting instruction's address.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        let pc = self.regs.pc;

        let cycles = if self.stopped {
            // A low joypad line ends STOP even without an interrupt.
            if bus.read8(JOYP) & 0x0F != 0x0F {
                self.stopped = false;
            }
            4
        } else if self.halted {
            4
        } else {
            let had_pending = self.ime_enable_pending;
            let opcode = self.fetch8(bus);
            let cycles = self.exec_opcode(bus, opcode, pc)?;
            self.apply_ime_delay(had_pending);
            cycles
        };

        if let Some(err) = bus.take_fault() {
            let err = err.at_pc(pc);
            log::error!("GB CPU: {err}");
            return Err(err);
        }

        // STOP freezes the divider.
        if !self.stopped {
            self.update_timers(bus, cycles);
        }

        let dispatch = self.handle_interrupts(bus);
        if dispatch > 0 {
            self.update_timers(bus, dispatch);
        }
        Ok(cycles + dispatch)
    }
}
