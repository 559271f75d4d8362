use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// STOP consumes its padding byte and idles until a joypad line goes
    /// low or a joypad interrupt arrives.
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let _ = self.fetch8(bus);
        self.stopped = true;
        log::debug!("GB CPU: STOP at PC=0x{:04X}", self.regs.pc.wrapping_sub(2));
        4
    }

    pub(super) fn exec_di(&mut self) -> u32 {
        self.ime = false;
        self.ime_enable_pending = false;
        4
    }

    pub(super) fn exec_ei(&mut self) -> u32 {
        if !self.ime {
            self.ime_enable_pending = true;
        }
        4
    }
}
