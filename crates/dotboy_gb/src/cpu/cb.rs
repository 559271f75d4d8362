use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Execute a 0xCB-prefixed opcode. Every entry of the table is defined.
    ///
    /// `x` selects the group (rotate/shift, BIT, RES, SET), `y` the
    /// operation or bit number and `z` the operand.
    pub(super) fn step_cb<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let cb = self.fetch8(bus);
        let x = cb >> 6;
        let y = (cb >> 3) & 0x07;
        let z = cb & 0x07;
        let value = self.read_reg8(bus, z);

        match x {
            0 => {
                let (result, carry) = match y {
                    0..=3 => self.rotate(y, value),
                    // SLA
                    4 => (value << 1, value & 0x80 != 0),
                    // SRA keeps bit 7.
                    5 => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
                    // SWAP
                    6 => (value.rotate_left(4), false),
                    // SRL
                    _ => (value >> 1, value & 0x01 != 0),
                };
                self.set_shift_flags(result, carry, false);
                self.write_reg8(bus, z, result);
            }
            1 => {
                // BIT leaves C alone.
                self.set_flag(Flag::Z, value & (1 << y) == 0);
                self.set_flag(Flag::N, false);
                self.set_flag(Flag::H, true);
                return if z == 6 { 12 } else { 8 };
            }
            2 => self.write_reg8(bus, z, value & !(1 << y)),
            _ => self.write_reg8(bus, z, value | (1 << y)),
        }

        if z == 6 { 16 } else { 8 }
    }
}
