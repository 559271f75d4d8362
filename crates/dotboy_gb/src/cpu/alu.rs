use super::{Cpu, Flag};

/// Accumulator operations selected by bits 3-5 of the 0x80-0xBF and
/// 0xC6-0xFE opcode groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    #[inline]
    pub(super) fn from_opcode(opcode: u8) -> Self {
        match (opcode >> 3) & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbc,
            4 => AluOp::And,
            5 => AluOp::Xor,
            6 => AluOp::Or,
            _ => AluOp::Cp,
        }
    }
}

impl Cpu {
    /// Write all four flags at once. Bits 0-3 of F stay clear.
    #[inline]
    pub(super) fn set_flags(&mut self, z: bool, n: bool, h: bool, c: bool) {
        self.regs.f = ((z as u8) << Flag::Z as u8)
            | ((n as u8) << Flag::N as u8)
            | ((h as u8) << Flag::H as u8)
            | ((c as u8) << Flag::C as u8);
    }

    #[inline]
    fn carry_in(&self, use_carry: bool) -> u8 {
        (use_carry && self.get_flag(Flag::C)) as u8
    }

    pub(super) fn alu(&mut self, op: AluOp, value: u8) {
        let a = self.regs.a;
        match op {
            AluOp::Add | AluOp::Adc => {
                let carry = self.carry_in(op == AluOp::Adc);
                self.regs.a = self.add8(a, value, carry);
            }
            AluOp::Sub | AluOp::Sbc => {
                let carry = self.carry_in(op == AluOp::Sbc);
                self.regs.a = self.sub8(a, value, carry);
            }
            AluOp::Cp => {
                // Flags as for SUB; A is left alone.
                self.sub8(a, value, 0);
            }
            AluOp::And => {
                self.regs.a = a & value;
                self.set_flags(self.regs.a == 0, false, true, false);
            }
            AluOp::Xor => {
                self.regs.a = a ^ value;
                self.set_flags(self.regs.a == 0, false, false, false);
            }
            AluOp::Or => {
                self.regs.a = a | value;
                self.set_flags(self.regs.a == 0, false, false, false);
            }
        }
    }

    /// 8-bit add with carry-in; H is the carry out of bit 3, C out of bit 7.
    fn add8(&mut self, a: u8, value: u8, carry: u8) -> u8 {
        let full = a as u16 + value as u16 + carry as u16;
        let half = (a & 0x0F) + (value & 0x0F) + carry;
        let result = full as u8;
        self.set_flags(result == 0, false, half > 0x0F, full > 0xFF);
        result
    }

    /// 8-bit subtract with borrow-in; H and C report borrows from bit 4
    /// and bit 8.
    fn sub8(&mut self, a: u8, value: u8, carry: u8) -> u8 {
        let full = a as i16 - value as i16 - carry as i16;
        let half = (a & 0x0F) as i16 - (value & 0x0F) as i16 - carry as i16;
        let result = full as u8;
        self.set_flags(result == 0, true, half < 0, full < 0);
        result
    }

    /// Decimal adjust accumulator after BCD addition/subtraction.
    ///
    /// After an addition the correction is derived from both the flags and
    /// the value of A. After a subtraction only the H and C flags are
    /// consulted; the digits of A are not inspected.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;
        let subtract = self.get_flag(Flag::N);
        let mut adjust = 0u8;
        if self.get_flag(Flag::H) || (!subtract && (a & 0x0F) > 0x09) {
            adjust |= 0x06;
        }
        if self.get_flag(Flag::C) || (!subtract && a > 0x99) {
            adjust |= 0x60;
        }

        a = if subtract {
            a.wrapping_sub(adjust)
        } else {
            a.wrapping_add(adjust)
        };
        self.regs.a = a;
        self.set_flags(a == 0, subtract, false, adjust >= 0x60);
    }

    /// INC r / INC (HL). C is preserved.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        let carry = self.get_flag(Flag::C);
        self.set_flags(result == 0, false, (value & 0x0F) == 0x0F, carry);
        result
    }

    /// DEC r / DEC (HL). C is preserved.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        let carry = self.get_flag(Flag::C);
        self.set_flags(result == 0, true, (value & 0x0F) == 0, carry);
        result
    }

    /// ADD HL,rr: Z preserved, H from bit 11, C from bit 15.
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let z = self.get_flag(Flag::Z);
        let half = (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF;
        let carry = (hl as u32) + (value as u32) > 0xFFFF;
        self.set_flags(z, false, half, carry);
        self.regs.set_hl(hl.wrapping_add(value));
    }

    /// SP plus a signed immediate, shared by ADD SP,r8 and LD HL,SP+r8.
    /// Flags come from the unsigned low-byte addition; Z and N clear.
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let offset = imm8 as i8 as i16 as u16;
        let half = (base & 0x000F) + (offset & 0x000F) > 0x000F;
        let carry = (base & 0x00FF) + (offset & 0x00FF) > 0x00FF;
        self.set_flags(false, false, half, carry);
        base.wrapping_add(offset)
    }

    /// Shared flag update for shifts and rotates: N and H clear, C from
    /// the bit shifted out. The accumulator-only forms always clear Z.
    #[inline]
    pub(super) fn set_shift_flags(&mut self, result: u8, carry: bool, force_z_clear: bool) {
        self.set_flags(!force_z_clear && result == 0, false, false, carry);
    }
}
