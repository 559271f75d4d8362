/// Very small serial interface modelled via SB/SC.
///
/// No link partner exists: test ROMs write a character to SB and then
/// start a transfer on SC (bit 7). The current SB value is captured into
/// `output` immediately and the transfer completes on the spot.
#[derive(Default)]
pub(crate) struct Serial {
    pub(crate) sb: u8,
    pub(crate) sc: u8,
    pub(crate) output: Vec<u8>,
}

impl Serial {
    pub(super) fn write_sb(&mut self, value: u8) {
        self.sb = value;
    }

    /// Returns `true` when the write started (and thereby completed) a
    /// transfer, so the caller can raise the serial interrupt.
    pub(super) fn write_sc(&mut self, value: u8) -> bool {
        self.sc = value;
        if (self.sc & 0x80) == 0 {
            return false;
        }
        log::debug!("GB serial: 0x{:02X} ({:?})", self.sb, self.sb as char);
        self.output.push(self.sb);
        // Clear transfer start bit.
        self.sc &= !0x80;
        true
    }
}
