use crate::error::EmulationError;

/// Abstraction over the Game Boy bus (memory and IO) as seen by the CPU.
///
/// `Memory` is the real implementation; tests use a flat 64 KiB array.
/// The hooks beyond plain reads and writes let the timer keep its hidden
/// counters in the CPU while the visible registers live on the bus.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Bump DIV (0xFF04) by one without the reset side effect that a CPU
    /// write to that address has.
    fn increment_divider(&mut self) {}

    /// Returns `true` once after DIV was written, asking the CPU to clear
    /// its internal divider and timer counters.
    fn take_divider_reset(&mut self) -> bool {
        false
    }

    /// Fatal routing fault raised by an access since the last call.
    fn take_fault(&mut self) -> Option<EmulationError> {
        None
    }
}
