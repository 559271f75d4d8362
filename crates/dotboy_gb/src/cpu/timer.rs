use crate::registers::{Interrupts, TAC, TIMA, TMA};

use super::{Bus, Cpu};

/// DIV increments once every 256 T-cycles.
const DIVIDER_PERIOD: u32 = 256;

/// Hidden counters behind DIV and TIMA. The visible registers live on the
/// bus; these only accumulate cycles until the next increment.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct Timer {
    divider_counter: u32,
    tima_counter: u32,
}

/// TIMA period in T-cycles for the TAC clock select bits.
#[inline]
fn tima_period(tac: u8) -> u32 {
    match tac & 0x03 {
        0b00 => 1024,
        0b01 => 16,
        0b10 => 64,
        _ => 256,
    }
}

impl Cpu {
    /// Advance DIV/TIMA by `cycles` T-cycles.
    pub(super) fn update_timers<B: Bus>(&mut self, bus: &mut B, cycles: u32) {
        if bus.take_divider_reset() {
            self.timer = Timer::default();
        }

        self.timer.divider_counter += cycles;
        while self.timer.divider_counter >= DIVIDER_PERIOD {
            self.timer.divider_counter -= DIVIDER_PERIOD;
            bus.increment_divider();
        }

        let tac = bus.read8(TAC);
        if tac & 0x04 == 0 {
            return;
        }

        let period = tima_period(tac);
        self.timer.tima_counter += cycles;
        while self.timer.tima_counter >= period {
            self.timer.tima_counter -= period;
            let (tima, overflow) = bus.read8(TIMA).overflowing_add(1);
            if overflow {
                let reload = bus.read8(TMA);
                bus.write8(TIMA, reload);
                self.request_interrupt(bus, Interrupts::TIMER.bits());
            } else {
                bus.write8(TIMA, tima);
            }
        }
    }
}
