//! Hardware timer wrapper for the gamepad-core time trait.

use gamepad_core::{Instant, TimeSource};

/// Time source wrapper around the RP2040 Timer.
///
/// Only the low 32 bits of the 64-bit counter are used; the engine handles
/// their wrap.
pub struct HardwareTimer {
    timer: rp_pico::hal::Timer,
}

impl HardwareTimer {
    /// Create a new hardware timer wrapper
    pub fn new(timer: rp_pico::hal::Timer) -> Self {
        Self { timer }
    }
}

impl TimeSource for HardwareTimer {
    fn now(&self) -> Instant {
        Instant::from_ticks(self.timer.get_counter_low())
    }
}
