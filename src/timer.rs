//! Free-running toggling outputs.

use crate::config::{OutputRole, TimedOutputConfig};
use crate::time::Duration;
use crate::types::{Level, PinId};

/// A square-wave output driven by accumulated cycle deltas.
///
/// The accumulator resets to zero on every toggle, so any remainder past the
/// period is dropped and the wave drifts by up to one cycle per half-period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedOutput {
    pin: PinId,
    level: Level,
    duration: Duration,
    elapsed: Duration,
    role: OutputRole,
}

impl TimedOutput {
    /// Creates a fixed-period output at `initial` with nothing accumulated.
    pub const fn new(pin: PinId, duration: Duration, initial: Level) -> Self {
        Self {
            pin,
            level: initial,
            duration,
            elapsed: Duration::from_ticks(0),
            role: OutputRole::Fixed,
        }
    }

    pub const fn from_config(config: &TimedOutputConfig) -> Self {
        Self {
            pin: config.pin,
            level: config.initial,
            duration: config.duration,
            elapsed: Duration::from_ticks(0),
            role: config.role,
        }
    }

    /// Accumulates one cycle's delta.
    ///
    /// Returns the new level when the period is reached; the caller writes
    /// it to the pin. A zero period never toggles.
    pub fn advance(&mut self, delta: Duration) -> Option<Level> {
        if !self.is_enabled() {
            return None;
        }

        self.elapsed = Duration::from_ticks(self.elapsed.ticks().saturating_add(delta.ticks()));
        if self.elapsed < self.duration {
            return None;
        }

        self.level = !self.level;
        self.elapsed = Duration::from_ticks(0);
        Some(self.level)
    }

    /// Changes the period. Level and accumulated time are kept.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn pin(&self) -> PinId {
        self.pin
    }

    /// Level last written to the pin.
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time accumulated since the last toggle.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn role(&self) -> OutputRole {
        self.role
    }

    pub fn is_enabled(&self) -> bool {
        self.duration.ticks() != 0
    }
}
