//! Digital sampler: one bulk read of the pin bank per cycle.

use crate::config::PinConstraints;
use crate::hal::DigitalPins;
use crate::types::{Level, PinId, Polarity};

/// Masked levels of every input pin, captured in a single read.
///
/// Pins outside the sampled range (and reserved pins) always read `Low`.
/// Topology validation guarantees no channel sits on such a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSnapshot {
    bits: u32,
}

impl PinSnapshot {
    /// Performs exactly one bulk read and masks the result.
    pub fn capture<P: DigitalPins>(
        pins: &mut P,
        constraints: &PinConstraints,
    ) -> Result<Self, P::Error> {
        let raw = pins.read_all()?;
        Ok(Self::from_raw(raw, constraints))
    }

    /// Masks a raw bank reading.
    #[inline]
    pub const fn from_raw(raw: u32, constraints: &PinConstraints) -> Self {
        Self {
            bits: raw & constraints.sampled_mask(),
        }
    }

    #[inline]
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Electrical level of `pin`.
    #[inline]
    pub const fn level(&self, pin: PinId) -> Level {
        if pin >= 32 {
            return Level::Low;
        }
        Level::from_bool(self.bits & (1 << pin) != 0)
    }

    /// Level of `pin` normalized through `polarity`: `true` means pressed.
    #[inline]
    pub const fn is_pressed(&self, pin: PinId, polarity: Polarity) -> bool {
        polarity.is_pressed(self.level(pin))
    }
}
