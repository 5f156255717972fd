//! Hardware abstraction traits.
//!
//! Implement these for your board (SIO registers, a HAL pin bank, an ADC
//! driver) to let the engine drive it. Test code implements them with mocks.

use crate::types::{Direction, Level, PinId};

/// Bulk-readable bank of GPIO pins.
pub trait DigitalPins {
    /// Fault reported by a bulk read. Use [`core::convert::Infallible`] if
    /// reads cannot fail.
    type Error: core::fmt::Debug;

    /// Reads every input pin at once. Bit `n` is the level of GPIO `n`.
    fn read_all(&mut self) -> Result<u32, Self::Error>;

    /// Drives a single output pin.
    fn write_pin(&mut self, pin: PinId, level: Level);

    /// Configures a pin as input or output.
    fn set_direction(&mut self, pin: PinId, direction: Direction);

    /// Enables the pin's internal pull-up.
    fn enable_pull_up(&mut self, pin: PinId);
}

/// Multiplexed analogue-to-digital converter.
pub trait AnalogueConverter {
    /// Fault reported by a conversion.
    type Error: core::fmt::Debug;

    /// Routes converter input `channel` to the sampler.
    fn select_channel(&mut self, channel: u8);

    /// Runs one conversion on the selected channel and returns the raw result.
    fn read(&mut self) -> Result<u16, Self::Error>;
}

/// Converter for boards without analogue inputs.
///
/// Always reads the converter mid-point.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConverter;

impl AnalogueConverter for NoConverter {
    type Error = core::convert::Infallible;

    fn select_channel(&mut self, _channel: u8) {}

    fn read(&mut self) -> Result<u16, Self::Error> {
        Ok(crate::analogue::ADC_MIDPOINT)
    }
}
