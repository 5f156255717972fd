//! Analogue sampler.
//!
//! Samples are stored exactly as converted. There is no smoothing, averaging
//! or hysteresis, so a noisy potentiometer shows up as a noisy axis.

use crate::config::AnalogueSource;
use crate::hal::AnalogueConverter;
use crate::types::PinId;

/// Converter resolution in bits.
pub const ADC_BITS: u32 = 12;

/// Largest raw conversion result.
pub const ADC_MAX: u16 = (1 << ADC_BITS) - 1;

/// Centre of the conversion range. Fresh channels start here.
pub const ADC_MIDPOINT: u16 = 1 << (ADC_BITS - 1);

/// Converter channel of the RP2040 temperature sensor.
pub const TEMPERATURE_SENSOR_CHANNEL: u8 = 4;

/// One potentiometer or internal analogue source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogueInputChannel {
    source: AnalogueSource,
    raw: u16,
}

impl AnalogueInputChannel {
    /// Creates a channel resting at the converter mid-point.
    pub const fn new(source: AnalogueSource) -> Self {
        Self {
            source,
            raw: ADC_MIDPOINT,
        }
    }

    /// Selects this channel and runs one conversion, without storing it.
    pub fn convert<C: AnalogueConverter>(&self, adc: &mut C) -> Result<u16, C::Error> {
        adc.select_channel(self.source.channel());
        adc.read()
    }

    /// Stores a raw conversion result.
    #[inline]
    pub fn record(&mut self, raw: u16) {
        self.raw = raw;
    }

    /// Converts and stores in one step.
    pub fn sample<C: AnalogueConverter>(&mut self, adc: &mut C) -> Result<u16, C::Error> {
        let raw = self.convert(adc)?;
        self.record(raw);
        Ok(raw)
    }

    pub fn source(&self) -> AnalogueSource {
        self.source
    }

    pub fn pin(&self) -> Option<PinId> {
        self.source.pin()
    }

    pub fn converter_channel(&self) -> u8 {
        self.source.channel()
    }

    /// Last raw conversion.
    pub fn raw(&self) -> u16 {
        self.raw
    }

    /// Last sample narrowed to a signed 8-bit axis.
    pub fn axis_i8(&self) -> i8 {
        narrow_to_i8(self.raw)
    }
}

/// Maps a raw 12-bit sample onto `-128..=127`, mid-point to zero.
///
/// Out-of-range samples saturate.
pub const fn narrow_to_i8(raw: u16) -> i8 {
    let centred = raw as i32 - ADC_MIDPOINT as i32;
    let scaled = centred >> (ADC_BITS - 8);
    if scaled > i8::MAX as i32 {
        i8::MAX
    } else if scaled < i8::MIN as i32 {
        i8::MIN
    } else {
        scaled as i8
    }
}
