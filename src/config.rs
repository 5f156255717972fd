//! Static hardware topology and its validation.
//!
//! The wiring of a controller never changes at runtime, so every channel is
//! declared once through [`TopologyBuilder`] and validated in one pass by
//! [`TopologyBuilder::build`]. A topology that builds is guaranteed to have
//! unique, in-range, non-reserved pins and a non-empty mask on every mapped
//! channel.

use crate::status::DeviceStatus;
use crate::time::Duration;
use crate::types::{ChannelMapping, Level, PinId, Polarity};
use heapless::Vec;

/// Which GPIOs the board exposes and which are off limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConstraints {
    /// Pins that may be sampled as digital inputs.
    pub input_mask: u32,

    /// Pins that may be driven as outputs.
    pub output_mask: u32,

    /// Pins claimed by something outside the engine (serial console, etc).
    pub reserved_mask: u32,
}

impl PinConstraints {
    /// Raspberry Pi Pico: inputs on GPIO 0-23, outputs on GPIO 0-29,
    /// GPIO 16/17 reserved for the UART console.
    pub const RP2040: PinConstraints = PinConstraints {
        input_mask: 0x00FF_FFFF,
        output_mask: 0x3FFF_FFFF,
        reserved_mask: (1 << 16) | (1 << 17),
    };

    /// Inputs the digital sampler keeps after masking.
    #[inline]
    pub const fn sampled_mask(&self) -> u32 {
        self.input_mask & !self.reserved_mask
    }

    /// Validates a digital input pin.
    pub fn check_input(&self, pin: PinId) -> Result<(), ConfigError> {
        Self::check(pin, self.input_mask, self.reserved_mask)
    }

    /// Validates an output pin.
    pub fn check_output(&self, pin: PinId) -> Result<(), ConfigError> {
        Self::check(pin, self.output_mask, self.reserved_mask)
    }

    fn check(pin: PinId, allowed: u32, reserved: u32) -> Result<(), ConfigError> {
        if pin >= 32 || allowed & (1 << pin) == 0 {
            return Err(ConfigError::PinOutOfRange(pin));
        }
        if reserved & (1 << pin) != 0 {
            return Err(ConfigError::ReservedPin(pin));
        }
        Ok(())
    }
}

impl Default for PinConstraints {
    fn default() -> Self {
        PinConstraints::RP2040
    }
}

/// Layout of the analogue converter's inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcConstraints {
    /// GPIO wired to converter channel 0. Channel `n` is on `first_pin + n`.
    pub first_pin: PinId,

    /// Number of converter channels that have an external pin.
    pub pin_channels: u8,

    /// Converter channel of the internal temperature sensor.
    pub temperature_channel: u8,
}

impl AdcConstraints {
    /// RP2040: channels 0-3 on GPIO 26-29, temperature sensor on channel 4.
    pub const RP2040: AdcConstraints = AdcConstraints {
        first_pin: 26,
        pin_channels: 4,
        temperature_channel: 4,
    };
}

impl Default for AdcConstraints {
    fn default() -> Self {
        AdcConstraints::RP2040
    }
}

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Two channels claim the same pin.
    DuplicatePin(PinId),

    /// Pin does not exist or cannot serve this role.
    PinOutOfRange(PinId),

    /// Pin is reserved for another peripheral.
    ReservedPin(PinId),

    /// A mapped channel has an all-zero mask.
    EmptyMask(PinId),

    /// A dpad mask sets bits outside up/down/left/right.
    InvalidDpadMask(PinId),

    /// Converter channel does not exist.
    InvalidConverterChannel(u8),

    /// Two analogue channels read the same converter channel.
    DuplicateConverterChannel(u8),

    /// Pin is not wired to the converter channel it was paired with.
    PinNotAnalogueCapable(PinId),

    /// More channels than the topology can hold.
    CapacityExceeded,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::DuplicatePin(pin) => {
                write!(f, "GPIO {} is assigned to more than one channel", pin)
            }
            ConfigError::PinOutOfRange(pin) => {
                write!(f, "GPIO {} is outside the usable pin range", pin)
            }
            ConfigError::ReservedPin(pin) => {
                write!(f, "GPIO {} is reserved", pin)
            }
            ConfigError::EmptyMask(pin) => {
                write!(f, "channel on GPIO {} has an empty mask", pin)
            }
            ConfigError::InvalidDpadMask(pin) => {
                write!(f, "channel on GPIO {} sets non-directional dpad bits", pin)
            }
            ConfigError::InvalidConverterChannel(channel) => {
                write!(f, "converter channel {} does not exist", channel)
            }
            ConfigError::DuplicateConverterChannel(channel) => {
                write!(f, "converter channel {} is read by more than one channel", channel)
            }
            ConfigError::PinNotAnalogueCapable(pin) => {
                write!(f, "GPIO {} is not wired to the requested converter channel", pin)
            }
            ConfigError::CapacityExceeded => {
                write!(f, "topology capacity exceeded")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// One physical switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitalInputConfig {
    pub pin: PinId,
    pub name: &'static str,
    pub mapping: ChannelMapping,
    pub polarity: Polarity,
}

/// Where an analogue channel gets its signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogueSource {
    /// External pin routed to a converter channel.
    Pin { pin: PinId, channel: u8 },

    /// Converter channel with no pin, such as the temperature sensor.
    Internal { channel: u8 },
}

impl AnalogueSource {
    /// Converter channel to select before a conversion.
    #[inline]
    pub const fn channel(&self) -> u8 {
        match self {
            AnalogueSource::Pin { channel, .. } | AnalogueSource::Internal { channel } => *channel,
        }
    }

    /// GPIO used by this source, if any.
    #[inline]
    pub const fn pin(&self) -> Option<PinId> {
        match self {
            AnalogueSource::Pin { pin, .. } => Some(*pin),
            AnalogueSource::Internal { .. } => None,
        }
    }
}

/// What drives a timed output's period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputRole {
    /// Period is fixed at configuration time.
    Fixed,

    /// Period follows the USB device status (see [`DeviceStatus`]).
    Heartbeat,
}

/// One free-running toggling output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedOutputConfig {
    pub pin: PinId,
    pub duration: Duration,
    pub initial: Level,
    pub role: OutputRole,
}

/// Validated hardware topology.
///
/// # Type Parameters
/// * `D` - Maximum number of digital input channels
/// * `A` - Maximum number of analogue input channels
/// * `O` - Maximum number of timed outputs
#[derive(Debug, Clone)]
pub struct Topology<const D: usize, const A: usize, const O: usize> {
    digital: Vec<DigitalInputConfig, D>,
    analogue: Vec<AnalogueSource, A>,
    outputs: Vec<TimedOutputConfig, O>,
    pins: PinConstraints,
    adc: AdcConstraints,
}

impl<const D: usize, const A: usize, const O: usize> Topology<D, A, O> {
    /// Creates a new topology builder with RP2040 constraints.
    pub fn builder() -> TopologyBuilder<D, A, O> {
        TopologyBuilder::new()
    }

    pub fn digital(&self) -> &[DigitalInputConfig] {
        &self.digital
    }

    pub fn analogue(&self) -> &[AnalogueSource] {
        &self.analogue
    }

    pub fn outputs(&self) -> &[TimedOutputConfig] {
        &self.outputs
    }

    pub fn pin_constraints(&self) -> &PinConstraints {
        &self.pins
    }

    pub fn adc_constraints(&self) -> &AdcConstraints {
        &self.adc
    }
}

/// Builder for [`Topology`].
///
/// Each push only checks capacity. Pin, mask and converter rules are applied
/// by [`build`](Self::build) against the constraints in effect at that point.
#[derive(Debug)]
pub struct TopologyBuilder<const D: usize, const A: usize, const O: usize> {
    digital: Vec<DigitalInputConfig, D>,
    analogue: Vec<AnalogueSource, A>,
    outputs: Vec<TimedOutputConfig, O>,
    pins: PinConstraints,
    adc: AdcConstraints,
}

impl<const D: usize, const A: usize, const O: usize> TopologyBuilder<D, A, O> {
    pub fn new() -> Self {
        Self {
            digital: Vec::new(),
            analogue: Vec::new(),
            outputs: Vec::new(),
            pins: PinConstraints::RP2040,
            adc: AdcConstraints::RP2040,
        }
    }

    /// Replaces the pin constraints.
    pub fn pin_constraints(mut self, constraints: PinConstraints) -> Self {
        self.pins = constraints;
        self
    }

    /// Replaces the converter layout.
    pub fn adc_constraints(mut self, constraints: AdcConstraints) -> Self {
        self.adc = constraints;
        self
    }

    /// Adds an active-low switch with a pull-up.
    pub fn digital(
        self,
        pin: PinId,
        name: &'static str,
        mapping: ChannelMapping,
    ) -> Result<Self, ConfigError> {
        self.digital_with_polarity(pin, name, mapping, Polarity::ActiveLow)
    }

    /// Adds a switch with an explicit polarity.
    pub fn digital_with_polarity(
        mut self,
        pin: PinId,
        name: &'static str,
        mapping: ChannelMapping,
        polarity: Polarity,
    ) -> Result<Self, ConfigError> {
        self.digital
            .push(DigitalInputConfig {
                pin,
                name,
                mapping,
                polarity,
            })
            .map_err(|_| ConfigError::CapacityExceeded)?;
        Ok(self)
    }

    /// Adds a potentiometer on `pin`, read through converter `channel`.
    pub fn analogue(mut self, pin: PinId, channel: u8) -> Result<Self, ConfigError> {
        self.analogue
            .push(AnalogueSource::Pin { pin, channel })
            .map_err(|_| ConfigError::CapacityExceeded)?;
        Ok(self)
    }

    /// Adds the converter's internal temperature sensor.
    pub fn temperature_sensor(mut self) -> Result<Self, ConfigError> {
        let channel = self.adc.temperature_channel;
        self.analogue
            .push(AnalogueSource::Internal { channel })
            .map_err(|_| ConfigError::CapacityExceeded)?;
        Ok(self)
    }

    /// Adds an output that toggles every `duration`, starting low.
    pub fn output(mut self, pin: PinId, duration: Duration) -> Result<Self, ConfigError> {
        self.outputs
            .push(TimedOutputConfig {
                pin,
                duration,
                initial: Level::Low,
                role: OutputRole::Fixed,
            })
            .map_err(|_| ConfigError::CapacityExceeded)?;
        Ok(self)
    }

    /// Adds a status LED whose period tracks the USB device status.
    ///
    /// Starts at the not-mounted rate.
    pub fn heartbeat(mut self, pin: PinId) -> Result<Self, ConfigError> {
        self.outputs
            .push(TimedOutputConfig {
                pin,
                duration: DeviceStatus::NotMounted.heartbeat_interval(),
                initial: Level::Low,
                role: OutputRole::Heartbeat,
            })
            .map_err(|_| ConfigError::CapacityExceeded)?;
        Ok(self)
    }

    /// Validates every channel and builds the topology.
    ///
    /// # Errors
    /// * `PinOutOfRange` / `ReservedPin` - pin unusable for its role
    /// * `DuplicatePin` - pin claimed twice across all channel kinds
    /// * `EmptyMask` / `InvalidDpadMask` - bad digital mapping
    /// * `InvalidConverterChannel` / `PinNotAnalogueCapable` - bad analogue source
    /// * `DuplicateConverterChannel` - converter channel read twice
    pub fn build(self) -> Result<Topology<D, A, O>, ConfigError> {
        let mut claimed: u32 = 0;
        let mut claim = |pin: PinId| -> Result<(), ConfigError> {
            let bit = 1u32 << pin;
            if claimed & bit != 0 {
                return Err(ConfigError::DuplicatePin(pin));
            }
            claimed |= bit;
            Ok(())
        };

        for input in &self.digital {
            self.pins.check_input(input.pin)?;
            match input.mapping {
                ChannelMapping::Button(mask) if mask.is_empty() => {
                    return Err(ConfigError::EmptyMask(input.pin));
                }
                ChannelMapping::Dpad(mask) if mask.is_empty() => {
                    return Err(ConfigError::EmptyMask(input.pin));
                }
                ChannelMapping::Dpad(mask) if !mask.is_valid() => {
                    return Err(ConfigError::InvalidDpadMask(input.pin));
                }
                _ => {}
            }
            claim(input.pin)?;
        }

        for (index, source) in self.analogue.iter().enumerate() {
            match *source {
                AnalogueSource::Pin { pin, channel } => {
                    if channel >= self.adc.pin_channels {
                        return Err(ConfigError::InvalidConverterChannel(channel));
                    }
                    if pin >= 32 {
                        return Err(ConfigError::PinOutOfRange(pin));
                    }
                    if pin != self.adc.first_pin.wrapping_add(channel) {
                        return Err(ConfigError::PinNotAnalogueCapable(pin));
                    }
                    if self.pins.reserved_mask & (1 << pin) != 0 {
                        return Err(ConfigError::ReservedPin(pin));
                    }
                    claim(pin)?;
                }
                AnalogueSource::Internal { channel } => {
                    if channel != self.adc.temperature_channel {
                        return Err(ConfigError::InvalidConverterChannel(channel));
                    }
                }
            }
            if self.analogue[..index]
                .iter()
                .any(|earlier| earlier.channel() == source.channel())
            {
                return Err(ConfigError::DuplicateConverterChannel(source.channel()));
            }
        }

        for output in &self.outputs {
            self.pins.check_output(output.pin)?;
            claim(output.pin)?;
        }

        Ok(Topology {
            digital: self.digital,
            analogue: self.analogue,
            outputs: self.outputs,
            pins: self.pins,
            adc: self.adc,
        })
    }
}

impl<const D: usize, const A: usize, const O: usize> Default for TopologyBuilder<D, A, O> {
    fn default() -> Self {
        Self::new()
    }
}
