#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Topology`**: Static wiring of digital, analogue and output channels, validated once at startup
//! - **`InputEngine`**: Owns every channel and runs one sample/debounce/aggregate/output cycle per call
//! - **`DigitalInputChannel`**: One switch with its polarity, mask and debounced level
//! - **`ButtonState`**: Button and dpad bitsets rebuilt from scratch every cycle
//! - **`AnalogueInputChannel`**: One potentiometer or internal sensor, stored raw
//! - **`TimedOutput`**: A free-running square wave on an output pin (heartbeat LED)
//! - **`DigitalPins`** / **`AnalogueConverter`**: Traits to implement for your hardware
//! - **`TimeSource`**: Trait to implement for your 32-bit microsecond counter
//! - **`GamepadSnapshot`** / **`ReportSink`**: Hand-off to the USB report layer
//!
//! All elapsed-time arithmetic is wraparound-safe, so the engine keeps working
//! across the counter's 71-minute wrap.

#[macro_use]
mod fmt;

pub mod aggregate;
pub mod analogue;
pub mod config;
pub mod debounce;
pub mod digital;
pub mod engine;
pub mod hal;
pub mod layout;
pub mod report;
pub mod status;
pub mod time;
pub mod timer;
pub mod types;

pub use aggregate::ButtonState;
pub use analogue::{ADC_MAX, ADC_MIDPOINT, AnalogueInputChannel, TEMPERATURE_SENSOR_CHANNEL};
pub use config::{
    AdcConstraints, AnalogueSource, ConfigError, DigitalInputConfig, OutputRole, PinConstraints,
    TimedOutputConfig, Topology, TopologyBuilder,
};
pub use debounce::{DEBOUNCE_WINDOW, DigitalInputChannel, Edge};
pub use digital::PinSnapshot;
pub use engine::{
    CycleSummary, EngineError, EngineState, FightStickEngine, HardwareFault, InputEngine,
};
pub use hal::{AnalogueConverter, DigitalPins, NoConverter};
pub use layout::{FightStickTopology, fight_stick};
pub use report::{GamepadSnapshot, ReportChain, ReportSink};
pub use status::{DeviceEvent, DeviceStatus};
pub use time::{Duration, Instant, TimeSource, elapsed};
pub use timer::TimedOutput;
pub use types::{ButtonMask, ChannelMapping, Direction, DpadMask, Level, PinId, Polarity};
