//! Time-gated edge detection for digital switches.
//!
//! Each channel stores only its accepted level and the instant that level was
//! accepted. A raw sample that disagrees with the accepted level is taken only
//! if the debounce window has elapsed since the last accepted change;
//! otherwise it is dropped without a trace. A channel that has never changed
//! has no window to wait out, so its first transition is taken at once. There is no pending state, so
//! bounces inside the window collapse to whatever level is present on the
//! first cycle after the window expires.

use crate::config::DigitalInputConfig;
use crate::digital::PinSnapshot;
use crate::time::{Duration, Instant};
use crate::types::{ChannelMapping, PinId, Polarity};

/// Minimum time between two accepted transitions on one channel.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_ticks(4_000);

/// An accepted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Pressed,
    Released,
}

/// One physical switch and its debounced state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitalInputChannel {
    pin: PinId,
    name: &'static str,
    mapping: ChannelMapping,
    polarity: Polarity,
    pressed: bool,
    last_change: Option<Instant>,
}

impl DigitalInputChannel {
    /// Creates a released channel with no accepted transition yet.
    pub const fn new(
        pin: PinId,
        name: &'static str,
        mapping: ChannelMapping,
        polarity: Polarity,
    ) -> Self {
        Self {
            pin,
            name,
            mapping,
            polarity,
            pressed: false,
            last_change: None,
        }
    }

    /// Creates a released channel from its configuration.
    pub const fn from_config(config: &DigitalInputConfig) -> Self {
        Self::new(config.pin, config.name, config.mapping, config.polarity)
    }

    /// Feeds one normalized raw sample through the debounce gate.
    ///
    /// Returns the accepted edge, or `None` if the sample matches the
    /// accepted level or arrived inside the window.
    pub fn debounce(&mut self, raw_pressed: bool, now: Instant, window: Duration) -> Option<Edge> {
        if raw_pressed == self.pressed {
            return None;
        }

        if self
            .last_change
            .is_some_and(|last_change| now.duration_since(last_change) < window)
        {
            return None;
        }

        self.pressed = raw_pressed;
        self.last_change = Some(now);

        Some(if raw_pressed {
            Edge::Pressed
        } else {
            Edge::Released
        })
    }

    /// Reads this channel's pin from `snapshot` and debounces it.
    #[inline]
    pub fn sample(&mut self, snapshot: &PinSnapshot, now: Instant, window: Duration) -> Option<Edge> {
        let raw_pressed = snapshot.is_pressed(self.pin, self.polarity);
        self.debounce(raw_pressed, now, window)
    }

    pub fn pin(&self) -> PinId {
        self.pin
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn mapping(&self) -> ChannelMapping {
        self.mapping
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Accepted (debounced) level.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Instant of the last accepted transition, `None` before the first.
    pub fn last_change(&self) -> Option<Instant> {
        self.last_change
    }

    pub fn button_mask(&self) -> u32 {
        self.mapping.button_mask()
    }

    pub fn dpad_mask(&self) -> u8 {
        self.mapping.dpad_mask()
    }
}
