//! Button-state aggregation.

use crate::debounce::DigitalInputChannel;
use crate::types::{ButtonMask, DpadMask};

/// Button and dpad bitsets derived from accepted channel levels.
///
/// Rebuilt from scratch every cycle: a bit is set exactly when some channel
/// carrying it is currently accepted as pressed. Nothing carries over from a
/// previous cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    buttons: u32,
    dpad: u8,
}

impl ButtonState {
    /// Nothing pressed.
    pub const EMPTY: ButtonState = ButtonState {
        buttons: 0,
        dpad: 0,
    };

    /// ORs together the masks of every accepted-pressed channel.
    ///
    /// Unmapped channels contribute nothing.
    pub fn rebuild<'a, I>(channels: I) -> Self
    where
        I: IntoIterator<Item = &'a DigitalInputChannel>,
    {
        let mut state = ButtonState::EMPTY;
        for channel in channels {
            if !channel.is_pressed() {
                continue;
            }
            state.buttons |= channel.button_mask();
            state.dpad |= channel.dpad_mask();
        }
        state
    }

    /// Generic button bitset.
    pub fn buttons(&self) -> u32 {
        self.buttons
    }

    /// Directional bitset.
    pub fn dpad(&self) -> u8 {
        self.dpad
    }

    /// True if every bit of `mask` is pressed.
    pub fn is_button_pressed(&self, mask: ButtonMask) -> bool {
        !mask.is_empty() && self.buttons & mask.bits() == mask.bits()
    }

    /// True if every bit of `mask` is pressed.
    pub fn is_dpad_pressed(&self, mask: DpadMask) -> bool {
        !mask.is_empty() && self.dpad & mask.bits() == mask.bits()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons == 0 && self.dpad == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Instant;
    use crate::debounce::DEBOUNCE_WINDOW;
    use crate::types::{ChannelMapping, Polarity};

    fn channel(pin: u8, mapping: ChannelMapping) -> DigitalInputChannel {
        DigitalInputChannel::new(pin, "", mapping, Polarity::ActiveLow)
    }

    fn press(channel: &mut DigitalInputChannel, pressed: bool, at: u32) {
        channel.debounce(pressed, Instant::from_ticks(at), DEBOUNCE_WINDOW);
    }

    #[test]
    fn only_pressed_channels_contribute() {
        let mut a = channel(0, ChannelMapping::Button(ButtonMask(0x01)));
        let b = channel(1, ChannelMapping::Button(ButtonMask(0x02)));
        press(&mut a, true, 10_000);

        let state = ButtonState::rebuild([&a, &b]);
        assert_eq!(state.buttons(), 0x01);
        assert_eq!(state.dpad(), 0);
    }

    #[test]
    fn released_channel_bit_does_not_persist() {
        let mut a = channel(0, ChannelMapping::Button(ButtonMask(0x01)));
        let mut b = channel(1, ChannelMapping::Button(ButtonMask(0x02)));
        press(&mut a, true, 10_000);
        press(&mut b, true, 10_000);
        assert_eq!(ButtonState::rebuild([&a, &b]).buttons(), 0x03);

        press(&mut b, false, 20_000);
        assert_eq!(ButtonState::rebuild([&a, &b]).buttons(), 0x01);
    }

    #[test]
    fn dpad_and_buttons_are_separate() {
        let mut up = channel(0, ChannelMapping::Dpad(DpadMask::UP));
        let mut left = channel(1, ChannelMapping::Dpad(DpadMask::LEFT));
        let mut start = channel(2, ChannelMapping::Button(ButtonMask::START));
        let mut aux = channel(3, ChannelMapping::Unmapped);
        for c in [&mut up, &mut left, &mut start, &mut aux] {
            press(c, true, 10_000);
        }

        let state = ButtonState::rebuild([&up, &left, &start, &aux]);
        assert_eq!(state.dpad(), 0x05);
        assert_eq!(state.buttons(), ButtonMask::START.bits());
        assert!(state.is_dpad_pressed(DpadMask::UP | DpadMask::LEFT));
        assert!(!state.is_dpad_pressed(DpadMask::DOWN));
        assert!(state.is_button_pressed(ButtonMask::START));
    }

    #[test]
    fn empty_mask_queries_are_false() {
        assert!(!ButtonState::EMPTY.is_button_pressed(ButtonMask::NONE));
        assert!(ButtonState::EMPTY.is_empty());
    }
}
