//! Core value types shared by every stage of the input cycle.

/// Hardware GPIO index.
pub type PinId = u8;

/// Electrical level of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    /// Returns `High` for `true`, `Low` for `false`.
    #[inline]
    pub const fn from_bool(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }

    #[inline]
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// Returns the opposite level.
    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl core::ops::Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        self.toggled()
    }
}

/// Which electrical level means "pressed" for a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Switch pulls the pin to ground against an internal pull-up.
    /// Low reads as pressed.
    #[default]
    ActiveLow,

    /// Switch drives the pin high. High reads as pressed.
    ActiveHigh,
}

impl Polarity {
    /// Normalizes a raw level to "pressed".
    #[inline]
    pub const fn is_pressed(self, level: Level) -> bool {
        match self {
            Polarity::ActiveLow => !level.is_high(),
            Polarity::ActiveHigh => level.is_high(),
        }
    }

    /// Whether the pin needs its internal pull-up enabled.
    #[inline]
    pub const fn needs_pull_up(self) -> bool {
        matches!(self, Polarity::ActiveLow)
    }
}

/// Pin direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

/// Bits contributed to the generic button bitset.
///
/// Named bits follow the common USB gamepad ordering (south face button is
/// bit 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMask(pub u32);

impl ButtonMask {
    pub const NONE: ButtonMask = ButtonMask(0);

    pub const SOUTH: ButtonMask = ButtonMask::bit(0);
    pub const EAST: ButtonMask = ButtonMask::bit(1);
    pub const C: ButtonMask = ButtonMask::bit(2);
    pub const NORTH: ButtonMask = ButtonMask::bit(3);
    pub const WEST: ButtonMask = ButtonMask::bit(4);
    pub const Z: ButtonMask = ButtonMask::bit(5);
    pub const TL: ButtonMask = ButtonMask::bit(6);
    pub const TR: ButtonMask = ButtonMask::bit(7);
    pub const TL2: ButtonMask = ButtonMask::bit(8);
    pub const TR2: ButtonMask = ButtonMask::bit(9);
    pub const SELECT: ButtonMask = ButtonMask::bit(10);
    pub const START: ButtonMask = ButtonMask::bit(11);
    pub const MODE: ButtonMask = ButtonMask::bit(12);
    pub const THUMBL: ButtonMask = ButtonMask::bit(13);
    pub const THUMBR: ButtonMask = ButtonMask::bit(14);

    /// Mask with only bit `index` set. Indices past 31 give an empty mask.
    #[inline]
    pub const fn bit(index: u8) -> Self {
        if index < 32 {
            ButtonMask(1 << index)
        } else {
            ButtonMask(0)
        }
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl core::ops::BitOr for ButtonMask {
    type Output = ButtonMask;

    fn bitor(self, rhs: ButtonMask) -> ButtonMask {
        ButtonMask(self.0 | rhs.0)
    }
}

/// Bits contributed to the directional bitset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DpadMask(pub u8);

impl DpadMask {
    pub const NONE: DpadMask = DpadMask(0);
    pub const UP: DpadMask = DpadMask(0x01);
    pub const DOWN: DpadMask = DpadMask(0x02);
    pub const LEFT: DpadMask = DpadMask(0x04);
    pub const RIGHT: DpadMask = DpadMask(0x08);

    /// Every legal direction bit.
    pub const ALL: DpadMask = DpadMask(0x0F);

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if no bit outside [`DpadMask::ALL`] is set.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 & !DpadMask::ALL.0 == 0
    }
}

impl core::ops::BitOr for DpadMask {
    type Output = DpadMask;

    fn bitor(self, rhs: DpadMask) -> DpadMask {
        DpadMask(self.0 | rhs.0)
    }
}

/// Which aggregate bitset a digital channel feeds.
///
/// A channel contributes to exactly one bitset, so a button mask and a dpad
/// mask can never both be non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelMapping {
    /// Feeds the generic button bitset.
    Button(ButtonMask),

    /// Feeds the directional bitset.
    Dpad(DpadMask),

    /// No mask attached. The channel is still sampled and debounced but the
    /// aggregator skips it.
    Unmapped,
}

impl ChannelMapping {
    /// Button bits for this channel, zero unless it is a button.
    #[inline]
    pub const fn button_mask(self) -> u32 {
        match self {
            ChannelMapping::Button(mask) => mask.0,
            _ => 0,
        }
    }

    /// Dpad bits for this channel, zero unless it is a direction.
    #[inline]
    pub const fn dpad_mask(self) -> u8 {
        match self {
            ChannelMapping::Dpad(mask) => mask.0,
            _ => 0,
        }
    }

    #[inline]
    pub const fn is_mapped(self) -> bool {
        !matches!(self, ChannelMapping::Unmapped)
    }
}
