//! Reference wiring: an arcade fight stick on a Raspberry Pi Pico.
//!
//! | GPIO  | Switch                 | Maps to        |
//! |-------|------------------------|----------------|
//! | 0-3   | Up, Down, Right, Left  | dpad           |
//! | 4-11  | B1 B2 R2 L2 B3 B4 R1 L1| face/shoulder  |
//! | 12-13 | Aux 1, Aux 2           | unmapped       |
//! | 14-15 | S1, S2                 | select, start  |
//! | 16-17 | UART console           | reserved       |
//! | 18-20 | A1, A2, Insert Coin    | mode, extras   |
//! | 25    | onboard LED            | heartbeat      |
//! | 26-29 | potentiometers         | ADC 0-3        |
//!
//! Every switch is active-low against the internal pull-up.

use crate::config::{ConfigError, Topology};
use crate::types::{ButtonMask, ChannelMapping, DpadMask};

/// Digital channels on the reference stick.
pub const FIGHT_STICK_DIGITAL: usize = 19;

/// Analogue channels on the reference stick.
pub const FIGHT_STICK_ANALOGUE: usize = 4;

/// Timed outputs on the reference stick.
pub const FIGHT_STICK_OUTPUTS: usize = 1;

/// GPIO of the Pico's onboard LED.
pub const ONBOARD_LED: u8 = 25;

/// Topology sized for [`fight_stick`].
pub type FightStickTopology =
    Topology<FIGHT_STICK_DIGITAL, FIGHT_STICK_ANALOGUE, FIGHT_STICK_OUTPUTS>;

/// Button bit for A2.
pub const A2: ButtonMask = ButtonMask::bit(15);

/// Button bit for Insert Coin.
pub const INSERT_COIN: ButtonMask = ButtonMask::bit(16);

/// Builds the reference fight-stick topology.
pub fn fight_stick() -> Result<FightStickTopology, ConfigError> {
    use ChannelMapping::{Button, Dpad, Unmapped};

    FightStickTopology::builder()
        .digital(0, "Up", Dpad(DpadMask::UP))?
        .digital(1, "Down", Dpad(DpadMask::DOWN))?
        .digital(2, "Right", Dpad(DpadMask::RIGHT))?
        .digital(3, "Left", Dpad(DpadMask::LEFT))?
        .digital(4, "B1", Button(ButtonMask::SOUTH))?
        .digital(5, "B2", Button(ButtonMask::EAST))?
        .digital(6, "R2", Button(ButtonMask::TR2))?
        .digital(7, "L2", Button(ButtonMask::TL2))?
        .digital(8, "B3", Button(ButtonMask::WEST))?
        .digital(9, "B4", Button(ButtonMask::NORTH))?
        .digital(10, "R1", Button(ButtonMask::TR))?
        .digital(11, "L1", Button(ButtonMask::TL))?
        .digital(12, "Aux 1", Unmapped)?
        .digital(13, "Aux 2", Unmapped)?
        .digital(14, "S1", Button(ButtonMask::SELECT))?
        .digital(15, "S2", Button(ButtonMask::START))?
        .digital(18, "A1", Button(ButtonMask::MODE))?
        .digital(19, "A2", Button(A2))?
        .digital(20, "Insert Coin", Button(INSERT_COIN))?
        .analogue(26, 0)?
        .analogue(27, 1)?
        .analogue(28, 2)?
        .analogue(29, 3)?
        .heartbeat(ONBOARD_LED)?
        .build()
}
