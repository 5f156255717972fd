//! Integration tests for topology validation

use gamepad_core::{
    AdcConstraints, AnalogueSource, ButtonMask, ChannelMapping, ConfigError, DpadMask, Duration,
    OutputRole, PinConstraints, TEMPERATURE_SENSOR_CHANNEL, Topology,
};

type Board = Topology<8, 5, 2>;

#[test]
fn duplicate_pin_across_channel_kinds() {
    let result = Board::builder()
        .digital(2, "Up", ChannelMapping::Dpad(DpadMask::UP))
        .unwrap()
        .output(2, Duration::from_ticks(100_000))
        .unwrap()
        .build();

    assert_eq!(result.unwrap_err(), ConfigError::DuplicatePin(2));
}

#[test]
fn duplicate_digital_pin() {
    let result = Board::builder()
        .digital(4, "B1", ChannelMapping::Button(ButtonMask::SOUTH))
        .unwrap()
        .digital(4, "B2", ChannelMapping::Button(ButtonMask::EAST))
        .unwrap()
        .build();

    assert_eq!(result.unwrap_err(), ConfigError::DuplicatePin(4));
}

#[test]
fn uart_pins_are_reserved() {
    let result = Board::builder()
        .digital(16, "Tx", ChannelMapping::Button(ButtonMask::SOUTH))
        .unwrap()
        .build();
    assert_eq!(result.unwrap_err(), ConfigError::ReservedPin(16));

    let result = Board::builder()
        .output(17, Duration::from_ticks(1_000))
        .unwrap()
        .build();
    assert_eq!(result.unwrap_err(), ConfigError::ReservedPin(17));
}

#[test]
fn digital_pin_outside_sampled_bank() {
    let result = Board::builder()
        .digital(24, "High", ChannelMapping::Button(ButtonMask::SOUTH))
        .unwrap()
        .build();
    assert_eq!(result.unwrap_err(), ConfigError::PinOutOfRange(24));

    let result = Board::builder()
        .digital(32, "Nowhere", ChannelMapping::Button(ButtonMask::SOUTH))
        .unwrap()
        .build();
    assert_eq!(result.unwrap_err(), ConfigError::PinOutOfRange(32));
}

#[test]
fn output_pin_outside_bank() {
    let result = Board::builder()
        .output(30, Duration::from_ticks(1_000))
        .unwrap()
        .build();
    assert_eq!(result.unwrap_err(), ConfigError::PinOutOfRange(30));
}

#[test]
fn custom_constraints_release_uart_pins() {
    let constraints = PinConstraints {
        reserved_mask: 0,
        ..PinConstraints::RP2040
    };
    let topology = Board::builder()
        .pin_constraints(constraints)
        .digital(16, "Extra", ChannelMapping::Button(ButtonMask::C))
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(topology.digital()[0].pin, 16);
    assert_eq!(topology.pin_constraints().sampled_mask() & (1 << 16), 1 << 16);
}

#[test]
fn analogue_pin_must_match_converter_channel() {
    let result = Board::builder().analogue(27, 0).unwrap().build();
    assert_eq!(result.unwrap_err(), ConfigError::PinNotAnalogueCapable(27));
}

#[test]
fn analogue_channel_must_exist() {
    let result = Board::builder().analogue(30, 4).unwrap().build();
    assert_eq!(result.unwrap_err(), ConfigError::InvalidConverterChannel(4));
}

#[test]
fn analogue_pin_collides_with_output() {
    let result = Board::builder()
        .analogue(26, 0)
        .unwrap()
        .output(26, Duration::from_ticks(1_000))
        .unwrap()
        .build();
    assert_eq!(result.unwrap_err(), ConfigError::DuplicatePin(26));
}

#[test]
fn temperature_sensor_needs_no_pin() {
    let topology = Board::builder()
        .analogue(26, 0)
        .unwrap()
        .analogue(29, 3)
        .unwrap()
        .temperature_sensor()
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(
        topology.analogue(),
        &[
            AnalogueSource::Pin { pin: 26, channel: 0 },
            AnalogueSource::Pin { pin: 29, channel: 3 },
            AnalogueSource::Internal {
                channel: TEMPERATURE_SENSOR_CHANNEL
            },
        ]
    );
}

#[test]
fn temperature_sensor_added_twice() {
    let result = Board::builder()
        .temperature_sensor()
        .unwrap()
        .temperature_sensor()
        .unwrap()
        .build();

    assert_eq!(
        result.unwrap_err(),
        ConfigError::DuplicateConverterChannel(TEMPERATURE_SENSOR_CHANNEL)
    );
    assert_eq!(
        ConfigError::DuplicateConverterChannel(4).to_string(),
        "converter channel 4 is read by more than one channel"
    );
}

#[test]
fn custom_adc_layout() {
    let adc = AdcConstraints {
        first_pin: 40,
        pin_channels: 8,
        temperature_channel: 8,
    };
    let result = Board::builder()
        .adc_constraints(adc)
        .analogue(41, 1)
        .unwrap()
        .build();

    assert_eq!(result.unwrap_err(), ConfigError::PinOutOfRange(41));
}

#[test]
fn heartbeat_and_fixed_outputs_coexist() {
    let topology = Board::builder()
        .heartbeat(25)
        .unwrap()
        .output(22, Duration::from_ticks(50_000))
        .unwrap()
        .build()
        .unwrap();

    let roles: Vec<_> = topology.outputs().iter().map(|o| o.role).collect();
    assert_eq!(roles, [OutputRole::Heartbeat, OutputRole::Fixed]);
}

#[test]
fn error_messages_name_the_pin() {
    assert_eq!(
        ConfigError::DuplicatePin(3).to_string(),
        "GPIO 3 is assigned to more than one channel"
    );
    assert_eq!(ConfigError::ReservedPin(16).to_string(), "GPIO 16 is reserved");
    assert_eq!(
        ConfigError::CapacityExceeded.to_string(),
        "topology capacity exceeded"
    );
}
