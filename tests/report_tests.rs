//! Integration tests for the report hand-off

mod common;
use common::*;

use gamepad_core::{
    ButtonMask, DpadMask, FightStickEngine, GamepadSnapshot, ReportChain, fight_stick,
};

#[test]
fn pump_waits_for_ready_sink() {
    let chain = ReportChain::new(1, 1);
    let mut sink = MockSink::new();
    sink.ready = false;

    let sent = chain.pump(&mut sink, chain.start(), &GamepadSnapshot::<4>::empty());
    assert_eq!(sent, Ok(false));
    assert!(sink.sent().is_empty());

    sink.ready = true;
    let sent = chain.pump(&mut sink, chain.start(), &GamepadSnapshot::<4>::empty());
    assert_eq!(sent, Ok(true));
    assert_eq!(sink.sent_ids().as_slice(), &[1]);
}

#[test]
fn sink_errors_propagate() {
    let chain = ReportChain::new(1, 1);
    let mut sink = MockSink::new();
    sink.fail = true;

    assert_eq!(
        chain.pump(&mut sink, 1, &GamepadSnapshot::<4>::empty()),
        Err(MockReadError)
    );
}

#[test]
fn completion_callbacks_walk_the_chain() {
    let chain = ReportChain::new(1, 3);
    let mut sink = MockSink::new();
    let snapshot = GamepadSnapshot::<4>::empty();

    let mut next = Some(chain.start());
    while let Some(id) = next {
        assert_eq!(chain.pump(&mut sink, id, &snapshot), Ok(true));
        next = chain.on_complete(id);
    }

    assert_eq!(sink.sent_ids().as_slice(), &[1, 2, 3]);
}

#[test]
fn engine_snapshot_reaches_sink() {
    let timer = MockTimeSource::new();
    let topology = fight_stick().unwrap();
    let adc = MockAdc::new();
    adc.set(2, 0);
    let mut engine = FightStickEngine::new(&topology, MockPins::new(), adc, &timer);
    engine.init().unwrap();

    engine.pins().press(1); // Down
    engine.pins().press(5); // B2
    timer.set(10_000);
    let summary = engine.cycle().unwrap();
    assert!(summary.changed);

    let chain = ReportChain::new(1, 1);
    let mut sink = MockSink::new();
    let snapshot = engine.snapshot::<4>();
    assert_eq!(chain.pump(&mut sink, chain.start(), &snapshot), Ok(true));

    let (id, report) = sink.sent()[0];
    assert_eq!(id, 1);
    assert_eq!(report.buttons, ButtonMask::EAST.bits());
    assert_eq!(report.dpad, DpadMask::DOWN.bits());
    assert_eq!(report.axes, [0, 0, -128, 0]);
    assert!(report.has_valid_dpad());
}
