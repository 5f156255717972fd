//! Shared test infrastructure for gamepad-core integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use gamepad_core::{
    ADC_MIDPOINT, AnalogueConverter, DigitalPins, Direction, GamepadSnapshot, Instant, Level,
    PinId, ReportSink, TimeSource,
};

// ============================================================================
// Mock Pin Bank
// ============================================================================

/// Mock GPIO bank. Every pin idles high, as if pulled up.
///
/// Input levels live in cells so a test can press switches while the engine
/// owns the bank.
pub struct MockPins {
    levels: Cell<u32>,
    fail_reads: Cell<bool>,
    reads: u32,
    writes: heapless::Vec<(PinId, Level), 64>,
    inputs: u32,
    outputs: u32,
    pull_ups: u32,
}

impl MockPins {
    pub fn new() -> Self {
        Self {
            levels: Cell::new(u32::MAX),
            fail_reads: Cell::new(false),
            reads: 0,
            writes: heapless::Vec::new(),
            inputs: 0,
            outputs: 0,
            pull_ups: 0,
        }
    }

    /// Grounds `pin` (pressed, for an active-low switch).
    pub fn press(&self, pin: PinId) {
        self.levels.set(self.levels.get() & !(1 << pin));
    }

    /// Lets `pin` float back high.
    pub fn release(&self, pin: PinId) {
        self.levels.set(self.levels.get() | (1 << pin));
    }

    pub fn set_levels(&self, levels: u32) {
        self.levels.set(levels);
    }

    /// Makes every following bulk read fail.
    pub fn fail_reads(&self) {
        self.fail_reads.set(true);
    }

    pub fn read_count(&self) -> u32 {
        self.reads
    }

    pub fn write_history(&self) -> &[(PinId, Level)] {
        &self.writes
    }

    pub fn last_write(&self, pin: PinId) -> Option<Level> {
        self.writes
            .iter()
            .rev()
            .find(|(p, _)| *p == pin)
            .map(|(_, level)| *level)
    }

    pub fn is_input(&self, pin: PinId) -> bool {
        self.inputs & (1 << pin) != 0
    }

    pub fn is_output(&self, pin: PinId) -> bool {
        self.outputs & (1 << pin) != 0
    }

    pub fn has_pull_up(&self, pin: PinId) -> bool {
        self.pull_ups & (1 << pin) != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockReadError;

impl DigitalPins for MockPins {
    type Error = MockReadError;

    fn read_all(&mut self) -> Result<u32, MockReadError> {
        self.reads += 1;
        if self.fail_reads.get() {
            return Err(MockReadError);
        }
        Ok(self.levels.get())
    }

    fn write_pin(&mut self, pin: PinId, level: Level) {
        let _ = self.writes.push((pin, level));
    }

    fn set_direction(&mut self, pin: PinId, direction: Direction) {
        match direction {
            Direction::Input => {
                self.inputs |= 1 << pin;
                self.outputs &= !(1 << pin);
            }
            Direction::Output => {
                self.outputs |= 1 << pin;
                self.inputs &= !(1 << pin);
            }
        }
    }

    fn enable_pull_up(&mut self, pin: PinId) {
        self.pull_ups |= 1 << pin;
    }
}

// ============================================================================
// Mock Converter
// ============================================================================

/// Mock ADC with one settable value per converter channel.
pub struct MockAdc {
    values: [Cell<u16>; 8],
    fail_reads: Cell<bool>,
    selected: u8,
    conversions: u32,
}

impl MockAdc {
    pub fn new() -> Self {
        Self {
            values: core::array::from_fn(|_| Cell::new(ADC_MIDPOINT)),
            fail_reads: Cell::new(false),
            selected: 0,
            conversions: 0,
        }
    }

    pub fn set(&self, channel: u8, raw: u16) {
        self.values[channel as usize].set(raw);
    }

    /// Makes every following conversion fail.
    pub fn fail_reads(&self) {
        self.fail_reads.set(true);
    }

    pub fn conversions(&self) -> u32 {
        self.conversions
    }
}

impl AnalogueConverter for MockAdc {
    type Error = MockReadError;

    fn select_channel(&mut self, channel: u8) {
        self.selected = channel;
    }

    fn read(&mut self) -> Result<u16, MockReadError> {
        self.conversions += 1;
        if self.fail_reads.get() {
            return Err(MockReadError);
        }
        self.values
            .get(self.selected as usize)
            .map(Cell::get)
            .ok_or(MockReadError)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock 32-bit microsecond counter with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<Instant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(ticks: u32) -> Self {
        Self {
            current_time: Cell::new(Instant::from_ticks(ticks)),
        }
    }

    /// Advance time by `micros`, wrapping like the hardware counter
    pub fn advance(&self, micros: u32) {
        let current = self.current_time.get().ticks();
        self.current_time
            .set(Instant::from_ticks(current.wrapping_add(micros)));
    }

    pub fn set(&self, ticks: u32) {
        self.current_time.set(Instant::from_ticks(ticks));
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Instant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Report Sink
// ============================================================================

/// Mock transport that records every submitted report.
pub struct MockSink {
    pub ready: bool,
    pub fail: bool,
    sent: heapless::Vec<(u8, GamepadSnapshot<4>), 16>,
}

impl MockSink {
    pub fn new() -> Self {
        Self {
            ready: true,
            fail: false,
            sent: heapless::Vec::new(),
        }
    }

    pub fn sent(&self) -> &[(u8, GamepadSnapshot<4>)] {
        &self.sent
    }

    pub fn sent_ids(&self) -> heapless::Vec<u8, 16> {
        self.sent.iter().map(|(id, _)| *id).collect()
    }
}

impl ReportSink<4> for MockSink {
    type Error = MockReadError;

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn submit(&mut self, report_id: u8, snapshot: &GamepadSnapshot<4>) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockReadError);
        }
        let _ = self.sent.push((report_id, *snapshot));
        Ok(())
    }
}
