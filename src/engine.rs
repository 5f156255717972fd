//! The per-cycle input engine.
//!
//! [`InputEngine`] owns every channel, the pin bank and the converter, and
//! borrows the time source. The host loop calls [`InputEngine::cycle`] once
//! per iteration and then reads the aggregated state back out.

use crate::aggregate::ButtonState;
use crate::analogue::{ADC_MIDPOINT, AnalogueInputChannel};
use crate::config::{OutputRole, PinConstraints, Topology};
use crate::debounce::{DEBOUNCE_WINDOW, DigitalInputChannel};
use crate::digital::PinSnapshot;
use crate::hal::{AnalogueConverter, DigitalPins};
use crate::layout::{FIGHT_STICK_ANALOGUE, FIGHT_STICK_DIGITAL, FIGHT_STICK_OUTPUTS};
use crate::report::GamepadSnapshot;
use crate::status::{DeviceEvent, DeviceStatus};
use crate::time::{Duration, Instant, TimeSource};
use crate::timer::TimedOutput;
use crate::types::{Direction, DpadMask};
use heapless::Vec;

/// Lifecycle of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineState {
    /// Created but pins not yet configured.
    Uninitialised,
    /// Pins configured; cycles run.
    Running,
    /// A hardware read failed. Outputs hold their last level.
    Faulted,
}

/// Hardware primitive that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HardwareFault {
    /// Bulk read of the pin bank.
    DigitalRead,
    /// Conversion on an analogue channel.
    AnalogueRead,
}

/// Errors that can occur during engine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineError {
    /// Operation called from an invalid state.
    InvalidState {
        /// Which state the operation needs, e.g. "Running"
        expected: &'static str,
        /// The actual current state
        actual: EngineState,
    },
    /// A sampling primitive reported a fault. The engine is now `Faulted`.
    Hardware(HardwareFault),
}

impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EngineError::InvalidState { expected, actual } => {
                write!(
                    f,
                    "invalid state: expected {}, but engine is in {:?}",
                    expected, actual
                )
            }
            EngineError::Hardware(HardwareFault::DigitalRead) => {
                write!(f, "digital pin read failed")
            }
            EngineError::Hardware(HardwareFault::AnalogueRead) => {
                write!(f, "analogue conversion failed")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}

/// Outcome of one successful cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleSummary {
    /// Timestamp the cycle ran at.
    pub now: Instant,
    /// Time since the previous cycle (or since `init`).
    pub delta: Duration,
    /// True if the button or dpad bitset, or any narrowed axis, differs from
    /// the previous cycle.
    pub changed: bool,
}

/// Samples inputs and drives timed outputs for one controller.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `P` - Pin bank implementation
/// * `C` - Analogue converter implementation
/// * `T` - Time source implementation
/// * `D` - Maximum number of digital input channels
/// * `A` - Maximum number of analogue input channels
/// * `O` - Maximum number of timed outputs
pub struct InputEngine<'t, P, C, T, const D: usize, const A: usize, const O: usize>
where
    P: DigitalPins,
    C: AnalogueConverter,
    T: TimeSource,
{
    pins: P,
    adc: C,
    time_source: &'t T,
    constraints: PinConstraints,
    digital: Vec<DigitalInputChannel, D>,
    analogue: Vec<AnalogueInputChannel, A>,
    outputs: Vec<TimedOutput, O>,
    buttons: ButtonState,
    status: DeviceStatus,
    debounce_window: Duration,
    last_cycle: Instant,
    state: EngineState,
}

/// Engine sized for [`fight_stick`](crate::layout::fight_stick).
pub type FightStickEngine<'t, P, C, T> =
    InputEngine<'t, P, C, T, FIGHT_STICK_DIGITAL, FIGHT_STICK_ANALOGUE, FIGHT_STICK_OUTPUTS>;

impl<'t, P, C, T, const D: usize, const A: usize, const O: usize> InputEngine<'t, P, C, T, D, A, O>
where
    P: DigitalPins,
    C: AnalogueConverter,
    T: TimeSource,
{
    /// Creates an uninitialised engine from a validated topology.
    ///
    /// No hardware is touched until [`init`](Self::init).
    pub fn new(topology: &Topology<D, A, O>, pins: P, adc: C, time_source: &'t T) -> Self {
        let digital = topology
            .digital()
            .iter()
            .map(DigitalInputChannel::from_config)
            .collect();
        let analogue = topology
            .analogue()
            .iter()
            .copied()
            .map(AnalogueInputChannel::new)
            .collect();
        let outputs = topology
            .outputs()
            .iter()
            .map(TimedOutput::from_config)
            .collect();

        Self {
            pins,
            adc,
            time_source,
            constraints: *topology.pin_constraints(),
            digital,
            analogue,
            outputs,
            buttons: ButtonState::EMPTY,
            status: DeviceStatus::NotMounted,
            debounce_window: DEBOUNCE_WINDOW,
            last_cycle: Instant::from_ticks(0),
            state: EngineState::Uninitialised,
        }
    }

    /// Overrides the debounce window. Only useful before `init`.
    pub fn with_debounce_window(mut self, window: Duration) -> Self {
        self.debounce_window = window;
        self
    }

    /// Configures every pin and starts the clock.
    ///
    /// Inputs become inputs (with a pull-up when active-low) and outputs are
    /// driven to their initial level. Timed outputs count from now.
    ///
    /// Must be called from `Uninitialised` state.
    pub fn init(&mut self) -> Result<(), EngineError> {
        if self.state != EngineState::Uninitialised {
            return Err(EngineError::InvalidState {
                expected: "Uninitialised",
                actual: self.state,
            });
        }

        for channel in &self.digital {
            self.pins.set_direction(channel.pin(), Direction::Input);
            if channel.polarity().needs_pull_up() {
                self.pins.enable_pull_up(channel.pin());
            }
            if !channel.mapping().is_mapped() {
                warn!("GPIO {} ({}) has no mapping", channel.pin(), channel.name());
            }
        }

        for output in &self.outputs {
            self.pins.set_direction(output.pin(), Direction::Output);
            self.pins.write_pin(output.pin(), output.level());
        }

        self.last_cycle = self.time_source.now();
        self.state = EngineState::Running;

        info!(
            "engine running: {} digital, {} analogue, {} outputs",
            self.digital.len(),
            self.analogue.len(),
            self.outputs.len()
        );
        Ok(())
    }

    /// Runs one sampling cycle.
    ///
    /// Reads the pin bank and every analogue channel first. Only if all reads
    /// succeed are debounce, aggregation, analogue values and timers updated,
    /// so a failed read leaves the previous cycle's state untouched and no
    /// output is written.
    ///
    /// Must be called from `Running` state.
    ///
    /// # Errors
    /// * `InvalidState` - not initialised, or a previous cycle faulted
    /// * `Hardware` - a read failed; the engine is now `Faulted`
    pub fn cycle(&mut self) -> Result<CycleSummary, EngineError> {
        if self.state != EngineState::Running {
            return Err(EngineError::InvalidState {
                expected: "Running",
                actual: self.state,
            });
        }

        let now = self.time_source.now();

        let snapshot = match PinSnapshot::capture(&mut self.pins, &self.constraints) {
            Ok(snapshot) => snapshot,
            Err(_) => return Err(self.fault(HardwareFault::DigitalRead)),
        };
        let conversions = match self.convert_all() {
            Ok(conversions) => conversions,
            Err(fault) => return Err(self.fault(fault)),
        };

        for channel in self.digital.iter_mut() {
            if let Some(edge) = channel.sample(&snapshot, now, self.debounce_window) {
                debug!("GPIO {} {}", channel.pin(), edge);
            }
        }

        let previous = self.buttons;
        self.buttons = ButtonState::rebuild(self.digital.iter());

        let mut axes_changed = false;
        for (channel, raw) in self.analogue.iter_mut().zip(conversions) {
            let before = channel.axis_i8();
            channel.record(raw);
            axes_changed |= channel.axis_i8() != before;
        }

        let delta = now.duration_since(self.last_cycle);
        self.last_cycle = now;
        for output in self.outputs.iter_mut() {
            if let Some(level) = output.advance(delta) {
                self.pins.write_pin(output.pin(), level);
                trace!("GPIO {} -> {}", output.pin(), level);
            }
        }

        Ok(CycleSummary {
            now,
            delta,
            changed: self.buttons != previous || axes_changed,
        })
    }

    /// Applies a USB device-stack notification.
    ///
    /// Heartbeat outputs switch to the rate for the new status; their level
    /// and accumulated time are kept. Accepted in any state.
    pub fn handle_event(&mut self, event: DeviceEvent) -> DeviceStatus {
        let status = self.status.apply(event);
        if status != self.status {
            let interval = status.heartbeat_interval();
            for output in self.outputs.iter_mut() {
                if output.role() == OutputRole::Heartbeat {
                    output.set_duration(interval);
                }
            }
            debug!("{} -> {}, heartbeat {} us", self.status, status, interval.ticks());
            self.status = status;
        }
        status
    }

    /// Current aggregated state as a report snapshot.
    ///
    /// Axes follow topology order; extra axes stay centred and surplus
    /// channels are left out.
    pub fn snapshot<const AXES: usize>(&self) -> GamepadSnapshot<AXES> {
        let mut axes = [0i8; AXES];
        for (axis, channel) in axes.iter_mut().zip(self.analogue.iter()) {
            *axis = channel.axis_i8();
        }

        GamepadSnapshot {
            buttons: self.buttons.buttons(),
            dpad: self.buttons.dpad() & DpadMask::ALL.bits(),
            axes,
        }
    }

    pub fn button_state(&self) -> ButtonState {
        self.buttons
    }

    /// Generic button bitset from the last cycle.
    pub fn buttons(&self) -> u32 {
        self.buttons.buttons()
    }

    /// Dpad bitset from the last cycle.
    pub fn dpad(&self) -> u8 {
        self.buttons.dpad()
    }

    pub fn digital_channels(&self) -> &[DigitalInputChannel] {
        &self.digital
    }

    pub fn analogue_channels(&self) -> &[AnalogueInputChannel] {
        &self.analogue
    }

    pub fn outputs(&self) -> &[TimedOutput] {
        &self.outputs
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn status(&self) -> DeviceStatus {
        self.status
    }

    pub fn debounce_window(&self) -> Duration {
        self.debounce_window
    }

    pub fn pins(&self) -> &P {
        &self.pins
    }

    pub fn converter(&self) -> &C {
        &self.adc
    }

    /// Consumes the engine and returns its hardware.
    pub fn release(self) -> (P, C) {
        (self.pins, self.adc)
    }

    fn convert_all(&mut self) -> Result<[u16; A], HardwareFault> {
        let mut conversions = [ADC_MIDPOINT; A];
        for (slot, channel) in conversions.iter_mut().zip(self.analogue.iter()) {
            *slot = channel
                .convert(&mut self.adc)
                .map_err(|_| HardwareFault::AnalogueRead)?;
        }
        Ok(conversions)
    }

    fn fault(&mut self, fault: HardwareFault) -> EngineError {
        warn!("hardware fault: {}", fault);
        self.state = EngineState::Faulted;
        EngineError::Hardware(fault)
    }
}
