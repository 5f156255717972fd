//! Hand-off to the USB report layer.
//!
//! The engine produces a [`GamepadSnapshot`]; framing it into HID, XInput or
//! any other wire format is the job of a [`ReportSink`] implementation.

use crate::types::DpadMask;

/// Aggregated controller state for one report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GamepadSnapshot<const AXES: usize> {
    /// Generic button bitset.
    pub buttons: u32,

    /// Directional bitset, restricted to [`DpadMask::ALL`].
    pub dpad: u8,

    /// Analogue axes narrowed to signed 8-bit, centred on zero.
    pub axes: [i8; AXES],
}

impl<const AXES: usize> GamepadSnapshot<AXES> {
    /// Nothing pressed, every axis centred.
    pub const fn empty() -> Self {
        Self {
            buttons: 0,
            dpad: 0,
            axes: [0; AXES],
        }
    }

    /// True if the dpad holds only up/down/left/right bits.
    pub const fn has_valid_dpad(&self) -> bool {
        DpadMask(self.dpad).is_valid()
    }
}

impl<const AXES: usize> Default for GamepadSnapshot<AXES> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Transport that turns snapshots into reports.
pub trait ReportSink<const AXES: usize> {
    type Error: core::fmt::Debug;

    /// True when the transport can accept another report.
    fn is_ready(&self) -> bool;

    /// Encodes and queues one report.
    fn submit(&mut self, report_id: u8, snapshot: &GamepadSnapshot<AXES>)
    -> Result<(), Self::Error>;
}

/// A fixed run of consecutive report IDs.
///
/// The host loop sends [`start`](Self::start) and then, from the transport's
/// completion callback, whatever [`on_complete`](Self::on_complete) returns
/// until it returns `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportChain {
    first: u8,
    count: u8,
}

impl ReportChain {
    /// A chain of `count` IDs starting at `first`.
    pub const fn new(first: u8, count: u8) -> Self {
        Self { first, count }
    }

    /// ID of the first report in the chain.
    pub const fn start(&self) -> u8 {
        self.first
    }

    pub const fn len(&self) -> u8 {
        self.count
    }

    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// True if `report_id` belongs to this chain.
    pub const fn contains(&self, report_id: u8) -> bool {
        report_id >= self.first && ((report_id - self.first) as u16) < self.count as u16
    }

    /// Next ID after `sent`, or `None` once the chain is done.
    pub const fn on_complete(&self, sent: u8) -> Option<u8> {
        if !self.contains(sent) {
            return None;
        }
        let next = sent as u16 + 1;
        if next < self.first as u16 + self.count as u16 {
            Some(next as u8)
        } else {
            None
        }
    }

    /// Submits `snapshot` under `report_id` if the sink is ready.
    ///
    /// Returns whether a report went out.
    pub fn pump<S, const AXES: usize>(
        &self,
        sink: &mut S,
        report_id: u8,
        snapshot: &GamepadSnapshot<AXES>,
    ) -> Result<bool, S::Error>
    where
        S: ReportSink<AXES>,
    {
        if !sink.is_ready() {
            return Ok(false);
        }
        sink.submit(report_id, snapshot)?;
        Ok(true)
    }
}
