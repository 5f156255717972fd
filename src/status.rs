//! USB device status and the heartbeat rate that advertises it.

use crate::time::Duration;

/// Heartbeat half-period while the host has not enumerated the device.
pub const HEARTBEAT_NOT_MOUNTED: Duration = Duration::from_ticks(250_000);

/// Heartbeat half-period while mounted and active.
pub const HEARTBEAT_MOUNTED: Duration = Duration::from_ticks(1_000_000);

/// Heartbeat half-period while the bus is suspended.
pub const HEARTBEAT_SUSPENDED: Duration = Duration::from_ticks(2_500_000);

/// Connection state as reported by the USB device stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceStatus {
    #[default]
    NotMounted,
    Mounted,
    Suspended,
}

/// Notifications forwarded from the USB device stack's callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceEvent {
    Mounted,
    Unmounted,
    Suspended,
    Resumed,
}

impl DeviceStatus {
    /// Status after `event`.
    pub const fn apply(self, event: DeviceEvent) -> DeviceStatus {
        match event {
            DeviceEvent::Mounted | DeviceEvent::Resumed => DeviceStatus::Mounted,
            DeviceEvent::Unmounted => DeviceStatus::NotMounted,
            DeviceEvent::Suspended => DeviceStatus::Suspended,
        }
    }

    /// Heartbeat half-period for this status.
    pub const fn heartbeat_interval(self) -> Duration {
        match self {
            DeviceStatus::NotMounted => HEARTBEAT_NOT_MOUNTED,
            DeviceStatus::Mounted => HEARTBEAT_MOUNTED,
            DeviceStatus::Suspended => HEARTBEAT_SUSPENDED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resume_returns_to_mounted() {
        let status = DeviceStatus::NotMounted
            .apply(DeviceEvent::Mounted)
            .apply(DeviceEvent::Suspended)
            .apply(DeviceEvent::Resumed);
        assert_eq!(status, DeviceStatus::Mounted);
    }

    #[test]
    fn unmount_from_any_state() {
        assert_eq!(
            DeviceStatus::Suspended.apply(DeviceEvent::Unmounted),
            DeviceStatus::NotMounted
        );
    }

    #[test]
    fn slower_blink_when_idle() {
        assert!(
            DeviceStatus::Suspended.heartbeat_interval() > DeviceStatus::Mounted.heartbeat_interval()
        );
        assert!(
            DeviceStatus::Mounted.heartbeat_interval()
                > DeviceStatus::NotMounted.heartbeat_interval()
        );
    }
}
