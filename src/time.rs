//! Wraparound-safe time primitives.
//!
//! The hardware timer is a free-running 32-bit microsecond counter that wraps
//! roughly every 71.6 minutes. Instants are therefore only meaningful relative
//! to each other, and every elapsed-time computation goes through [`elapsed`].

/// Microsecond duration backed by `fugit`.
pub type Duration = fugit::MicrosDurationU32;

/// Trait for abstracting the microsecond counter.
pub trait TimeSource {
    /// Returns the current counter value.
    fn now(&self) -> Instant;
}

/// A reading of the free-running microsecond counter.
///
/// Deliberately not `Ord`: after a wrap a later instant has a smaller tick
/// value, so ordering two instants says nothing about which came first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Instant(u32);

impl Instant {
    /// Creates an instant from a raw counter value.
    #[inline]
    pub const fn from_ticks(ticks: u32) -> Self {
        Instant(ticks)
    }

    /// Returns the raw counter value.
    #[inline]
    pub const fn ticks(self) -> u32 {
        self.0
    }

    /// Time elapsed from `earlier` to `self`, across at most one wrap.
    #[inline]
    pub const fn duration_since(self, earlier: Instant) -> Duration {
        Duration::from_ticks(elapsed(earlier.0, self.0))
    }

    /// Advances the instant, wrapping at the counter width.
    #[inline]
    pub const fn wrapping_add(self, duration: Duration) -> Self {
        Instant(self.0.wrapping_add(duration.ticks()))
    }
}

/// Microseconds from `start` to `end` on a wrapping 32-bit counter.
///
/// If `start <= end` this is plain subtraction; otherwise the counter wrapped
/// once and the result is `(u32::MAX - start) + end + 1`. Never overflows.
#[inline]
pub const fn elapsed(start: u32, end: u32) -> u32 {
    if start <= end {
        end - start
    } else {
        (u32::MAX - start) + end + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_without_wrap_is_plain_subtraction() {
        assert_eq!(elapsed(1_000, 5_000), 4_000);
        assert_eq!(elapsed(7, 7), 0);
    }

    #[test]
    fn elapsed_across_wrap() {
        assert_eq!(elapsed(4_294_967_290, 10), 16);
        assert_eq!(elapsed(u32::MAX, 0), 1);
    }

    #[test]
    fn elapsed_matches_wrapping_sub() {
        let samples = [
            (0u32, 0u32),
            (0, u32::MAX),
            (u32::MAX, u32::MAX - 1),
            (123_456, 42),
            (3_000_000_000, 1_000_000_000),
        ];
        for (start, end) in samples {
            assert_eq!(elapsed(start, end), end.wrapping_sub(start));
        }
    }

    #[test]
    fn duration_since_uses_wrapping_elapsed() {
        let before = Instant::from_ticks(u32::MAX - 1_999);
        let after = before.wrapping_add(Duration::from_ticks(6_000));

        assert_eq!(after.ticks(), 4_000);
        assert_eq!(after.duration_since(before), Duration::from_ticks(6_000));
    }
}
