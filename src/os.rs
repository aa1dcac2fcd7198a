//! System time tracking and step pacing
//!
//! The tick clock counts Timer1 overflows. On target the counter lives in a
//! critical-section mutex (see `hal::timer`); here it is plain data so the
//! same logic can be driven by hand in tests.

use core::cell::Cell;
use core::convert::Infallible;

use embedded_hal::blocking::delay::DelayMs;

use crate::config::TICKS_PER_MS;

/// Convert overflow ticks to approximate milliseconds
#[inline]
pub const fn ticks_to_millis(ticks: u32) -> u32 {
    ticks / TICKS_PER_MS
}

/// Overflow tick counter
pub struct TickCounter {
    tick_count: Cell<u32>,
}

impl TickCounter {
    pub const fn new() -> Self {
        Self {
            tick_count: Cell::new(0),
        }
    }

    /// Count one overflow. Wraps after 2^32 ticks.
    #[inline]
    pub fn tick(&self) {
        let count = self.tick_count.get();
        self.tick_count.set(count.wrapping_add(1));
    }

    #[inline]
    pub fn ticks(&self) -> u32 {
        self.tick_count.get()
    }

    #[inline]
    pub fn millis(&self) -> u32 {
        ticks_to_millis(self.ticks())
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Source of elapsed milliseconds
pub trait Clock {
    fn millis(&self) -> u32;
}

impl Clock for TickCounter {
    fn millis(&self) -> u32 {
        TickCounter::millis(self)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn millis(&self) -> u32 {
        (**self).millis()
    }
}

/// Gate that lets one visual step through per interval
pub trait Pacer {
    /// `Ok` once the current interval has passed, `WouldBlock` before that
    fn poll(&mut self) -> nb::Result<(), Infallible>;

    fn set_interval(&mut self, interval_ms: u16);
}

/// Pacer polling a [`Clock`]
pub struct ClockPacer<C> {
    clock: C,
    interval_ms: u16,
    last: u32,
}

impl<C: Clock> ClockPacer<C> {
    pub fn new(clock: C, interval_ms: u16) -> Self {
        let last = clock.millis();
        Self {
            clock,
            interval_ms,
            last,
        }
    }

    pub fn interval_ms(&self) -> u16 {
        self.interval_ms
    }
}

impl<C: Clock> Pacer for ClockPacer<C> {
    fn poll(&mut self) -> nb::Result<(), Infallible> {
        let now = self.clock.millis();
        if now.wrapping_sub(self.last) < u32::from(self.interval_ms) {
            return Err(nb::Error::WouldBlock);
        }
        self.last = now;
        Ok(())
    }

    // Keeps the last step time, so the next interval counts from it
    fn set_interval(&mut self, interval_ms: u16) {
        self.interval_ms = interval_ms;
    }
}

/// Pacer that blocks for the whole interval on every poll
pub struct DelayPacer<D> {
    delay: D,
    interval_ms: u16,
}

impl<D: DelayMs<u16>> DelayPacer<D> {
    pub fn new(delay: D, interval_ms: u16) -> Self {
        Self { delay, interval_ms }
    }

    pub fn interval_ms(&self) -> u16 {
        self.interval_ms
    }

    pub fn release(self) -> D {
        self.delay
    }
}

impl<D: DelayMs<u16>> Pacer for DelayPacer<D> {
    fn poll(&mut self) -> nb::Result<(), Infallible> {
        self.delay.delay_ms(self.interval_ms);
        Ok(())
    }

    fn set_interval(&mut self, interval_ms: u16) {
        self.interval_ms = interval_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OVERFLOW_HZ;
    use embedded_hal_mock::delay::MockNoop;

    fn tick_n(counter: &TickCounter, n: u32) {
        for _ in 0..n {
            counter.tick();
        }
    }

    #[test]
    fn one_second_of_overflows_reads_976ms() {
        let counter = TickCounter::new();
        tick_n(&counter, OVERFLOW_HZ);
        assert_eq!(counter.ticks(), 3906);
        assert_eq!(counter.millis(), 976);
    }

    #[test]
    fn millis_truncates_partial_milliseconds() {
        let counter = TickCounter::new();
        tick_n(&counter, 3);
        assert_eq!(counter.millis(), 0);
        counter.tick();
        assert_eq!(counter.millis(), 1);
    }

    #[test]
    fn counter_wraps_silently() {
        assert_eq!(ticks_to_millis(u32::MAX), u32::MAX / 4);

        let counter = TickCounter {
            tick_count: Cell::new(u32::MAX),
        };
        counter.tick();
        assert_eq!(counter.ticks(), 0);
    }

    #[test]
    fn clock_pacer_waits_for_interval() {
        let counter = TickCounter::new();
        let mut pacer = ClockPacer::new(&counter, 10);

        // 9ms
        tick_n(&counter, 36);
        assert_eq!(pacer.poll(), Err(nb::Error::WouldBlock));

        // 10ms
        tick_n(&counter, 4);
        assert_eq!(pacer.poll(), Ok(()));
        assert_eq!(pacer.poll(), Err(nb::Error::WouldBlock));

        tick_n(&counter, 40);
        assert_eq!(pacer.poll(), Ok(()));
    }

    struct ManualClock(Cell<u32>);

    impl Clock for ManualClock {
        fn millis(&self) -> u32 {
            self.0.get()
        }
    }

    #[test]
    fn clock_pacer_counts_across_wrap() {
        let clock = ManualClock(Cell::new(u32::MAX - 1));
        let mut pacer = ClockPacer::new(&clock, 5);

        clock.0.set(2);
        assert_eq!(pacer.poll(), Err(nb::Error::WouldBlock));

        clock.0.set(3);
        assert_eq!(pacer.poll(), Ok(()));
    }

    #[test]
    fn tick_wrap_releases_a_step_early() {
        let counter = TickCounter {
            tick_count: Cell::new(u32::MAX - 3),
        };
        let mut pacer = ClockPacer::new(&counter, 10);

        // millis drops from u32::MAX / 4 to 0, which reads as a huge gap
        tick_n(&counter, 4);
        assert_eq!(counter.ticks(), 0);
        assert_eq!(pacer.poll(), Ok(()));
        assert_eq!(pacer.poll(), Err(nb::Error::WouldBlock));
    }

    #[test]
    fn interval_change_keeps_last_step() {
        let counter = TickCounter::new();
        let mut pacer = ClockPacer::new(&counter, 250);

        tick_n(&counter, 250 * 4);
        assert_eq!(pacer.poll(), Ok(()));

        pacer.set_interval(10);
        assert_eq!(pacer.interval_ms(), 10);
        tick_n(&counter, 9 * 4);
        assert_eq!(pacer.poll(), Err(nb::Error::WouldBlock));
        tick_n(&counter, 4);
        assert_eq!(pacer.poll(), Ok(()));
    }

    #[test]
    fn delay_pacer_never_blocks_the_caller() {
        let mut pacer = DelayPacer::new(MockNoop::new(), 10);
        for _ in 0..3 {
            assert_eq!(pacer.poll(), Ok(()));
        }
        pacer.set_interval(250);
        assert_eq!(pacer.interval_ms(), 250);
        let _delay: MockNoop = pacer.release();
    }
}
