//! Tick clock on the Timer1 overflow and delays on the Timer0 counter
//!
//! The busy-wait build paces with [`TimerDelay`] alone and carries no tick
//! counter or overflow handler.

use avr_device::attiny85::TC0;
use embedded_hal::blocking::delay::{DelayMs, DelayUs};

use crate::config::TIMER0_COUNTS_PER_US;

#[cfg(not(feature = "busy-wait"))]
pub use tick_clock::{start_tick_clock, SystemClock};

#[cfg(not(feature = "busy-wait"))]
mod tick_clock {
    use avr_device::attiny85::TC1;
    use avr_device::interrupt::{self, Mutex};

    use crate::os::{Clock, TickCounter};

    // TIFR / TIMSK
    const TOV1: u8 = 1 << 2;
    const TOIE1: u8 = 1 << 2;

    static TICKS: Mutex<TickCounter> = Mutex::new(TickCounter::new());

    /// Enable the Timer1 overflow interrupt. Counting starts once global
    /// interrupts are enabled.
    pub fn start_tick_clock(tc1: &TC1) {
        unsafe {
            // Writing one clears a pending overflow
            tc1.tifr.write(|w| w.bits(TOV1));
            tc1.timsk.modify(|r, w| w.bits(r.bits() | TOIE1));
        }
    }

    #[avr_device::interrupt(attiny85)]
    fn TIMER1_OVF() {
        // Non-blocking handler, other interrupts may nest
        unsafe { interrupt::enable() };
        interrupt::free(|cs| TICKS.borrow(cs).tick());
    }

    /// Milliseconds derived from the overflow count
    #[derive(Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn millis(&self) -> u32 {
            interrupt::free(|cs| TICKS.borrow(cs).millis())
        }
    }
}

/// Busy-wait delay polling the free-running Timer0 counter
pub struct TimerDelay {
    _private: (),
}

impl TimerDelay {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for TimerDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayUs<u16> for TimerDelay {
    fn delay_us(&mut self, us: u16) {
        let tc0 = unsafe { &*TC0::ptr() };
        let target = u32::from(us) * TIMER0_COUNTS_PER_US;

        let mut last = tc0.tcnt0.read().bits();
        let mut elapsed = 0u32;
        while elapsed < target {
            let now = tc0.tcnt0.read().bits();
            elapsed += u32::from(now.wrapping_sub(last));
            last = now;
        }
    }
}

impl DelayMs<u16> for TimerDelay {
    fn delay_ms(&mut self, ms: u16) {
        for _ in 0..ms {
            self.delay_us(1000);
        }
    }
}
