//! Application layer: flash intro followed by the breathing ramp
//!
//! One control loop serves both timing strategies. Which [`Pacer`] is plugged
//! in decides whether steps are gated by the tick clock or by a blocking
//! delay; everything else is shared.

use core::convert::Infallible;

use ufmt::uWrite;

use crate::config::{FLASH_INTERVAL_MS, FLASH_STEP, RAMP_INTERVAL_MS};
use crate::drivers::{Color, Console, RgbOutput};
use crate::os::Pacer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Triangle wave over 0..=255, period 510 steps
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ramp {
    level: u8,
    direction: Direction,
}

impl Ramp {
    pub const fn new() -> Self {
        Self::starting_at(0, Direction::Up)
    }

    pub const fn starting_at(level: u8, direction: Direction) -> Self {
        Self { level, direction }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Move one step, turning around on reaching either bound
    pub fn step(&mut self) -> u8 {
        self.level = match self.direction {
            Direction::Up => self.level.saturating_add(1),
            Direction::Down => self.level.saturating_sub(1),
        };
        if self.level == u8::MAX {
            self.direction = Direction::Down;
        }
        if self.level == 0 {
            self.direction = Direction::Up;
        }
        self.level
    }
}

impl Default for Ramp {
    fn default() -> Self {
        Self::new()
    }
}

/// On/off toggles whose "on" level dims as the count runs down
///
/// Each toggle turns a lit LED off, or lights a dark one at
/// `remaining * FLASH_STEP`. Twenty toggles give 200, 0, 180, 0, .. 20, 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlashSequence {
    remaining: u8,
    level: u8,
}

impl FlashSequence {
    pub const fn new(toggles: u8) -> Self {
        Self {
            remaining: toggles,
            level: 0,
        }
    }

    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    /// Level shown by the last toggle
    pub fn level(&self) -> u8 {
        self.level
    }
}

impl Iterator for FlashSequence {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.remaining == 0 {
            return None;
        }
        self.level = if self.level != 0 {
            0
        } else {
            self.remaining.saturating_mul(FLASH_STEP)
        };
        self.remaining -= 1;
        Some(self.level)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Flash { remaining: u8 },
    Ramp,
}

/// Main application state and logic
pub struct Application<L, P, W> {
    led: L,
    pacer: P,
    console: Console<W>,
    flash: FlashSequence,
    ramp: Ramp,
    ramping: bool,
}

impl<L, P, W> Application<L, P, W>
where
    L: RgbOutput,
    P: Pacer,
    W: uWrite,
{
    /// Start black. With `flash_toggles == 0` the ramp begins right away.
    pub fn new(mut led: L, mut pacer: P, console: Console<W>, flash_toggles: u8) -> Self {
        led.set(Color::OFF);

        let ramping = flash_toggles == 0;
        pacer.set_interval(if ramping {
            RAMP_INTERVAL_MS
        } else {
            FLASH_INTERVAL_MS
        });

        Self {
            led,
            pacer,
            console,
            flash: FlashSequence::new(flash_toggles),
            ramp: Ramp::new(),
            ramping,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.ramping {
            Phase::Ramp
        } else {
            Phase::Flash {
                remaining: self.flash.remaining(),
            }
        }
    }

    pub fn ramp(&self) -> &Ramp {
        &self.ramp
    }

    /// Advance one step once the pacer allows it. Returns the level written.
    pub fn poll(&mut self) -> nb::Result<u8, Infallible> {
        self.pacer.poll()?;

        let level = if self.ramping {
            self.ramp.step()
        } else {
            self.flash_step()
        };
        self.led.set(Color::gray(level));
        Ok(level)
    }

    pub fn run(mut self) -> ! {
        loop {
            match nb::block!(self.poll()) {
                Ok(_) => {}
                Err(never) => match never {},
            }
        }
    }

    pub fn release(self) -> (L, P, Console<W>) {
        (self.led, self.pacer, self.console)
    }

    fn flash_step(&mut self) -> u8 {
        let level = self.flash.next().unwrap_or(0);
        if self.flash.remaining() == 0 {
            // Ramp continues from wherever the flash left the LED
            self.ramp = Ramp::starting_at(level, Direction::Up);
            self.ramping = true;
            self.pacer.set_interval(RAMP_INTERVAL_MS);
            self.console.debug("Ramp from", level);
        }
        level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::NullSink;
    use crate::os::{ClockPacer, TickCounter};

    #[test]
    fn ramp_is_a_symmetric_triangle() {
        let mut ramp = Ramp::new();
        for _ in 0..255 {
            ramp.step();
        }
        assert_eq!(ramp.level(), 255);
        assert_eq!(ramp.direction(), Direction::Down);

        for _ in 0..255 {
            ramp.step();
        }
        assert_eq!(ramp.level(), 0);
        assert_eq!(ramp.direction(), Direction::Up);
    }

    #[test]
    fn ramp_holds_at_the_top_when_started_there() {
        let mut ramp = Ramp::starting_at(255, Direction::Up);
        assert_eq!(ramp.step(), 255);
        assert_eq!(ramp.direction(), Direction::Down);
        assert_eq!(ramp.step(), 254);
    }

    #[test]
    fn ramp_never_overshoots() {
        let mut ramp = Ramp::new();
        let mut previous = ramp.level();
        for _ in 0..2000 {
            let level = ramp.step();
            assert_eq!(i16::from(level).abs_diff(i16::from(previous)), 1);
            previous = level;
        }
    }

    #[test]
    fn flash_levels_dim_every_other_toggle() {
        let levels: Vec<u8> = FlashSequence::new(20).collect();
        assert_eq!(levels.len(), 20);
        assert_eq!(&levels[..4], &[200, 0, 180, 0]);
        assert_eq!(&levels[16..], &[40, 0, 20, 0]);
        assert!(levels.iter().skip(1).step_by(2).all(|&level| level == 0));
    }

    #[test]
    fn flash_level_saturates_for_long_sequences() {
        let mut flash = FlashSequence::new(30);
        assert_eq!(flash.next(), Some(255));
        assert_eq!(flash.level(), 255);
    }

    #[derive(Default)]
    struct Recorder(Vec<Color>);

    impl RgbOutput for Recorder {
        fn set(&mut self, color: Color) {
            self.0.push(color);
        }
    }

    #[test]
    fn starts_black_and_waits_for_first_gate() {
        let counter = TickCounter::new();
        let pacer = ClockPacer::new(&counter, 0);
        let mut app = Application::new(Recorder::default(), pacer, Console::new(NullSink), 20);

        assert_eq!(app.phase(), Phase::Flash { remaining: 20 });
        assert_eq!(app.poll(), Err(nb::Error::WouldBlock));

        let (led, pacer, _) = app.release();
        assert_eq!(led.0, vec![Color::OFF]);
        assert_eq!(pacer.interval_ms(), FLASH_INTERVAL_MS);
    }

    #[test]
    fn odd_flash_count_ramps_up_from_last_level() {
        let counter = TickCounter::new();
        let pacer = ClockPacer::new(&counter, 0);
        let mut app = Application::new(Recorder::default(), pacer, Console::new(NullSink), 1);

        for _ in 0..250 * 4 {
            counter.tick();
        }
        assert_eq!(app.poll(), Ok(10));
        assert_eq!(app.phase(), Phase::Ramp);
        assert_eq!(app.ramp().level(), 10);

        for _ in 0..10 * 4 {
            counter.tick();
        }
        assert_eq!(app.poll(), Ok(11));
    }
}
