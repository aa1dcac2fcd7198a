#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(target_arch = "avr")]
mod firmware {
    use panic_halt as _;

    use attiny85_rgb_pwm::application::Application;
    use attiny85_rgb_pwm::config;
    use attiny85_rgb_pwm::drivers::{Console, RgbLed};
    use attiny85_rgb_pwm::hal::{self, board, Pins, Watchdog};
    use attiny85_rgb_pwm::Error;
    use avr_device::attiny85::{Peripherals, TC1};

    #[cfg(feature = "debug")]
    fn console(pin: board::TX) -> Console<hal::SoftTx> {
        Console::new(hal::SoftTx::new(pin))
    }

    #[cfg(not(feature = "debug"))]
    fn console(_pin: board::TX) -> Console<attiny85_rgb_pwm::drivers::NullSink> {
        Console::new(attiny85_rgb_pwm::drivers::NullSink)
    }

    // Variant A: steps gated by the Timer1 tick clock, flash intro first
    #[cfg(not(feature = "busy-wait"))]
    fn pacer(tc1: &TC1) -> (attiny85_rgb_pwm::os::ClockPacer<hal::SystemClock>, u8) {
        hal::start_tick_clock(tc1);
        let pacer =
            attiny85_rgb_pwm::os::ClockPacer::new(hal::SystemClock, config::FLASH_INTERVAL_MS);
        (pacer, config::FLASH_TOGGLES)
    }

    // Variant B: fixed blocking delay per step, ramp only
    #[cfg(feature = "busy-wait")]
    fn pacer(_tc1: &TC1) -> (attiny85_rgb_pwm::os::DelayPacer<hal::TimerDelay>, u8) {
        let pacer =
            attiny85_rgb_pwm::os::DelayPacer::new(hal::TimerDelay::new(), config::RAMP_INTERVAL_MS);
        (pacer, 0)
    }

    #[avr_device::entry]
    fn main() -> ! {
        let dp = match Peripherals::take().ok_or(Error::PeripheralsTaken) {
            Ok(dp) => dp,
            Err(err) => halt(err),
        };

        let mut watchdog = Watchdog::new(dp.WDT);
        watchdog.disable(&dp.CPU);

        let pins = Pins::new(dp.PORTB);
        let pwm = hal::configure_pwm(&dp.TC0, &dp.TC1, pins.pb4, pins.pb0, pins.pb1);
        let mut console = console(pins.pb3);

        let (pacer, flash_toggles) = pacer(&dp.TC1);

        // Enable interrupts globally, only the tick clock needs them
        #[cfg(not(feature = "busy-wait"))]
        unsafe {
            avr_device::interrupt::enable()
        };

        console.info("ATtiny85 RGB PWM v0.1.0");
        console.debug("Flash toggles", flash_toggles);

        let led = RgbLed::attiny85(pwm.red, pwm.green, pwm.blue);
        Application::new(led, pacer, console, flash_toggles).run()
    }

    fn halt(err: Error) -> ! {
        // take() already failed, so nothing else owns the port
        let dp = unsafe { Peripherals::steal() };
        let mut console = console(Pins::new(dp.PORTB).pb3);
        console.report("Startup failed", &err);

        #[allow(clippy::empty_loop)]
        loop {}
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {}
