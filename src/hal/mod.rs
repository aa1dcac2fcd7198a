pub mod gpio;
pub mod pwm;
pub mod timer;
pub mod watchdog;

#[cfg(feature = "debug")]
pub mod soft_uart;

// Re-export commonly used types
pub use gpio::{board, Input, Output, Pin, Pins};
pub use pwm::{configure as configure_pwm, Oc0a, Oc0b, Oc1b, RgbPwm};
pub use timer::TimerDelay;
#[cfg(not(feature = "busy-wait"))]
pub use timer::{start_tick_clock, SystemClock};
pub use watchdog::Watchdog;

#[cfg(feature = "debug")]
pub use soft_uart::SoftTx;
