//! Three-channel hardware PWM breathing light for the ATtiny85
//!
//! Red is driven from Timer1 (OC1B on PB4), green and blue from Timer0
//! (OC0A on PB0, OC0B on PB1). The register layer in `hal` only exists when
//! building for AVR; everything above it is target independent and runs on
//! the host under test.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

pub mod application;
pub mod config;
pub mod drivers;
pub mod error;
pub mod os;
pub mod testing;

#[cfg(target_arch = "avr")]
pub mod hal;

pub use application::{Application, Phase};
pub use error::Error;
