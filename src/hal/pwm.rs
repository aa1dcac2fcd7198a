//! PWM (Pulse Width Modulation) HAL implementation
//!
//! Timer0 runs fast PWM on both compare channels (OC0A on PB0, OC0B on PB1)
//! in inverting mode. Timer1 runs its PWM1B mode on OC1B (PB4). Both timers
//! are clocked at CPU/8, giving 3.9kHz at 8MHz.

use avr_device::attiny85::{TC0, TC1};
use embedded_hal::PwmPin;

use crate::hal::gpio::board::{BLUE, GREEN, RED};
use crate::hal::gpio::{Output, Pin};

// TCCR0A
const WGM00: u8 = 1 << 0;
const WGM01: u8 = 1 << 1;
const COM0B0: u8 = 1 << 4;
const COM0B1: u8 = 1 << 5;
const COM0A0: u8 = 1 << 6;
const COM0A1: u8 = 1 << 7;
// TCCR0B
const CS01: u8 = 1 << 1;
// GTCCR
const COM1B1: u8 = 1 << 5;
const PWM1B: u8 = 1 << 6;
// TCCR1
const CS12: u8 = 1 << 2;

/// The three compare outputs after [`configure`]
pub struct RgbPwm {
    pub red: Oc1b,
    pub green: Oc0a,
    pub blue: Oc0b,
}

/// Put both timers in PWM mode and claim the output pins
pub fn configure(tc0: &TC0, tc1: &TC1, red: RED, green: GREEN, blue: BLUE) -> RgbPwm {
    let red = red.into_output();
    let green = green.into_output();
    let blue = blue.into_output();

    unsafe {
        // Fast PWM, set OC0x on match and clear at TOP
        tc0.tccr0a
            .write(|w| w.bits(WGM01 | WGM00 | COM0A1 | COM0A0 | COM0B1 | COM0B0));
        tc0.tccr0b.write(|w| w.bits(CS01));

        // PWM on OC1B, clear on match and set at TOP
        tc1.gtccr.modify(|r, w| w.bits(r.bits() | PWM1B | COM1B1));
        tc1.tccr1.write(|w| w.bits(CS12));
    }

    RgbPwm {
        red: Oc1b { _pin: red },
        green: Oc0a { _pin: green },
        blue: Oc0b { _pin: blue },
    }
}

macro_rules! impl_pwm_pin {
    ($Name:ident, $P:literal, $TC:ident, $ctrl:ident, $ocr:ident, $com:expr) => {
        pub struct $Name {
            _pin: Pin<$P, Output>,
        }

        impl PwmPin for $Name {
            type Duty = u8;

            fn disable(&mut self) {
                unsafe {
                    (*$TC::ptr()).$ctrl.modify(|r, w| w.bits(r.bits() & !($com)));
                }
            }

            fn enable(&mut self) {
                unsafe {
                    (*$TC::ptr()).$ctrl.modify(|r, w| w.bits(r.bits() | ($com)));
                }
            }

            fn get_duty(&self) -> u8 {
                unsafe { (*$TC::ptr()).$ocr.read().bits() }
            }

            fn get_max_duty(&self) -> u8 {
                u8::MAX
            }

            #[inline]
            fn set_duty(&mut self, duty: u8) {
                unsafe {
                    (*$TC::ptr()).$ocr.write(|w| w.bits(duty));
                }
            }
        }
    };
}

impl_pwm_pin!(Oc0a, 0, TC0, tccr0a, ocr0a, COM0A1 | COM0A0);
impl_pwm_pin!(Oc0b, 1, TC0, tccr0a, ocr0b, COM0B1 | COM0B0);
impl_pwm_pin!(Oc1b, 4, TC1, gtccr, ocr1b, PWM1B | COM1B1);
