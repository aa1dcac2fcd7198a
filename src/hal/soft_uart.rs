//! Transmit-only bit-banged UART on PB3
//!
//! The ATtiny85 has no hardware UART and its USI pins are taken by the PWM
//! outputs, so log lines go out 8N1 on the free pin. Bit timing comes from
//! the Timer0 counter, see [`TimerDelay`].

use core::convert::Infallible;

use avr_device::interrupt;
use embedded_hal::blocking::delay::DelayUs;
use ufmt::uWrite;

use crate::config::SOFT_TX_BIT_US;
use crate::hal::gpio::board::TX;
use crate::hal::gpio::{Output, Pin};
use crate::hal::timer::TimerDelay;

const BIT_US: u16 = SOFT_TX_BIT_US as u16;

pub struct SoftTx {
    pin: Pin<3, Output>,
    delay: TimerDelay,
}

impl SoftTx {
    pub fn new(pin: TX) -> Self {
        let mut pin = pin.into_output();
        // Line idles high
        pin.set_high();
        Self {
            pin,
            delay: TimerDelay::new(),
        }
    }

    pub fn write_byte(&mut self, byte: u8) {
        // Start bit, 8 data bits LSB first, stop bit
        let frame = (u16::from(byte) << 1) | (1 << 9);
        for bit in 0..10 {
            self.send_bit(frame & (1 << bit) != 0);
        }
    }

    // One bit per critical section, shorter than a Timer1 overflow period,
    // so a latched TOV1 is serviced between bits
    fn send_bit(&mut self, high: bool) {
        interrupt::free(|_| {
            if high {
                self.pin.set_high();
            } else {
                self.pin.set_low();
            }
            self.delay.delay_us(BIT_US);
        });
    }
}

impl uWrite for SoftTx {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        for byte in s.bytes() {
            self.write_byte(byte);
        }
        Ok(())
    }
}
