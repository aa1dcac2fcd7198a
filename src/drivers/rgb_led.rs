//! RGB LED on three PWM compare outputs

use embedded_hal::PwmPin;

use crate::config::{BLUE_POLARITY, GREEN_POLARITY, RED_POLARITY};

/// How a brightness maps onto the compare register
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    /// Register value equals brightness
    Direct,
    /// Register value is `255 - brightness`
    Inverted,
}

impl Polarity {
    #[inline]
    pub const fn apply(self, brightness: u8) -> u8 {
        match self {
            Polarity::Direct => brightness,
            Polarity::Inverted => u8::MAX - brightness,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const OFF: Color = Color::gray(0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Same brightness on all three channels
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }
}

/// Anything that can show a color
pub trait RgbOutput {
    fn set(&mut self, color: Color);
}

/// One compare output plus its wiring polarity
pub struct Channel<P> {
    pin: P,
    polarity: Polarity,
}

impl<P: PwmPin<Duty = u8>> Channel<P> {
    pub fn new(pin: P, polarity: Polarity) -> Self {
        Self { pin, polarity }
    }

    #[inline]
    pub fn set(&mut self, brightness: u8) {
        self.pin.set_duty(self.polarity.apply(brightness));
    }

    /// Raw compare register value, for hardware self tests
    pub fn register(&self) -> u8 {
        self.pin.get_duty()
    }

    pub fn release(self) -> P {
        self.pin
    }
}

pub struct RgbLed<R, G, B> {
    red: Channel<R>,
    green: Channel<G>,
    blue: Channel<B>,
}

impl<R, G, B> RgbLed<R, G, B>
where
    R: PwmPin<Duty = u8>,
    G: PwmPin<Duty = u8>,
    B: PwmPin<Duty = u8>,
{
    pub fn new(red: Channel<R>, green: Channel<G>, blue: Channel<B>) -> Self {
        Self { red, green, blue }
    }

    /// Wiring of the ATtiny85 board: red direct, green and blue inverted
    pub fn attiny85(red: R, green: G, blue: B) -> Self {
        Self::new(
            Channel::new(red, RED_POLARITY),
            Channel::new(green, GREEN_POLARITY),
            Channel::new(blue, BLUE_POLARITY),
        )
    }

    /// Write all three channels. Takes effect on the next PWM period.
    pub fn set_color(&mut self, red: u8, green: u8, blue: u8) {
        self.red.set(red);
        self.green.set(green);
        self.blue.set(blue);
    }

    pub fn set_gray(&mut self, level: u8) {
        self.set_color(level, level, level);
    }

    /// Raw register values as (red, green, blue)
    pub fn registers(&self) -> (u8, u8, u8) {
        (self.red.register(), self.green.register(), self.blue.register())
    }

    pub fn release(self) -> (R, G, B) {
        (self.red.release(), self.green.release(), self.blue.release())
    }
}

impl<R, G, B> RgbOutput for RgbLed<R, G, B>
where
    R: PwmPin<Duty = u8>,
    G: PwmPin<Duty = u8>,
    B: PwmPin<Duty = u8>,
{
    fn set(&mut self, color: Color) {
        self.set_color(color.red, color.green, color.blue);
    }
}
