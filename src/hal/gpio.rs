use avr_device::attiny85::PORTB;
use core::marker::PhantomData;

pub trait PinMode {}
pub struct Input;
pub struct Output;
impl PinMode for Input {}
impl PinMode for Output {}

/// PORTB pin `P`
pub struct Pin<const P: u8, MODE> {
    _mode: PhantomData<MODE>,
}

impl<const P: u8, MODE: PinMode> Pin<P, MODE> {
    pub fn into_output(self) -> Pin<P, Output> {
        // Set DDRB bit
        unsafe {
            (*PORTB::ptr()).ddrb.modify(|r, w| w.bits(r.bits() | (1 << P)));
        }
        Pin { _mode: PhantomData }
    }
}

impl<const P: u8> Pin<P, Output> {
    #[inline]
    pub fn set_high(&mut self) {
        unsafe {
            (*PORTB::ptr()).portb.modify(|r, w| w.bits(r.bits() | (1 << P)));
        }
    }

    #[inline]
    pub fn set_low(&mut self) {
        unsafe {
            (*PORTB::ptr()).portb.modify(|r, w| w.bits(r.bits() & !(1 << P)));
        }
    }
}

/// PB0..PB4, PB5 stays RESET
pub struct Pins {
    pub pb0: Pin<0, Input>,
    pub pb1: Pin<1, Input>,
    pub pb2: Pin<2, Input>,
    pub pb3: Pin<3, Input>,
    pub pb4: Pin<4, Input>,
}

impl Pins {
    pub fn new(_portb: PORTB) -> Self {
        Self {
            pb0: Pin { _mode: PhantomData },
            pb1: Pin { _mode: PhantomData },
            pb2: Pin { _mode: PhantomData },
            pb3: Pin { _mode: PhantomData },
            pb4: Pin { _mode: PhantomData },
        }
    }
}

// Board pin assignment
pub mod board {
    use super::*;

    /// OC0A, also USI SDA
    pub type GREEN = Pin<0, Input>;
    /// OC0B
    pub type BLUE = Pin<1, Input>;
    /// Free pin used for the debug TX line
    pub type TX = Pin<3, Input>;
    /// OC1B
    pub type RED = Pin<4, Input>;
}
