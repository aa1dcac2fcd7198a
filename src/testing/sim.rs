//! Register-level stand-in for a timer compare output

use core::cell::Cell;

use embedded_hal::PwmPin;

/// Compare register plus its output-enable bits
pub struct CompareRegister {
    value: Cell<u8>,
    enabled: Cell<bool>,
}

impl CompareRegister {
    /// Output enabled, register cleared, as after `hal::pwm::configure`
    pub const fn new() -> Self {
        Self {
            value: Cell::new(0),
            enabled: Cell::new(true),
        }
    }

    pub fn value(&self) -> u8 {
        self.value.get()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn pin(&self) -> SimPwm<'_> {
        SimPwm { reg: self }
    }
}

impl Default for CompareRegister {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SimPwm<'a> {
    reg: &'a CompareRegister,
}

impl PwmPin for SimPwm<'_> {
    type Duty = u8;

    fn disable(&mut self) {
        self.reg.enabled.set(false);
    }

    fn enable(&mut self) {
        self.reg.enabled.set(true);
    }

    fn get_duty(&self) -> u8 {
        self.reg.value.get()
    }

    fn get_max_duty(&self) -> u8 {
        u8::MAX
    }

    fn set_duty(&mut self, duty: u8) {
        self.reg.value.set(duty);
    }
}
