use avr_device::attiny85::{CPU, WDT};
use avr_device::interrupt;

// MCUSR
const WDRF: u8 = 1 << 3;
// WDTCR
const WDE: u8 = 1 << 3;
const WDCE: u8 = 1 << 4;

pub struct Watchdog {
    wdt: WDT,
}

impl Watchdog {
    #[inline]
    pub fn new(wdt: WDT) -> Self {
        Self { wdt }
    }

    /// Stop the watchdog in case a previous reset left it running
    pub fn disable(&mut self, cpu: &CPU) {
        interrupt::free(|_| unsafe {
            // WDRF forces WDE on, clear it first
            cpu.mcusr.modify(|r, w| w.bits(r.bits() & !WDRF));
            // Timed sequence to disable watchdog
            self.wdt.wdtcr.modify(|r, w| w.bits(r.bits() | WDCE | WDE));
            self.wdt.wdtcr.write(|w| w.bits(0x00));
        });
    }
}
