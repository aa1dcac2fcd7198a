//! Configuration constants for the ATtiny85 RGB firmware

use crate::drivers::Polarity;

/// CPU frequency in Hz, from `build.rs`
pub const CPU_FREQ_HZ: u32 = parse_hz(env!("MCU_FREQ_HZ"));

/// Clock divider applied to both Timer0 and Timer1
pub const TIMER_PRESCALER: u32 = 8;

/// Timer0 counts per microsecond while free running in fast PWM
pub const TIMER0_COUNTS_PER_US: u32 = CPU_FREQ_HZ / TIMER_PRESCALER / 1_000_000;

/// Timer1 overflow rate: 8MHz / 8 / 256 = 3906 Hz, one overflow every 0.256ms
pub const OVERFLOW_HZ: u32 = CPU_FREQ_HZ / TIMER_PRESCALER / 256;

/// Overflows per nominal millisecond. 3906 Hz is rounded to 4 per ms, so the
/// derived clock runs about 2% slow.
pub const TICKS_PER_MS: u32 = 4;

/// Number of on/off toggles in the flash intro
pub const FLASH_TOGGLES: u8 = 20;

/// Flash intro gate in milliseconds
pub const FLASH_INTERVAL_MS: u16 = 250;

/// Flash level per remaining toggle (`remaining * FLASH_STEP`)
pub const FLASH_STEP: u8 = 10;

/// Ramp step interval in milliseconds
pub const RAMP_INTERVAL_MS: u16 = 10;

/// Timer1 overflow period in microseconds
pub const OVERFLOW_PERIOD_US: u32 = 1_000_000 / OVERFLOW_HZ;

/// Soft TX baud rate on PB3
pub const SOFT_TX_BAUD: u32 = 9600;

/// Duration of one soft TX bit in microseconds
pub const SOFT_TX_BIT_US: u32 = 1_000_000 / SOFT_TX_BAUD;

// Interrupts are masked for one TX bit at a time; a longer bit would drop ticks
const _: () = assert!(SOFT_TX_BIT_US < OVERFLOW_PERIOD_US);

/// Red drives OC1B in non-inverting mode
pub const RED_POLARITY: Polarity = Polarity::Direct;

/// Green drives OC0A in inverting mode
pub const GREEN_POLARITY: Polarity = Polarity::Inverted;

/// Blue drives OC0B in inverting mode
pub const BLUE_POLARITY: Polarity = Polarity::Inverted;

const fn parse_hz(digits: &str) -> u32 {
    let bytes = digits.as_bytes();
    let mut value = 0u32;
    let mut i = 0;
    while i < bytes.len() {
        value = value * 10 + (bytes[i] - b'0') as u32;
        i += 1;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_constants_match_board() {
        assert_eq!(CPU_FREQ_HZ, 8_000_000);
        assert_eq!(OVERFLOW_HZ, 3906);
        assert_eq!(TIMER0_COUNTS_PER_US, 1);
    }

    #[test]
    fn soft_tx_bit_fits_between_overflows() {
        assert_eq!(SOFT_TX_BIT_US, 104);
        assert_eq!(OVERFLOW_PERIOD_US, 256);
        assert!(SOFT_TX_BIT_US < OVERFLOW_PERIOD_US);
    }

    #[test]
    fn parses_decimal_frequency() {
        assert_eq!(parse_hz("16000000"), 16_000_000);
        assert_eq!(parse_hz("0"), 0);
    }
}
