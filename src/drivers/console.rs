use core::convert::Infallible;

use ufmt::{uDisplay, uWrite, uwrite};

/// Sink for builds without a log line
pub struct NullSink;

impl uWrite for NullSink {
    type Error = Infallible;

    fn write_str(&mut self, _s: &str) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Line-oriented log output over any `ufmt` writer
pub struct Console<W> {
    sink: W,
}

impl<W: uWrite> Console<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    // Logging is best effort, write errors are dropped
    pub fn write_str(&mut self, s: &str) {
        self.sink.write_str(s).ok();
    }

    pub fn write_line(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }

    pub fn write_u32(&mut self, val: u32) {
        uwrite!(&mut self.sink, "{}", val).ok();
    }

    // Debug helper - print hex value
    pub fn write_hex(&mut self, val: u8) {
        const HEX_CHARS: [u8; 16] = *b"0123456789ABCDEF";
        let digits = [HEX_CHARS[(val >> 4) as usize], HEX_CHARS[(val & 0xF) as usize]];
        if let Ok(s) = core::str::from_utf8(&digits) {
            self.write_str(s);
        }
    }

    pub fn info(&mut self, msg: &str) {
        self.write_str("[INF] ");
        self.write_line(msg);
    }

    // Print formatted debug info
    pub fn debug(&mut self, msg: &str, val: u8) {
        self.write_str("[DBG] ");
        self.write_str(msg);
        self.write_str(": 0x");
        self.write_hex(val);
        self.write_str("\r\n");
    }

    pub fn report<T: uDisplay + ?Sized>(&mut self, context: &str, err: &T) {
        uwrite!(&mut self.sink, "[ERR] {}: {}\r\n", context, err).ok();
    }

    pub fn release(self) -> W {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[derive(Default)]
    struct Capture(String);

    impl uWrite for Capture {
        type Error = Infallible;

        fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
            self.0.push_str(s);
            Ok(())
        }
    }

    #[test]
    fn debug_line_prints_hex() {
        let mut console = Console::new(Capture::default());
        console.debug("Level", 0xC8);
        assert_eq!(console.release().0, "[DBG] Level: 0xC8\r\n");
    }

    #[test]
    fn info_and_numbers() {
        let mut console = Console::new(Capture::default());
        console.info("Ready");
        console.write_u32(976);
        assert_eq!(console.release().0, "[INF] Ready\r\n976");
    }

    #[test]
    fn report_uses_display_impl() {
        let mut console = Console::new(Capture::default());
        console.report("startup", &Error::PeripheralsTaken);
        assert_eq!(
            console.release().0,
            "[ERR] startup: peripherals already taken\r\n"
        );
    }

    #[test]
    fn null_sink_swallows_everything() {
        let mut console = Console::new(NullSink);
        console.write_line("nothing");
        console.debug("x", 1);
        let _sink: NullSink = console.release();
    }
}
