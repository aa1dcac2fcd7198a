//! Startup errors

use ufmt::{uDisplay, uWrite, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `Peripherals::take()` was already called
    PeripheralsTaken,
}

impl uDisplay for Error {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        match self {
            Error::PeripheralsTaken => f.write_str("peripherals already taken"),
        }
    }
}
