pub mod console;
pub mod rgb_led;

pub use console::{Console, NullSink};
pub use rgb_led::{Channel, Color, Polarity, RgbLed, RgbOutput};
