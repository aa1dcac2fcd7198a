use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Pass CPU frequency for timing calculations (internal RC oscillator, CKDIV8 cleared)
    println!("cargo:rustc-env=MCU_FREQ_HZ=8000000");

    // Host builds only run the unit tests, so the AVR link flags are target-gated
    let target = env::var("TARGET").unwrap_or_default();
    if target.contains("avr") {
        println!("cargo:rustc-link-arg=-mmcu=attiny85");
        println!("cargo:warning=Building for ATtiny85 at 8MHz");
    }

    // Debug builds log over the soft TX line
    if env::var("PROFILE").map(|p| p == "debug").unwrap_or(false) {
        println!("cargo:rustc-cfg=feature=\"debug\"");
    }
}
