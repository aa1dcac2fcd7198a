//! Self-test runner reporting over the console
//!
//! Runs on target from the `pwm_selftest` demo; [`sim`] holds the register
//! stand-ins used by host tests.

pub mod sim;

use ufmt::{uDisplay, uWrite, Formatter};

use crate::drivers::Console;

pub trait TestCase {
    fn run(&mut self) -> TestResult;
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestResult {
    Pass,
    Fail(TestError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestError {
    AssertionFailed(&'static str),
}

impl uDisplay for TestError {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        match self {
            TestError::AssertionFailed(what) => {
                f.write_str("assertion failed: ")?;
                f.write_str(what)
            }
        }
    }
}

pub struct TestRunner<W> {
    console: Console<W>,
    total_tests: u32,
    passed_tests: u32,
    current_suite: &'static str,
}

impl<W: uWrite> TestRunner<W> {
    pub fn new(console: Console<W>) -> Self {
        Self {
            console,
            total_tests: 0,
            passed_tests: 0,
            current_suite: "",
        }
    }

    /// Run every case in order. Returns true when all of them passed.
    pub fn run_suite(&mut self, name: &'static str, tests: &mut [&mut dyn TestCase]) -> bool {
        self.current_suite = name;
        self.console.write_str("=== Test Suite: ");
        self.console.write_str(name);
        self.console.write_line(" ===");

        let mut all_passed = true;
        for test in tests.iter_mut() {
            self.total_tests += 1;
            self.console.write_str("Running ");
            self.console.write_str(test.name());
            self.console.write_str(": ");

            match test.run() {
                TestResult::Pass => {
                    self.passed_tests += 1;
                    self.console.write_line("PASS");
                }
                TestResult::Fail(err) => {
                    all_passed = false;
                    self.console.report("FAIL", &err);
                }
            }
        }

        self.print_summary();
        all_passed
    }

    pub fn total_tests(&self) -> u32 {
        self.total_tests
    }

    pub fn passed_tests(&self) -> u32 {
        self.passed_tests
    }

    pub fn release(self) -> Console<W> {
        self.console
    }

    fn print_summary(&mut self) {
        self.console.write_str("Summary for ");
        self.console.write_str(self.current_suite);
        self.console.write_str(": ");
        self.console.write_u32(self.passed_tests);
        self.console.write_str("/");
        self.console.write_u32(self.total_tests);
        self.console.write_line(" passed");
    }
}

/// Fail the surrounding [`TestCase::run`] unless both sides are equal
#[macro_export]
macro_rules! check_eq {
    ($left:expr, $right:expr) => {
        if $left != $right {
            return $crate::testing::TestResult::Fail($crate::testing::TestError::AssertionFailed(
                concat!(stringify!($left), " == ", stringify!($right)),
            ));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    #[derive(Default)]
    struct Capture(String);

    impl uWrite for Capture {
        type Error = Infallible;

        fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
            self.0.push_str(s);
            Ok(())
        }
    }

    struct Fixed(u8);

    impl TestCase for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn run(&mut self) -> TestResult {
            check_eq!(self.0, 3);
            TestResult::Pass
        }
    }

    #[test]
    fn counts_passes_and_failures() {
        let mut runner = TestRunner::new(Console::new(Capture::default()));
        let mut good = Fixed(3);
        let mut bad = Fixed(4);

        assert!(!runner.run_suite("mixed", &mut [&mut good as &mut dyn TestCase, &mut bad]));
        assert_eq!(runner.total_tests(), 2);
        assert_eq!(runner.passed_tests(), 1);

        let log = runner.release().release().0;
        assert!(log.contains("Running fixed: PASS\r\n"));
        assert!(log.contains("[ERR] FAIL: assertion failed: self.0 == 3\r\n"));
        assert!(log.ends_with("Summary for mixed: 1/2 passed\r\n"));
    }

    #[test]
    fn all_passing_suite_reports_true() {
        let mut runner = TestRunner::new(Console::new(Capture::default()));
        let mut good = Fixed(3);
        assert!(runner.run_suite("ok", &mut [&mut good as &mut dyn TestCase]));
    }
}
