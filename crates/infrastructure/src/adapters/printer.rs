//! Printer adapters

use std::sync::{Mutex, PoisonError};

use rulecheck_application::ports::ResponsePrinter;

/// Prints diagnostic lines to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutPrinter;

impl StdoutPrinter {
    /// Creates a new `StdoutPrinter`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ResponsePrinter for StdoutPrinter {
    #[allow(clippy::print_stdout)]
    fn print_line(&self, line: &str) {
        println!("{line}");
    }
}

/// Keeps printed lines in memory.
#[derive(Debug, Default)]
pub struct CapturePrinter {
    lines: Mutex<Vec<String>>,
}

impl CapturePrinter {
    /// Creates an empty capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines printed so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ResponsePrinter for CapturePrinter {
    fn print_line(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_capture_keeps_order() {
        let printer = CapturePrinter::new();
        printer.print_line("Test case: first");
        printer.print_line("Response: null");

        assert_eq!(
            printer.lines(),
            vec!["Test case: first".to_string(), "Response: null".to_string()]
        );
    }
}
