//! Printer port

/// Destination of the per-case diagnostic lines.
pub trait ResponsePrinter: Send + Sync {
    /// Emits one line.
    fn print_line(&self, line: &str);
}
