//! In-memory adapters for the application ports.

mod printer;
mod recording_sender;
mod stub_client;

pub use printer::{CapturePrinter, StdoutPrinter};
pub use recording_sender::RecordingSender;
pub use stub_client::StubClientProvider;

use std::sync::Arc;

use rulecheck_application::Sandbox;

/// Creates a sandbox backed by a fresh [`RecordingSender`] and
/// [`StubClientProvider`].
#[must_use]
pub fn in_memory_sandbox() -> Sandbox {
    Sandbox::new(
        Arc::new(RecordingSender::new()),
        Arc::new(StubClientProvider::new()),
    )
}
