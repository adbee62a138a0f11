//! Recording response sender adapter

use std::sync::{Mutex, MutexGuard, PoisonError};

use rulecheck_application::ports::{ResponseRecorder, ResponseSender};
use rulecheck_domain::ApiResponse;

/// Response sender that keeps every sent response in memory.
#[derive(Debug, Default)]
pub struct RecordingSender {
    calls: Mutex<Vec<ApiResponse>>,
}

impl RecordingSender {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The handler may have panicked while holding the lock; the recorded
    /// list is still consistent then.
    fn lock(&self) -> MutexGuard<'_, Vec<ApiResponse>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ResponseSender for RecordingSender {
    fn send(&self, response: ApiResponse) {
        tracing::trace!(status = response.status_code, "response sent");
        self.lock().push(response);
    }
}

impl ResponseRecorder for RecordingSender {
    fn calls(&self) -> Vec<ApiResponse> {
        self.lock().clone()
    }

    fn call_count(&self) -> usize {
        self.lock().len()
    }

    fn reset(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_records_in_call_order() {
        let sender = RecordingSender::new();
        sender.send(ApiResponse::new(201));
        sender.send(ApiResponse::new(500));

        let codes: Vec<_> = sender.calls().iter().map(|r| r.status_code).collect();
        assert_eq!(codes, vec![201, 500]);
        assert_eq!(sender.call_count(), 2);
    }

    #[test]
    fn test_reset_forgets_calls() {
        let sender = RecordingSender::new();
        sender.send(ApiResponse::default());
        sender.reset();

        assert_eq!(sender.call_count(), 0);
        assert!(sender.calls().is_empty());
    }
}
