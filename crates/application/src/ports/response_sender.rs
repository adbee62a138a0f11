//! Response sender port

use rulecheck_domain::ApiResponse;

/// The capability a handler uses to send its response.
///
/// A well-behaved handler calls [`ResponseSender::send`] exactly once per
/// invocation.
pub trait ResponseSender: Send + Sync {
    /// Sends a response.
    fn send(&self, response: ApiResponse);
}

/// A response sender that remembers every call.
pub trait ResponseRecorder: ResponseSender {
    /// Responses sent since the last reset, in call order.
    fn calls(&self) -> Vec<ApiResponse>;

    /// Number of responses sent since the last reset.
    fn call_count(&self) -> usize {
        self.calls().len()
    }

    /// Forgets every recorded call.
    fn reset(&self);
}
