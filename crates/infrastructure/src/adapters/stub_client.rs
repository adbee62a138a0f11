//! Stubbed current-client accessor

use std::sync::{Mutex, MutexGuard, PoisonError};

use rulecheck_application::ports::{ClientInterceptor, ClientProvider};
use rulecheck_domain::ClientRecord;

/// Client provider that answers with whatever client was installed.
///
/// Without an override there is no current client.
#[derive(Debug, Default)]
pub struct StubClientProvider {
    current: Mutex<Option<ClientRecord>>,
}

impl StubClientProvider {
    /// Creates a provider with no client installed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<ClientRecord>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ClientProvider for StubClientProvider {
    fn current_client(&self) -> Option<ClientRecord> {
        self.lock().clone()
    }
}

impl ClientInterceptor for StubClientProvider {
    fn set_current_client(&self, client: ClientRecord) {
        *self.lock() = Some(client);
    }

    fn is_intercepted(&self) -> bool {
        self.lock().is_some()
    }

    fn reset(&self) {
        *self.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_client_until_intercepted() {
        let provider = StubClientProvider::new();
        assert!(!provider.is_intercepted());
        assert_eq!(provider.current_client(), None);
    }

    #[test]
    fn test_override_and_reset() {
        let provider = StubClientProvider::new();
        provider.set_current_client(ClientRecord::with_id_and_code(5, "x"));

        assert!(provider.is_intercepted());
        assert_eq!(
            provider.current_client().and_then(|c| c.get("id").cloned()),
            Some(serde_json::json!(5))
        );
        assert_eq!(
            provider.current_client().and_then(|c| c.code().map(str::to_string)),
            Some("x".to_string())
        );

        provider.reset();
        assert_eq!(provider.current_client(), None);
    }
}
