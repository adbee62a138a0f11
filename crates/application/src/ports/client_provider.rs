//! Current client accessor port

use rulecheck_domain::ClientRecord;

/// Where a handler asks for the client of the current session.
pub trait ClientProvider: Send + Sync {
    /// Returns the current client, if one is available.
    fn current_client(&self) -> Option<ClientRecord>;
}

/// A client provider whose answer can be overridden for one case.
pub trait ClientInterceptor: ClientProvider {
    /// Makes [`ClientProvider::current_client`] return `client`.
    fn set_current_client(&self, client: ClientRecord);

    /// Whether an override is installed.
    fn is_intercepted(&self) -> bool;

    /// Removes the override.
    fn reset(&self);
}
