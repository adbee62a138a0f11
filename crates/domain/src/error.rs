//! Domain error types

use thiserror::Error;

/// The first field-level problem found in a single rule.
///
/// The display text is what ends up in the `error` key of a rule diagnostic.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RuleViolation {
    /// The rule itself is not a JSON object.
    #[error("Rule must be an object")]
    NotAnObject,

    /// `description` is missing or not a string.
    #[error("Description must be a string")]
    Description,

    /// `event` is not an object.
    #[error("Event must be an object")]
    Event,

    /// `event.service` is missing or not a string.
    #[error("Event service must be a string")]
    EventService,

    /// `event.entity` is missing or not a string.
    #[error("Event entity must be a string")]
    EventEntity,

    /// `event.event` is missing or not a string.
    #[error("Event name must be a string")]
    EventName,

    /// `event.client` is present but not a string.
    #[error("Event client must be a string")]
    EventClient,

    /// `event.id` is present but neither a string nor a number.
    #[error("Event ID must be a string or a number")]
    EventId,

    /// `request` is present but not an object.
    #[error("Request must be an object")]
    Request,

    /// `request.headers` is present but not an object.
    #[error("Request headers must be an object")]
    RequestHeaders,

    /// `request.method` is present but not a string.
    #[error("Request method must be a string")]
    RequestMethod,

    /// `session` is neither a boolean nor an object.
    #[error("Session must be an object or a boolean")]
    Session,

    /// `client` is present but not an object.
    #[error("Client must be an object")]
    Client,

    /// `responseCode` or `response.code` is present but not a number.
    #[error("Response code must be a number")]
    ResponseCode,

    /// `response` is missing (request rules) or not an object.
    #[error("Response must be an object")]
    Response,

    /// A status code is a number but not a whole number that fits a `u16`.
    #[error("Response code must be a valid status code")]
    ResponseStatus,

    /// `response.headers` is not an object.
    #[error("Response headers must be an object")]
    ResponseHeaders,

    /// `response.strictHeaders` is not an object.
    #[error("Response strict headers must be an object")]
    ResponseStrictHeaders,

    /// `response.cookies` is not an object.
    #[error("Response cookies must be an object")]
    ResponseCookies,

    /// `response.strictCookies` is not an object.
    #[error("Response strict cookies must be an object")]
    ResponseStrictCookies,

    /// `printResponse` is present but not a boolean.
    #[error("Print response must be a boolean")]
    PrintResponse,

    /// `only` is present but not a boolean.
    #[error("Only must be a boolean")]
    Only,

    /// `before` does not name a registered hook.
    #[error("Before hook must reference a registered hook")]
    BeforeHook,

    /// `after` does not name a registered hook.
    #[error("After hook must reference a registered hook")]
    AfterHook,
}

/// Result type alias for rule parsing.
pub type RuleResult<T> = Result<T, RuleViolation>;
