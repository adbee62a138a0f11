//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the rule runner and its collaborators:
//! the handler under test, the response sender it calls, the client accessor
//! it consults, and where printed diagnostics go.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod client_provider;
mod handler;
mod printer;
mod response_sender;

pub use client_provider::{ClientInterceptor, ClientProvider};
pub use handler::{FnHandler, Handler, InvocationContext};
pub use printer::ResponsePrinter;
pub use response_sender::{ResponseRecorder, ResponseSender};
