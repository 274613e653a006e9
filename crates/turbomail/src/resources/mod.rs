//! API resource endpoints
//!
//! Thin, endpoint-specific wrappers over the dispatcher verbs. Endpoints
//! without a wrapper here are reachable through [`Client::get`],
//! [`Client::post`], [`Client::put`], and [`Client::delete`] directly.
//!
//! [`Client::get`]: crate::Client::get
//! [`Client::post`]: crate::Client::post
//! [`Client::put`]: crate::Client::put
//! [`Client::delete`]: crate::Client::delete

pub mod events;
pub mod messages;

pub use events::Events;
pub use messages::Messages;

use crate::client::Client;

/// Base trait for API resources.
pub trait Resource {
    /// Get a reference to the client.
    fn client(&self) -> &Client;
}
