//! Polarion Runtime - Transport, session handling, and login
//!
//! This crate provides the low-level runtime infrastructure for talking to
//! a Polarion server:
//!
//! - **Transport**: HTTP POST of envelope payloads, behind an object-safe
//!   trait so tests can substitute stubs
//! - **Authentication**: the `logInWithToken` handshake that trades an
//!   access token for a session identifier
//! - **Service client**: one generic dispatch point that stamps the shared
//!   session header onto every outgoing call and maps status/fault/decode
//!   failures into the error taxonomy
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ polarion-rs  │  Facade (Polarion, typed methods)
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │   runtime    │  This crate
//! │ ┌──────────┐ │
//! │ │ auth     │ │  login handshake
//! │ └──────────┘ │
//! │ ┌──────────┐ │
//! │ │ client   │ │  session-stamped dispatch
//! │ └──────────┘ │
//! │ ┌──────────┐ │
//! │ │ transport│ │  reqwest HTTP POST
//! │ └──────────┘ │
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │   protocol   │  Envelope codec + wire types
//! └──────────────┘
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export key types at crate root
pub use auth::authenticate;
pub use client::ServiceClient;
pub use error::{BoxError, Error, Result};
pub use transport::{
    DEFAULT_TIMEOUT, HttpTransport, Transport, TransportConfig, TransportResponse,
};

// The session header is defined with the wire types but owned by this
// layer's construction flow; re-export it for convenience.
pub use polarion_protocol::envelope::SessionHeader;
