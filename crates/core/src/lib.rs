//! polarion: typed Rust client for the Polarion web services.
//!
//! This crate exposes Polarion's session, tracker, and test-management
//! SOAP services as typed async methods. Construction performs the login
//! handshake once; the resulting session identifier rides along on every
//! subsequent call.
//!
//! # Example
//!
//! ```ignore
//! use polarion::{Polarion, PolarionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Polarion::connect(PolarionConfig::new(
//!         "https://polarion.example.com",
//!         "alice",
//!         "personal-access-token",
//!     ))
//!     .await?;
//!
//!     let count = client.get_work_items_count("status:open").await?;
//!     println!("{count} open items");
//!     Ok(())
//! }
//! ```
//!
//! # Scope
//!
//! Plain request/response only: no retries, no caching, no pagination
//! beyond what the remote query operations offer, and no session refresh.
//! When the remote session expires, calls fail and the caller reconnects.

mod client;
mod config;
mod session;
mod test_management;
mod tracker;

pub use client::Polarion;
pub use config::{Endpoints, PolarionConfig};
pub use session::SessionService;
pub use test_management::TestManagementService;
pub use tracker::TrackerService;

// Re-export the layers the public API surfaces.
pub use polarion_protocol as protocol;
pub use polarion_runtime::{
    BoxError, Error, HttpTransport, Result, SessionHeader, Transport, TransportConfig,
    TransportResponse,
};
