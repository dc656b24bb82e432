//! Wire types for the Polarion web-service protocol.
//!
//! This crate contains the types used for communication with a Polarion
//! server over its SOAP 1.1 web services. These types represent the
//! "protocol layer" - the shapes of data as they appear on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! - **Pure data**: No behavior beyond wire encoding/decoding
//! - **1:1 with the services**: One request/response pair per remote
//!   operation of the session, tracker, and test-management services
//! - **Namespace tolerant**: Decoding matches element local names, since
//!   the prefixes a server picks vary between installations
//!
//! The transport, session handling, and error taxonomy live in
//! `polarion-runtime`; the ergonomic client API is built on top of both
//! in `polarion-rs`.

pub mod envelope;
pub mod session;
pub mod test_management;
pub mod tracker;
pub mod types;
pub mod xml;

pub use envelope::{Fault, ResponseEnvelope, SessionHeader, SoapOperation, SoapReply};
pub use types::{EnumOptionId, SubterraUri, Text};
pub use xml::{Element, XmlError, XmlWriter};
