//! Error types for the Polarion runtime.

use polarion_protocol::XmlError;
use thiserror::Error;

/// Boxed error used at the transport boundary.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when calling the Polarion web services.
///
/// Every variant names the remote operation it belongs to, so callers can
/// branch on kind and still see which call failed.
#[derive(Debug, Error)]
pub enum Error {
    /// A local precondition failed; no request was sent.
    #[error("{operation}: {message}")]
    InvalidArgument {
        operation: &'static str,
        message: String,
    },

    /// The request envelope could not be serialized.
    #[error("failed to encode {operation} request: {source}")]
    Encode {
        operation: &'static str,
        #[source]
        source: XmlError,
    },

    /// The response envelope could not be deserialized.
    #[error("failed to decode {operation} response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: XmlError,
    },

    /// Connection, DNS, TLS, or timeout failure.
    #[error("transport failure during {operation}: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    /// Non-success HTTP status with no parsable fault in the body.
    #[error("{operation} failed with HTTP status {status}")]
    Status {
        operation: &'static str,
        status: u16,
    },

    /// The server reported a fault for the operation.
    #[error("{operation} failed with remote fault {code}: {reason}")]
    Fault {
        operation: &'static str,
        code: String,
        reason: String,
    },

    /// The response was well-formed but lacked expected data.
    #[error("{operation} response is missing {what}")]
    MissingData {
        operation: &'static str,
        what: &'static str,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP transport: {source}")]
    TransportInit {
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// The remote operation this error belongs to, if any.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Error::InvalidArgument { operation, .. }
            | Error::Encode { operation, .. }
            | Error::Decode { operation, .. }
            | Error::Transport { operation, .. }
            | Error::Status { operation, .. }
            | Error::Fault { operation, .. }
            | Error::MissingData { operation, .. } => Some(operation),
            Error::TransportInit { .. } => None,
        }
    }

    /// Returns true if the server reported a fault.
    pub fn is_fault(&self) -> bool {
        matches!(self, Error::Fault { .. })
    }

    /// Returns true if the call was rejected locally, before any network
    /// request.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }

    /// Returns true if expected data was absent from an otherwise
    /// successful response.
    pub fn is_missing_data(&self) -> bool {
        matches!(self, Error::MissingData { .. })
    }
}
