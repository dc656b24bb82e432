//! Client configuration and endpoint derivation.

use polarion_runtime::{DEFAULT_TIMEOUT, TransportConfig};
use std::time::Duration;

/// Configuration for [`Polarion::connect`](crate::Polarion::connect).
///
/// # Example
///
/// ```ignore
/// use polarion::PolarionConfig;
/// use std::time::Duration;
///
/// let config = PolarionConfig::new("https://polarion.example.com", "alice", "token")
///     .timeout(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone)]
pub struct PolarionConfig {
    /// Server base URL, e.g. `https://polarion.example.com`.
    pub base_url: String,
    pub username: String,
    /// Personal access token used by the `logInWithToken` handshake.
    pub access_token: String,
    /// Bounds every downstream call; defaults to 10 seconds.
    pub timeout: Duration,
    /// Disables TLS certificate verification. Defaults to off; opting in
    /// is a trust-boundary decision and should be limited to test
    /// installations with self-signed certificates.
    pub danger_accept_invalid_certs: bool,
}

impl PolarionConfig {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            access_token: access_token.into(),
            timeout: DEFAULT_TIMEOUT,
            danger_accept_invalid_certs: false,
        }
    }

    /// Overrides the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Explicitly opts out of TLS certificate verification.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.danger_accept_invalid_certs = accept;
        self
    }

    pub(crate) fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
            danger_accept_invalid_certs: self.danger_accept_invalid_certs,
        }
    }
}

/// The three service endpoint URLs derived from a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub session: String,
    pub tracker: String,
    pub test_management: String,
}

impl Endpoints {
    pub fn derive(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            session: format!("{base}/polarion/ws/services/SessionWebService?wsdl"),
            tracker: format!("{base}/polarion/ws/services/TrackerWebService?wsdl"),
            test_management: format!(
                "{base}/polarion/ws/services/TestManagementWebService?wsdl"
            ),
        }
    }
}
