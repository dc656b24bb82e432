//! The login handshake.
//!
//! Login is the one call that runs outside the session-stamped client
//! path: there is no session yet, and the thing being extracted is not a
//! body payload but the session identifier the server places in the
//! response envelope *header*.

use crate::client::check_response;
use crate::error::{Error, Result};
use crate::transport::Transport;
use polarion_protocol::envelope::{self, SoapOperation};
use polarion_protocol::session::LogInWithToken;

/// Trades an access token for a session identifier.
///
/// One round trip, no retries: any transport error, non-200 status,
/// malformed envelope, or missing session header is terminal and surfaced
/// to the caller as the corresponding [`Error`] variant.
pub async fn authenticate(
    transport: &dyn Transport,
    login_endpoint: &str,
    username: &str,
    access_token: &str,
) -> Result<String> {
    const OPERATION: &str = LogInWithToken::NAME;

    let request = LogInWithToken::new(username, access_token);
    let payload =
        envelope::write_request(None, &request).map_err(|source| Error::Encode {
            operation: OPERATION,
            source,
        })?;

    tracing::debug!(username, endpoint = login_endpoint, "logging in");

    let soap_action = format!("urn:{OPERATION}");
    let response = transport
        .post(login_endpoint, &soap_action, payload)
        .await
        .map_err(|source| Error::Transport {
            operation: OPERATION,
            source,
        })?;

    let envelope = check_response(OPERATION, &response)?;
    let session_id = envelope.session_id().ok_or(Error::MissingData {
        operation: OPERATION,
        what: "session header",
    })?;

    tracing::debug!(username, "session established");
    Ok(session_id.to_owned())
}
