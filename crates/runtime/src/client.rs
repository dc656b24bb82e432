//! Session-stamped dispatch of typed operations.

use crate::error::{Error, Result};
use crate::transport::{Transport, TransportResponse};
use polarion_protocol::envelope::{self, ResponseEnvelope, SessionHeader, SoapOperation, SoapReply};
use std::sync::Arc;

/// A client bound to one service endpoint.
///
/// All service clients of one `Polarion` handle share the same transport
/// and the same [`SessionHeader`] allocation; the header is the only
/// thing tying a call to the authenticated session.
#[derive(Clone)]
pub struct ServiceClient {
    endpoint: String,
    transport: Arc<dyn Transport>,
    session_header: Arc<SessionHeader>,
}

impl ServiceClient {
    pub fn new(
        endpoint: impl Into<String>,
        transport: Arc<dyn Transport>,
        session_header: Arc<SessionHeader>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
            session_header,
        }
    }

    /// The endpoint URL this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The shared session header stamped onto every call.
    pub fn session_header(&self) -> &Arc<SessionHeader> {
        &self.session_header
    }

    /// Dispatches one operation and decodes its typed reply.
    pub async fn call<O, R>(&self, operation: &O) -> Result<R>
    where
        O: SoapOperation + Sync,
        R: SoapReply,
    {
        let payload = envelope::write_request(Some(&self.session_header), operation)
            .map_err(|source| Error::Encode {
                operation: O::NAME,
                source,
            })?;

        tracing::debug!(operation = O::NAME, endpoint = %self.endpoint, "dispatching request");

        let soap_action = format!("urn:{}", O::NAME);
        let response = self
            .transport
            .post(&self.endpoint, &soap_action, payload)
            .await
            .map_err(|source| Error::Transport {
                operation: O::NAME,
                source,
            })?;

        let envelope = check_response(O::NAME, &response)?;
        match envelope.reply::<R>() {
            Ok(Some(reply)) => Ok(reply),
            Ok(None) => Err(Error::MissingData {
                operation: O::NAME,
                what: "response payload",
            }),
            Err(source) => Err(Error::Decode {
                operation: O::NAME,
                source,
            }),
        }
    }
}

/// Applies the shared status/fault policy to a raw response.
///
/// Faults normally ride on a 500, so a non-200 body is first tried as a
/// fault envelope before being reduced to a bare status error. A fault in
/// a 200 body is an error too.
pub(crate) fn check_response(
    operation: &'static str,
    response: &TransportResponse,
) -> Result<ResponseEnvelope> {
    if response.status != 200 {
        if let Ok(envelope) = ResponseEnvelope::parse(&response.body) {
            if let Some(fault) = envelope.fault() {
                return Err(Error::Fault {
                    operation,
                    code: fault.code,
                    reason: fault.reason,
                });
            }
        }
        return Err(Error::Status {
            operation,
            status: response.status,
        });
    }

    let envelope = ResponseEnvelope::parse(&response.body).map_err(|source| Error::Decode {
        operation,
        source,
    })?;
    if let Some(fault) = envelope.fault() {
        return Err(Error::Fault {
            operation,
            code: fault.code,
            reason: fault.reason,
        });
    }
    Ok(envelope)
}
