//! Shared stub transport for the runtime's own tests.

use crate::error::BoxError;
use crate::transport::{Transport, TransportResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One captured outgoing request.
#[derive(Debug, Clone)]
pub(crate) struct CapturedRequest {
    pub url: String,
    pub soap_action: String,
    pub body: String,
}

enum Scripted {
    Respond(TransportResponse),
    Fail(String),
}

/// A transport that replays scripted responses and records every request.
///
/// When the script runs dry the last scripted entry repeats, so tests that
/// issue one kind of call do not need to count ahead.
pub(crate) struct StubTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<CapturedRequest>>,
}

impl StubTransport {
    fn with_script(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answers 200 with the given body.
    pub fn replying(body: String) -> Self {
        Self::with_script(vec![Scripted::Respond(TransportResponse {
            status: 200,
            body,
        })])
    }

    /// Always answers the given status and body.
    pub fn status(status: u16, body: &str) -> Self {
        Self::with_script(vec![Scripted::Respond(TransportResponse {
            status,
            body: body.to_owned(),
        })])
    }

    /// Always fails at the transport level.
    pub fn failing(message: &str) -> Self {
        Self::with_script(vec![Scripted::Fail(message.to_owned())])
    }

    /// Every request captured so far, in order.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn post(
        &self,
        url: &str,
        soap_action: &str,
        body: String,
    ) -> Result<TransportResponse, BoxError> {
        self.requests.lock().unwrap().push(CapturedRequest {
            url: url.to_owned(),
            soap_action: soap_action.to_owned(),
            body,
        });

        let mut script = self.script.lock().unwrap();
        let entry = if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            match script.front().unwrap() {
                Scripted::Respond(response) => Scripted::Respond(response.clone()),
                Scripted::Fail(message) => Scripted::Fail(message.clone()),
            }
        };
        match entry {
            Scripted::Respond(response) => Ok(response),
            Scripted::Fail(message) => Err(message.into()),
        }
    }
}

/// Wraps a body fragment in a complete response envelope.
pub(crate) fn envelope_with_body(body: &str) -> String {
    format!(
        r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"
             xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
             <soapenv:Body>{body}</soapenv:Body>
           </soapenv:Envelope>"#
    )
}

/// A canned login response whose header carries `session_id`.
pub(crate) fn login_response(session_id: &str) -> String {
    format!(
        r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
             <soapenv:Header>
               <ns1:sessionID xmlns:ns1="http://ws.polarion.com/session"
                   soapenv:actor="http://schemas.xmlsoap.org/soap/actor/next"
                   soapenv:mustUnderstand="0">{session_id}</ns1:sessionID>
             </soapenv:Header>
             <soapenv:Body>
               <logInWithTokenResponse xmlns="http://ws.polarion.com/SessionWebService-impl"/>
             </soapenv:Body>
           </soapenv:Envelope>"#
    )
}
