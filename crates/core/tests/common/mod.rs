//! Stub transport and canned envelopes shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use polarion::{BoxError, Transport, TransportResponse};
use std::collections::VecDeque;
use std::sync::Mutex;

/// One captured outgoing request.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub url: String,
    pub soap_action: String,
    pub body: String,
}

/// Replays scripted responses in order and records every request. The
/// last response repeats once the script runs dry.
pub struct StubTransport {
    script: Mutex<VecDeque<TransportResponse>>,
    requests: Mutex<Vec<CapturedRequest>>,
}

impl StubTransport {
    pub fn new(script: Vec<TransportResponse>) -> Self {
        assert!(!script.is_empty(), "script must have at least one response");
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn ok(body: String) -> TransportResponse {
        TransportResponse { status: 200, body }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
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
        if script.len() > 1 {
            Ok(script.pop_front().unwrap())
        } else {
            Ok(script.front().unwrap().clone())
        }
    }
}

pub fn login_response(session_id: &str) -> String {
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

pub fn envelope_with_body(body: &str) -> String {
    format!(
        r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"
             xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
             <soapenv:Body>{body}</soapenv:Body>
           </soapenv:Envelope>"#
    )
}
