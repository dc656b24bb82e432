//! Operations of the `SessionWebService`.

use crate::envelope::{SoapOperation, SoapReply};
use crate::types::opt_bool;
use crate::xml::{Element, XmlError, XmlWriter};

/// Namespace of the session service operation elements.
pub const SERVICE_NS: &str = "http://ws.polarion.com/SessionWebService-impl";

/// `logInWithToken` - the authentication handshake.
///
/// This is the only operation dispatched without a session header; its
/// response carries the session identifier in the envelope *header*, which
/// the runtime extracts directly rather than through a [`SoapReply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogInWithToken {
    pub username: String,
    pub token: String,
    /// Authentication mechanism; always `AccessToken` for this client.
    pub mechanism: String,
}

impl LogInWithToken {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
            mechanism: "AccessToken".to_owned(),
        }
    }
}

impl SoapOperation for LogInWithToken {
    const NAME: &'static str = "logInWithToken";
    const NAMESPACE: &'static str = SERVICE_NS;

    fn write_params(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.text_element("username", &self.username)?;
        writer.text_element("token", &self.token)?;
        writer.text_element("mechanism", &self.mechanism)
    }
}

/// `hasSubject` - asks whether the current session has an authenticated
/// subject bound to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HasSubject;

impl SoapOperation for HasSubject {
    const NAME: &'static str = "hasSubject";
    const NAMESPACE: &'static str = SERVICE_NS;

    fn write_params(&self, _writer: &mut XmlWriter) -> Result<(), XmlError> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasSubjectResponse {
    /// `None` when the server answered without a usable payload; the
    /// facade treats that as an error, distinct from a definite `false`.
    pub has_subject: Option<bool>,
}

impl SoapReply for HasSubjectResponse {
    const NAME: &'static str = "hasSubjectResponse";

    fn from_element(element: &Element) -> Result<Self, XmlError> {
        Ok(Self {
            has_subject: opt_bool(element, "hasSubjectReturn")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{ResponseEnvelope, write_request};

    #[test]
    fn test_login_request_shape() {
        let doc = write_request(None, &LogInWithToken::new("alice", "tok-1")).unwrap();
        assert!(doc.contains(r#"<logInWithToken xmlns="http://ws.polarion.com/SessionWebService-impl">"#));
        assert!(doc.contains("<username>alice</username>"));
        assert!(doc.contains("<token>tok-1</token>"));
        assert!(doc.contains("<mechanism>AccessToken</mechanism>"));
        assert!(!doc.contains("sessionID"));
    }

    #[test]
    fn test_has_subject_reply_true_false_and_missing() {
        let with = |payload: &str| {
            format!(
                r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
                     <soapenv:Body>
                       <ns1:hasSubjectResponse xmlns:ns1="{SERVICE_NS}">{payload}</ns1:hasSubjectResponse>
                     </soapenv:Body>
                   </soapenv:Envelope>"#
            )
        };

        let decode = |payload: &str| -> HasSubjectResponse {
            ResponseEnvelope::parse(&with(payload))
                .unwrap()
                .reply()
                .unwrap()
                .unwrap()
        };

        assert_eq!(
            decode("<hasSubjectReturn>true</hasSubjectReturn>").has_subject,
            Some(true)
        );
        assert_eq!(
            decode("<hasSubjectReturn>false</hasSubjectReturn>").has_subject,
            Some(false)
        );
        assert_eq!(decode("").has_subject, None);
    }
}
