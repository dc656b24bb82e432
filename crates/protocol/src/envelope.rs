//! SOAP 1.1 envelope codec.
//!
//! Every request and response to a Polarion service is wrapped in the
//! standard envelope (header + body). Requests carry the operation element
//! in its service namespace inside the body; authenticated requests also
//! carry the session header. The login response is the one place where the
//! envelope *header* carries data: the session identifier issued by the
//! server.

use crate::xml::{self, Element, XmlError, XmlWriter};

/// Standard SOAP 1.1 envelope namespace.
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Namespace of the Polarion session header element.
pub const SESSION_NS: &str = "http://ws.polarion.com/session";

/// Standard SOAP "next" actor URI carried on the session header.
pub const NEXT_ACTOR: &str = "http://schemas.xmlsoap.org/soap/actor/next";

/// The session header stamped onto every authenticated request.
///
/// Created once after login and shared read-only by all service clients;
/// it has no setters, so a shared instance cannot drift between them.
/// Serializes as:
///
/// ```text
/// <sessionID xmlns="http://ws.polarion.com/session"
///            soapenv:actor="http://schemas.xmlsoap.org/soap/actor/next"
///            soapenv:mustUnderstand="0">{id}</sessionID>
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct SessionHeader {
    session_id: String,
}

impl SessionHeader {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }

    /// The opaque session identifier issued by the server at login.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn write_into(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.text_element_with(
            "sessionID",
            &[
                ("xmlns", SESSION_NS),
                ("soapenv:actor", NEXT_ACTOR),
                // non-mandatory: the server may ignore the header
                ("soapenv:mustUnderstand", "0"),
            ],
            &self.session_id,
        )
    }
}

/// A request-side remote operation: its wire name, service namespace, and
/// parameter serialization.
pub trait SoapOperation {
    /// Operation element local name, e.g. `queryWorkItems`. Also used for
    /// the `SOAPAction: urn:<NAME>` request header.
    const NAME: &'static str;

    /// Namespace the operation element is declared in.
    const NAMESPACE: &'static str;

    /// Writes the operation's child parameter elements.
    fn write_params(&self, writer: &mut XmlWriter) -> Result<(), XmlError>;
}

/// A response-side payload: the local name of its `<op>Response` element
/// and how to decode it.
pub trait SoapReply: Sized {
    /// Response element local name, e.g. `queryWorkItemsResponse`.
    const NAME: &'static str;

    /// Decodes the reply from its response element.
    fn from_element(element: &Element) -> Result<Self, XmlError>;
}

/// Serializes a complete request envelope.
///
/// `session` is `None` only for the login handshake; every other call
/// stamps the shared session header into the envelope header.
pub fn write_request<O: SoapOperation>(
    session: Option<&SessionHeader>,
    operation: &O,
) -> Result<String, XmlError> {
    let mut writer = XmlWriter::new();
    writer.start_with("soapenv:Envelope", &[("xmlns:soapenv", SOAP_ENV_NS)])?;
    if let Some(header) = session {
        writer.start("soapenv:Header")?;
        header.write_into(&mut writer)?;
        writer.end("soapenv:Header")?;
    }
    writer.start("soapenv:Body")?;
    writer.start_with(O::NAME, &[("xmlns", O::NAMESPACE)])?;
    operation.write_params(&mut writer)?;
    writer.end(O::NAME)?;
    writer.end("soapenv:Body")?;
    writer.end("soapenv:Envelope")?;
    writer.finish()
}

/// A remote fault reported inside a response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    /// Fault code, e.g. `soapenv:Server.userException`.
    pub code: String,
    /// Human-readable fault string.
    pub reason: String,
}

/// A parsed response envelope, split into optional header and body.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    header: Option<Element>,
    body: Element,
}

impl ResponseEnvelope {
    pub fn parse(input: &str) -> Result<Self, XmlError> {
        let root = xml::parse(input)?;
        if root.name() != "Envelope" {
            return Err(XmlError::shape(format!(
                "expected Envelope root, found {}",
                root.name()
            )));
        }
        let header = root.child("Header").cloned();
        let body = root
            .child("Body")
            .cloned()
            .ok_or_else(|| XmlError::shape("envelope has no Body"))?;
        Ok(Self { header, body })
    }

    /// The session identifier carried in the envelope header, if any.
    ///
    /// Only the login response carries one. An empty identifier counts as
    /// absent; callers must never treat it as a valid session.
    pub fn session_id(&self) -> Option<&str> {
        self.header
            .as_ref()?
            .child("sessionID")
            .map(Element::text)
            .filter(|id| !id.is_empty())
    }

    /// The fault reported in the body, if the call failed remotely.
    pub fn fault(&self) -> Option<Fault> {
        let fault = self.body.child("Fault")?;
        Some(Fault {
            code: fault.child_text("faultcode").unwrap_or_default().to_owned(),
            reason: fault
                .child_text("faultstring")
                .unwrap_or_default()
                .to_owned(),
        })
    }

    /// Decodes the typed reply, or `None` when the body has no matching
    /// response element.
    pub fn reply<R: SoapReply>(&self) -> Result<Option<R>, XmlError> {
        match self.body.child(R::NAME) {
            Some(element) => R::from_element(element).map(Some),
            None => Ok(None),
        }
    }
}
