//! Minimal XML document model for the SOAP wire format.
//!
//! Polarion's services are namespace-heavy and the prefixes in a response
//! are chosen by the server (`soapenv:`, `ns1:`, ...), so this module
//! resolves nothing and matches *local* names only. Reading builds a small
//! element tree; writing wraps `quick_xml::Writer` with the handful of
//! helpers the envelope codec needs.

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use std::fmt;
use thiserror::Error;

/// Errors produced while encoding or decoding XML documents.
#[derive(Debug, Error)]
pub enum XmlError {
    /// Failed to serialize an XML event.
    #[error("failed to write XML: {0}")]
    Write(String),

    /// The input is not well-formed XML.
    #[error("malformed XML: {0}")]
    Malformed(String),

    /// The document is well-formed but does not have the expected shape.
    #[error("unexpected document shape: {0}")]
    Shape(String),
}

impl XmlError {
    pub(crate) fn write(err: impl fmt::Display) -> Self {
        XmlError::Write(err.to_string())
    }

    pub(crate) fn malformed(err: impl fmt::Display) -> Self {
        XmlError::Malformed(err.to_string())
    }

    pub(crate) fn shape(msg: impl Into<String>) -> Self {
        XmlError::Shape(msg.into())
    }
}

/// A parsed XML element: local name, attributes, children, and text.
///
/// Attribute keys are stored by local name as well, so `xsi:nil` is looked
/// up as `nil`.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    /// The element's local name, without any namespace prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Concatenated character data directly inside this element.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Looks up an attribute by local name.
    pub fn attr(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == local_name)
            .map(|(_, value)| value.as_str())
    }

    /// The first child element with the given local name.
    pub fn child(&self, local_name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == local_name)
    }

    /// All child elements with the given local name, in document order.
    pub fn children<'a>(&'a self, local_name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter(move |child| child.name == local_name)
    }

    /// All child elements regardless of name.
    pub fn all_children(&self) -> &[Element] {
        &self.children
    }

    /// Text content of the first child with the given local name.
    ///
    /// Returns `None` when the child is absent or carries `xsi:nil`.
    pub fn child_text(&self, local_name: &str) -> Option<&str> {
        let child = self.child(local_name)?;
        if child.is_nil() {
            return None;
        }
        Some(child.text())
    }

    /// Whether the element carries an `xsi:nil` marker.
    pub fn is_nil(&self) -> bool {
        matches!(self.attr("nil"), Some("true") | Some("1"))
    }
}

/// Parses a complete document into its root element.
pub fn parse(input: &str) -> Result<Element, XmlError> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event().map_err(XmlError::malformed)? {
            Event::Start(start) => {
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                close_element(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlError::shape("unbalanced end tag"))?;
                close_element(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let value = text.unescape().map_err(XmlError::malformed)?;
                if let Some(parent) = stack.last_mut() {
                    parent.text.push_str(&value);
                }
            }
            Event::CData(data) => {
                if let Some(parent) = stack.last_mut() {
                    parent.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctypes
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(XmlError::Malformed("unclosed element".to_string()));
    }
    root.ok_or_else(|| XmlError::Malformed("document has no root element".to_string()))
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let name = local_name(start.name())?;
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(XmlError::malformed)?;
        let key = local_name(attr.key)?;
        let value = attr
            .unescape_value()
            .map_err(XmlError::malformed)?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

fn close_element(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(XmlError::Malformed(
            "multiple root elements".to_string(),
        )),
    }
}

fn local_name(name: QName<'_>) -> Result<String, XmlError> {
    std::str::from_utf8(name.local_name().as_ref())
        .map(str::to_owned)
        .map_err(XmlError::malformed)
}

/// Streaming writer for request documents.
///
/// Produces indented output and escapes all text content.
pub struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self {
            inner: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    /// Opens an element with no attributes.
    pub fn start(&mut self, tag: &str) -> Result<(), XmlError> {
        self.start_with(tag, &[])
    }

    /// Opens an element with the given attributes.
    pub fn start_with(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<(), XmlError> {
        let mut start = BytesStart::new(tag);
        for (key, value) in attrs {
            start.push_attribute((*key, *value));
        }
        self.inner
            .write_event(Event::Start(start))
            .map_err(XmlError::write)
    }

    /// Closes an element previously opened with [`start`](Self::start).
    pub fn end(&mut self, tag: &str) -> Result<(), XmlError> {
        self.inner
            .write_event(Event::End(BytesEnd::new(tag)))
            .map_err(XmlError::write)
    }

    /// Writes `<tag>value</tag>`.
    pub fn text_element(&mut self, tag: &str, value: &str) -> Result<(), XmlError> {
        self.text_element_with(tag, &[], value)
    }

    /// Writes `<tag attrs...>value</tag>`.
    pub fn text_element_with(
        &mut self,
        tag: &str,
        attrs: &[(&str, &str)],
        value: &str,
    ) -> Result<(), XmlError> {
        self.start_with(tag, attrs)?;
        self.inner
            .write_event(Event::Text(BytesText::new(value)))
            .map_err(XmlError::write)?;
        self.end(tag)
    }

    /// Finishes the document and returns it as a string.
    pub fn finish(self) -> Result<String, XmlError> {
        String::from_utf8(self.inner.into_inner()).map_err(XmlError::write)
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}
