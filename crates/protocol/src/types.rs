//! Core value types shared by the Polarion services.
//!
//! These are pass-through data: every field is optional unless the server
//! guarantees it, and no invariants are enforced beyond decoding. The
//! serde derives exist for consumers (dumping query results as JSON); the
//! wire format is XML and handled by the `from_element` decoders.

use crate::xml::{Element, XmlError};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier Polarion uses to reference any repository object,
/// e.g. `subterra:data-service:objects:/default/proj${WorkItem}WI-42`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubterraUri(String);

impl SubterraUri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubterraUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to an enumeration option, e.g. a work item status or severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumOptionId {
    pub id: String,
}

/// Rich-text content together with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub content: String,
}

/// Parses an `xsd:boolean` value.
pub(crate) fn parse_bool(text: &str) -> Result<bool, XmlError> {
    match text.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(XmlError::shape(format!("invalid boolean {other:?}"))),
    }
}

/// Parses an `xsd:dateTime` value.
///
/// Polarion emits RFC 3339 timestamps; some installations drop the zone
/// suffix, in which case the value is taken as UTC.
pub(crate) fn parse_date_time(text: &str) -> Result<DateTime<Utc>, XmlError> {
    let text = text.trim();
    if let Ok(stamped) = DateTime::parse_from_rfc3339(text) {
        return Ok(stamped.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|err| XmlError::shape(format!("invalid dateTime {text:?}: {err}")))
}

/// Non-nil, non-empty text of a child element.
pub(crate) fn opt_text(element: &Element, name: &str) -> Option<String> {
    element
        .child_text(name)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

pub(crate) fn opt_uri(element: &Element, name: &str) -> Option<SubterraUri> {
    opt_text(element, name).map(SubterraUri::new)
}

/// Decodes an `EnumOptionId` child, shaped `<name><id>open</id></name>`.
pub(crate) fn opt_enum(element: &Element, name: &str) -> Option<EnumOptionId> {
    let child = element.child(name)?;
    if child.is_nil() {
        return None;
    }
    let id = match child.child_text("id") {
        Some(id) => id.to_owned(),
        // some enum fields flatten to bare text
        None => child.text().to_owned(),
    };
    if id.is_empty() {
        return None;
    }
    Some(EnumOptionId { id })
}

/// Decodes a `Text` child, shaped `<name><type>text/html</type><content>..</content></name>`.
pub(crate) fn opt_text_block(element: &Element, name: &str) -> Option<Text> {
    let child = element.child(name)?;
    if child.is_nil() {
        return None;
    }
    let content = match child.child_text("content") {
        Some(content) => content.to_owned(),
        None => child.text().to_owned(),
    };
    Some(Text {
        content_type: child.child_text("type").map(str::to_owned),
        content,
    })
}

pub(crate) fn opt_date_time(
    element: &Element,
    name: &str,
) -> Result<Option<DateTime<Utc>>, XmlError> {
    match element.child_text(name).filter(|text| !text.is_empty()) {
        Some(text) => parse_date_time(text).map(Some),
        None => Ok(None),
    }
}

pub(crate) fn opt_bool(element: &Element, name: &str) -> Result<Option<bool>, XmlError> {
    match element.child_text(name).filter(|text| !text.is_empty()) {
        Some(text) => parse_bool(text).map(Some),
        None => Ok(None),
    }
}

pub(crate) fn opt_f32(element: &Element, name: &str) -> Result<Option<f32>, XmlError> {
    match element.child_text(name).filter(|text| !text.is_empty()) {
        Some(text) => text
            .trim()
            .parse::<f32>()
            .map(Some)
            .map_err(|err| XmlError::shape(format!("invalid float {text:?}: {err}"))),
        None => Ok(None),
    }
}

pub(crate) fn opt_i32(element: &Element, name: &str) -> Result<Option<i32>, XmlError> {
    match element.child_text(name).filter(|text| !text.is_empty()) {
        Some(text) => text
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|err| XmlError::shape(format!("invalid integer {text:?}: {err}"))),
        None => Ok(None),
    }
}
