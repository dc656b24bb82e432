//! Operations and value objects of the `TrackerWebService`.
//!
//! Array-valued replies arrive as repeated `<operation>Return` elements;
//! nil entries are skipped. Single-valued replies use one `Return`
//! element, with `xsi:nil` (or absence) meaning "not found".

use crate::envelope::{SoapOperation, SoapReply};
use crate::types::{
    EnumOptionId, SubterraUri, Text, opt_date_time, opt_enum, opt_i32, opt_text, opt_text_block,
    opt_uri,
};
use crate::xml::{Element, XmlError, XmlWriter};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Namespace of the tracker service operation elements.
pub const SERVICE_NS: &str = "http://ws.polarion.com/TrackerWebService-impl";

/// A tracked work item (requirement, task, defect, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub uri: Option<SubterraUri>,
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<Text>,
    #[serde(rename = "type")]
    pub work_item_type: Option<EnumOptionId>,
    pub status: Option<EnumOptionId>,
    pub priority: Option<EnumOptionId>,
    pub severity: Option<EnumOptionId>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl WorkItem {
    pub(crate) fn from_element(element: &Element) -> Result<Self, XmlError> {
        Ok(Self {
            uri: opt_uri(element, "uri"),
            id: opt_text(element, "id"),
            title: opt_text(element, "title"),
            description: opt_text_block(element, "description"),
            work_item_type: opt_enum(element, "type"),
            status: opt_enum(element, "status"),
            priority: opt_enum(element, "priority"),
            severity: opt_enum(element, "severity"),
            created: opt_date_time(element, "created")?,
            updated: opt_date_time(element, "updated")?,
        })
    }
}

/// A named baseline of a project's repository state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Baseline {
    pub uri: Option<SubterraUri>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub base_revision: Option<String>,
}

impl Baseline {
    pub(crate) fn from_element(element: &Element) -> Result<Self, XmlError> {
        Ok(Self {
            uri: opt_uri(element, "uri"),
            id: opt_text(element, "id"),
            name: opt_text(element, "name"),
            description: opt_text(element, "description"),
            base_revision: opt_text(element, "baseRevision"),
        })
    }
}

/// A repository revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    pub uri: Option<SubterraUri>,
    pub name: Option<String>,
    pub author: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub message: Option<String>,
    pub repository_name: Option<String>,
}

impl Revision {
    pub(crate) fn from_element(element: &Element) -> Result<Self, XmlError> {
        Ok(Self {
            uri: opt_uri(element, "uri"),
            name: opt_text(element, "name"),
            author: opt_text(element, "author"),
            date: opt_date_time(element, "date")?,
            message: opt_text(element, "message"),
            repository_name: opt_text(element, "repositoryName"),
        })
    }
}

/// A custom field value attached to a work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    pub parent_item_uri: Option<SubterraUri>,
    pub key: Option<String>,
    /// Flattened text of the field value; custom fields are schemaless on
    /// the wire.
    pub value: Option<String>,
}

impl CustomField {
    pub(crate) fn from_element(element: &Element) -> Result<Self, XmlError> {
        Ok(Self {
            parent_item_uri: opt_uri(element, "parentItemURI"),
            key: opt_text(element, "key"),
            value: opt_text(element, "value"),
        })
    }
}

fn work_items_from(element: &Element, name: &str) -> Result<Vec<WorkItem>, XmlError> {
    element
        .children(name)
        .filter(|entry| !entry.is_nil())
        .map(WorkItem::from_element)
        .collect()
}

fn write_fields(writer: &mut XmlWriter, fields: &[String]) -> Result<(), XmlError> {
    for field in fields {
        writer.text_element("fields", field)?;
    }
    Ok(())
}

fn write_opt(writer: &mut XmlWriter, tag: &str, value: Option<&String>) -> Result<(), XmlError> {
    if let Some(value) = value {
        writer.text_element(tag, value)?;
    }
    Ok(())
}

/// `getWorkItemById`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetWorkItemById {
    pub project_id: String,
    pub workitem_id: String,
}

impl SoapOperation for GetWorkItemById {
    const NAME: &'static str = "getWorkItemById";
    const NAMESPACE: &'static str = SERVICE_NS;

    fn write_params(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.text_element("projectId", &self.project_id)?;
        writer.text_element("workitemId", &self.workitem_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetWorkItemByIdResponse {
    /// `None` when the item does not exist.
    pub work_item: Option<WorkItem>,
}

impl SoapReply for GetWorkItemByIdResponse {
    const NAME: &'static str = "getWorkItemByIdResponse";

    fn from_element(element: &Element) -> Result<Self, XmlError> {
        let work_item = match element.child("getWorkItemByIdReturn") {
            Some(entry) if !entry.is_nil() => Some(WorkItem::from_element(entry)?),
            _ => None,
        };
        Ok(Self { work_item })
    }
}

/// `queryWorkItems`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWorkItems {
    /// Lucene query string.
    pub query: String,
    pub sort: Option<String>,
    /// Field names to populate on the results; empty means "all".
    pub fields: Vec<String>,
}

impl SoapOperation for QueryWorkItems {
    const NAME: &'static str = "queryWorkItems";
    const NAMESPACE: &'static str = SERVICE_NS;

    fn write_params(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.text_element("query", &self.query)?;
        write_opt(writer, "sort", self.sort.as_ref())?;
        write_fields(writer, &self.fields)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryWorkItemsResponse {
    pub work_items: Vec<WorkItem>,
}

impl SoapReply for QueryWorkItemsResponse {
    const NAME: &'static str = "queryWorkItemsResponse";

    fn from_element(element: &Element) -> Result<Self, XmlError> {
        Ok(Self {
            work_items: work_items_from(element, "queryWorkItemsReturn")?,
        })
    }
}

/// `queryWorkItemsBySQL`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWorkItemsBySql {
    pub sql_query: String,
    pub fields: Vec<String>,
}

impl SoapOperation for QueryWorkItemsBySql {
    const NAME: &'static str = "queryWorkItemsBySQL";
    const NAMESPACE: &'static str = SERVICE_NS;

    fn write_params(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.text_element("sqlQuery", &self.sql_query)?;
        write_fields(writer, &self.fields)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryWorkItemsBySqlResponse {
    pub work_items: Vec<WorkItem>,
}

impl SoapReply for QueryWorkItemsBySqlResponse {
    const NAME: &'static str = "queryWorkItemsBySQLResponse";

    fn from_element(element: &Element) -> Result<Self, XmlError> {
        Ok(Self {
            work_items: work_items_from(element, "queryWorkItemsBySQLReturn")?,
        })
    }
}

/// `getWorkItemsCount`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetWorkItemsCount {
    pub query: String,
}

impl SoapOperation for GetWorkItemsCount {
    const NAME: &'static str = "getWorkItemsCount";
    const NAMESPACE: &'static str = SERVICE_NS;

    fn write_params(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.text_element("query", &self.query)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetWorkItemsCountResponse {
    pub count: Option<i32>,
}

impl SoapReply for GetWorkItemsCountResponse {
    const NAME: &'static str = "getWorkItemsCountResponse";

    fn from_element(element: &Element) -> Result<Self, XmlError> {
        Ok(Self {
            count: opt_i32(element, "getWorkItemsCountReturn")?,
        })
    }
}

/// `queryBaselines`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBaselines {
    pub query: String,
    pub sort: Option<String>,
}

impl SoapOperation for QueryBaselines {
    const NAME: &'static str = "queryBaselines";
    const NAMESPACE: &'static str = SERVICE_NS;

    fn write_params(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.text_element("query", &self.query)?;
        write_opt(writer, "sort", self.sort.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryBaselinesResponse {
    pub baselines: Vec<Baseline>,
}

impl SoapReply for QueryBaselinesResponse {
    const NAME: &'static str = "queryBaselinesResponse";

    fn from_element(element: &Element) -> Result<Self, XmlError> {
        Ok(Self {
            baselines: element
                .children("queryBaselinesReturn")
                .filter(|entry| !entry.is_nil())
                .map(Baseline::from_element)
                .collect::<Result<_, _>>()?,
        })
    }
}

/// `queryWorkItemsInBaseline`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWorkItemsInBaseline {
    pub baseline_revision: String,
    pub query: String,
    pub sort: Option<String>,
    pub fields: Vec<String>,
}

impl SoapOperation for QueryWorkItemsInBaseline {
    const NAME: &'static str = "queryWorkItemsInBaseline";
    const NAMESPACE: &'static str = SERVICE_NS;

    fn write_params(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.text_element("baselineRevision", &self.baseline_revision)?;
        writer.text_element("query", &self.query)?;
        write_opt(writer, "sort", self.sort.as_ref())?;
        write_fields(writer, &self.fields)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryWorkItemsInBaselineResponse {
    pub work_items: Vec<WorkItem>,
}

impl SoapReply for QueryWorkItemsInBaselineResponse {
    const NAME: &'static str = "queryWorkItemsInBaselineResponse";

    fn from_element(element: &Element) -> Result<Self, XmlError> {
        Ok(Self {
            work_items: work_items_from(element, "queryWorkItemsInBaselineReturn")?,
        })
    }
}

/// `queryWorkItemsInBaselineBySQL`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWorkItemsInBaselineBySql {
    pub baseline_revision: String,
    pub sql_query: String,
    pub fields: Vec<String>,
}

impl SoapOperation for QueryWorkItemsInBaselineBySql {
    const NAME: &'static str = "queryWorkItemsInBaselineBySQL";
    const NAMESPACE: &'static str = SERVICE_NS;

    fn write_params(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.text_element("baselineRevision", &self.baseline_revision)?;
        writer.text_element("sqlQuery", &self.sql_query)?;
        write_fields(writer, &self.fields)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryWorkItemsInBaselineBySqlResponse {
    pub work_items: Vec<WorkItem>,
}

impl SoapReply for QueryWorkItemsInBaselineBySqlResponse {
    const NAME: &'static str = "queryWorkItemsInBaselineBySQLResponse";

    fn from_element(element: &Element) -> Result<Self, XmlError> {
        Ok(Self {
            work_items: work_items_from(element, "queryWorkItemsInBaselineBySQLReturn")?,
        })
    }
}

/// `queryRevisions`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRevisions {
    pub query: String,
    pub sort: Option<String>,
    pub fields: Vec<String>,
}

impl SoapOperation for QueryRevisions {
    const NAME: &'static str = "queryRevisions";
    const NAMESPACE: &'static str = SERVICE_NS;

    fn write_params(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.text_element("query", &self.query)?;
        write_opt(writer, "sort", self.sort.as_ref())?;
        write_fields(writer, &self.fields)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryRevisionsResponse {
    pub revisions: Vec<Revision>,
}

impl SoapReply for QueryRevisionsResponse {
    const NAME: &'static str = "queryRevisionsResponse";

    fn from_element(element: &Element) -> Result<Self, XmlError> {
        Ok(Self {
            revisions: element
                .children("queryRevisionsReturn")
                .filter(|entry| !entry.is_nil())
                .map(Revision::from_element)
                .collect::<Result<_, _>>()?,
        })
    }
}

/// `getCustomField`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCustomField {
    pub workitem_uri: SubterraUri,
    pub key: String,
}

impl SoapOperation for GetCustomField {
    const NAME: &'static str = "getCustomField";
    const NAMESPACE: &'static str = SERVICE_NS;

    fn write_params(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.text_element("workitemURI", self.workitem_uri.as_str())?;
        writer.text_element("key", &self.key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetCustomFieldResponse {
    pub custom_field: Option<CustomField>,
}

impl SoapReply for GetCustomFieldResponse {
    const NAME: &'static str = "getCustomFieldResponse";

    fn from_element(element: &Element) -> Result<Self, XmlError> {
        let custom_field = match element.child("getCustomFieldReturn") {
            Some(entry) if !entry.is_nil() => Some(CustomField::from_element(entry)?),
            _ => None,
        };
        Ok(Self { custom_field })
    }
}
