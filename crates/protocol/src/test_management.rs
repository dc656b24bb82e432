//! Operations and value objects of the `TestManagementWebService`.

use crate::envelope::{SoapOperation, SoapReply};
use crate::types::{
    EnumOptionId, SubterraUri, Text, opt_date_time, opt_enum, opt_f32, opt_text, opt_text_block,
    opt_uri,
};
use crate::xml::{Element, XmlError, XmlWriter};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Namespace of the test-management service operation elements.
pub const SERVICE_NS: &str = "http://ws.polarion.com/TestManagementWebService-impl";

/// One execution of a test case within a test run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRecord {
    pub test_case_uri: Option<SubterraUri>,
    pub result: Option<EnumOptionId>,
    pub comment: Option<Text>,
    pub executed: Option<DateTime<Utc>>,
    pub executed_by_uri: Option<SubterraUri>,
    /// Execution time in seconds.
    pub duration: Option<f32>,
    pub defect_uri: Option<SubterraUri>,
}

impl TestRecord {
    pub(crate) fn from_element(element: &Element) -> Result<Self, XmlError> {
        Ok(Self {
            test_case_uri: opt_uri(element, "testCaseURI"),
            result: opt_enum(element, "result"),
            comment: opt_text_block(element, "comment"),
            executed: opt_date_time(element, "executed")?,
            executed_by_uri: opt_uri(element, "executedByURI"),
            duration: opt_f32(element, "duration")?,
            defect_uri: opt_uri(element, "defectURI"),
        })
    }
}

/// A test run: a planned or executed collection of test records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRun {
    pub uri: Option<SubterraUri>,
    pub id: Option<String>,
    pub title: Option<String>,
    pub status: Option<EnumOptionId>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl TestRun {
    pub(crate) fn from_element(element: &Element) -> Result<Self, XmlError> {
        Ok(Self {
            uri: opt_uri(element, "uri"),
            id: opt_text(element, "id"),
            title: opt_text(element, "title"),
            status: opt_enum(element, "status"),
            created: opt_date_time(element, "created")?,
            updated: opt_date_time(element, "updated")?,
        })
    }
}

fn test_records_from(element: &Element, name: &str) -> Result<Vec<TestRecord>, XmlError> {
    element
        .children(name)
        .filter(|entry| !entry.is_nil())
        .map(TestRecord::from_element)
        .collect()
}

fn test_runs_from(element: &Element, name: &str) -> Result<Vec<TestRun>, XmlError> {
    element
        .children(name)
        .filter(|entry| !entry.is_nil())
        .map(TestRun::from_element)
        .collect()
}

/// `getTestCaseRecords`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetTestCaseRecords {
    pub test_run_uri: SubterraUri,
    /// When set, narrows the records to one test case.
    pub test_case_uri: Option<SubterraUri>,
}

impl SoapOperation for GetTestCaseRecords {
    const NAME: &'static str = "getTestCaseRecords";
    const NAMESPACE: &'static str = SERVICE_NS;

    fn write_params(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.text_element("testRunUri", self.test_run_uri.as_str())?;
        if let Some(test_case_uri) = &self.test_case_uri {
            writer.text_element("testCaseUri", test_case_uri.as_str())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetTestCaseRecordsResponse {
    pub records: Vec<TestRecord>,
}

impl SoapReply for GetTestCaseRecordsResponse {
    const NAME: &'static str = "getTestCaseRecordsResponse";

    fn from_element(element: &Element) -> Result<Self, XmlError> {
        Ok(Self {
            records: test_records_from(element, "getTestCaseRecordsReturn")?,
        })
    }
}

/// `searchTestRecords`
///
/// The query syntax requires a project id clause, so one call can only
/// reach the records of a single test run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTestRecords {
    pub query: String,
    pub sort: Option<String>,
    pub limit: Option<i32>,
}

impl SoapOperation for SearchTestRecords {
    const NAME: &'static str = "searchTestRecords";
    const NAMESPACE: &'static str = SERVICE_NS;

    fn write_params(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.text_element("query", &self.query)?;
        if let Some(sort) = &self.sort {
            writer.text_element("sort", sort)?;
        }
        if let Some(limit) = self.limit {
            writer.text_element("limit", &limit.to_string())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchTestRecordsResponse {
    pub records: Vec<TestRecord>,
}

impl SoapReply for SearchTestRecordsResponse {
    const NAME: &'static str = "searchTestRecordsResponse";

    fn from_element(element: &Element) -> Result<Self, XmlError> {
        Ok(Self {
            records: test_records_from(element, "searchTestRecordsReturn")?,
        })
    }
}

/// `getTestRunById`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetTestRunById {
    pub project: String,
    pub id: String,
}

impl SoapOperation for GetTestRunById {
    const NAME: &'static str = "getTestRunById";
    const NAMESPACE: &'static str = SERVICE_NS;

    fn write_params(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.text_element("project", &self.project)?;
        writer.text_element("id", &self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetTestRunByIdResponse {
    /// `None` when the test run does not exist.
    pub test_run: Option<TestRun>,
}

impl SoapReply for GetTestRunByIdResponse {
    const NAME: &'static str = "getTestRunByIdResponse";

    fn from_element(element: &Element) -> Result<Self, XmlError> {
        let test_run = match element.child("getTestRunByIdReturn") {
            Some(entry) if !entry.is_nil() => Some(TestRun::from_element(entry)?),
            _ => None,
        };
        Ok(Self { test_run })
    }
}

/// `searchTestRunsWithFields`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTestRunsWithFields {
    pub query: String,
    pub sort: Option<String>,
    pub fields: Vec<String>,
}

impl SoapOperation for SearchTestRunsWithFields {
    const NAME: &'static str = "searchTestRunsWithFields";
    const NAMESPACE: &'static str = SERVICE_NS;

    fn write_params(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        writer.text_element("query", &self.query)?;
        if let Some(sort) = &self.sort {
            writer.text_element("sort", sort)?;
        }
        for field in &self.fields {
            writer.text_element("fields", field)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchTestRunsWithFieldsResponse {
    pub test_runs: Vec<TestRun>,
}

impl SoapReply for SearchTestRunsWithFieldsResponse {
    const NAME: &'static str = "searchTestRunsWithFieldsResponse";

    fn from_element(element: &Element) -> Result<Self, XmlError> {
        Ok(Self {
            test_runs: test_runs_from(element, "searchTestRunsWithFieldsReturn")?,
        })
    }
}
