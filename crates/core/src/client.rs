//! The `Polarion` root object.

use crate::config::{Endpoints, PolarionConfig};
use crate::session::SessionService;
use crate::test_management::TestManagementService;
use crate::tracker::TrackerService;
use polarion_protocol::session::HasSubject;
use polarion_protocol::test_management::{
    GetTestCaseRecords, GetTestRunById, SearchTestRecords, SearchTestRunsWithFields, TestRecord,
    TestRun,
};
use polarion_protocol::tracker::{
    Baseline, CustomField, GetCustomField, GetWorkItemById, GetWorkItemsCount, QueryBaselines,
    QueryRevisions, QueryWorkItems, QueryWorkItemsBySql, QueryWorkItemsInBaseline,
    QueryWorkItemsInBaselineBySql, Revision, WorkItem,
};
use polarion_protocol::types::SubterraUri;
use polarion_protocol::envelope::{SessionHeader, SoapOperation};
use polarion_runtime::{
    Error, HttpTransport, Result, ServiceClient, Transport, authenticate,
};
use std::fmt;
use std::sync::Arc;

/// Polarion is the root object providing typed access to the session,
/// tracker, and test-management services.
///
/// Construction *is* the login handshake: [`connect`](Self::connect)
/// authenticates with the configured access token and bakes the resulting
/// session identifier into a header shared by all three services. If the
/// session expires server-side, calls start failing and the caller
/// reconstructs the client; there is no refresh.
///
/// # Example
///
/// ```ignore
/// use polarion::{Polarion, PolarionConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = Polarion::connect(PolarionConfig::new(
///         "https://polarion.example.com",
///         "alice",
///         "personal-access-token",
///     ))
///     .await?;
///
///     assert!(client.is_logged_in().await?);
///
///     let open = client
///         .query_work_items("status:open", Some("id"), &["id", "title"])
///         .await?;
///     for item in open {
///         println!("{:?} {:?}", item.id, item.title);
///     }
///     Ok(())
/// }
/// ```
pub struct Polarion {
    /// Shared by all three services; kept so callers can inspect it.
    transport: Arc<dyn Transport>,
    session: SessionService,
    tracker: TrackerService,
    test_management: TestManagementService,
}

impl Polarion {
    /// Logs in and returns a ready client.
    ///
    /// A failed login fails the whole construction; no partial client is
    /// ever returned.
    pub async fn connect(config: PolarionConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(&config.transport_config())?);
        Self::connect_with_transport(config, transport).await
    }

    /// Logs in through a caller-supplied transport.
    ///
    /// This is the seam for stub transports in tests and for callers that
    /// need HTTP behavior beyond [`PolarionConfig`] (proxies, custom TLS);
    /// the config's timeout and TLS fields are not applied to the supplied
    /// transport.
    pub async fn connect_with_transport(
        config: PolarionConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let endpoints = Endpoints::derive(&config.base_url);

        let session_id = authenticate(
            transport.as_ref(),
            &endpoints.session,
            &config.username,
            &config.access_token,
        )
        .await?;

        tracing::debug!(username = %config.username, "client connected");

        // One header allocation, shared by all three services: every call
        // they make must carry the same session.
        let header = Arc::new(SessionHeader::new(session_id));

        let session = SessionService::new(ServiceClient::new(
            endpoints.session,
            Arc::clone(&transport),
            Arc::clone(&header),
        ));
        let tracker = TrackerService::new(ServiceClient::new(
            endpoints.tracker,
            Arc::clone(&transport),
            Arc::clone(&header),
        ));
        let test_management = TestManagementService::new(ServiceClient::new(
            endpoints.test_management,
            Arc::clone(&transport),
            header,
        ));

        Ok(Self {
            transport,
            session,
            tracker,
            test_management,
        })
    }

    /// The session service client.
    pub fn session(&self) -> &SessionService {
        &self.session
    }

    /// The tracker service client.
    pub fn tracker(&self) -> &TrackerService {
        &self.tracker
    }

    /// The test-management service client.
    pub fn test_management(&self) -> &TestManagementService {
        &self.test_management
    }

    /// The transport shared by all three services.
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Whether the session currently has an authenticated subject.
    ///
    /// `Ok(false)` means the server answered "no". A transport or decode
    /// failure, or an answer without a usable payload, is an error: not
    /// knowing is different from being logged out.
    pub async fn is_logged_in(&self) -> Result<bool> {
        let response = self.session.has_subject().await?;
        response.has_subject.ok_or(Error::MissingData {
            operation: HasSubject::NAME,
            what: "hasSubjectReturn",
        })
    }

    /// Fetches one work item, or `None` if it does not exist.
    pub async fn get_work_item_by_id(
        &self,
        project_id: &str,
        work_item_id: &str,
    ) -> Result<Option<WorkItem>> {
        let request = GetWorkItemById {
            project_id: project_id.to_owned(),
            workitem_id: work_item_id.to_owned(),
        };
        Ok(self.tracker.get_work_item_by_id(&request).await?.work_item)
    }

    /// Runs a Lucene query over work items.
    ///
    /// Supplying a field selection without a sort field is rejected
    /// locally, before any network traffic: the server silently ignores
    /// the selection in that case and the mistake should surface here.
    pub async fn query_work_items(
        &self,
        query: &str,
        sort: Option<&str>,
        fields: &[&str],
    ) -> Result<Vec<WorkItem>> {
        if !fields.is_empty() && sort.is_none() {
            return Err(Error::InvalidArgument {
                operation: QueryWorkItems::NAME,
                message: "a sort field is required when a field list is supplied".to_owned(),
            });
        }
        let request = QueryWorkItems {
            query: query.to_owned(),
            sort: sort.map(str::to_owned),
            fields: owned(fields),
        };
        Ok(self.tracker.query_work_items(&request).await?.work_items)
    }

    /// Runs a SQL query over work items.
    pub async fn query_work_items_by_sql(
        &self,
        sql_query: &str,
        fields: &[&str],
    ) -> Result<Vec<WorkItem>> {
        let request = QueryWorkItemsBySql {
            sql_query: sql_query.to_owned(),
            fields: owned(fields),
        };
        Ok(self
            .tracker
            .query_work_items_by_sql(&request)
            .await?
            .work_items)
    }

    /// Counts the work items matching a Lucene query.
    pub async fn get_work_items_count(&self, query: &str) -> Result<i32> {
        let request = GetWorkItemsCount {
            query: query.to_owned(),
        };
        let response = self.tracker.get_work_items_count(&request).await?;
        response.count.ok_or(Error::MissingData {
            operation: GetWorkItemsCount::NAME,
            what: "getWorkItemsCountReturn",
        })
    }

    /// Queries baselines.
    pub async fn query_baselines(
        &self,
        query: &str,
        sort: Option<&str>,
    ) -> Result<Vec<Baseline>> {
        let request = QueryBaselines {
            query: query.to_owned(),
            sort: sort.map(str::to_owned),
        };
        Ok(self.tracker.query_baselines(&request).await?.baselines)
    }

    /// Runs a Lucene query over the work items of a baseline.
    pub async fn query_work_items_in_baseline(
        &self,
        baseline_revision: &str,
        query: &str,
        sort: Option<&str>,
        fields: &[&str],
    ) -> Result<Vec<WorkItem>> {
        let request = QueryWorkItemsInBaseline {
            baseline_revision: baseline_revision.to_owned(),
            query: query.to_owned(),
            sort: sort.map(str::to_owned),
            fields: owned(fields),
        };
        Ok(self
            .tracker
            .query_work_items_in_baseline(&request)
            .await?
            .work_items)
    }

    /// Runs a SQL query over the work items of a baseline.
    pub async fn query_work_items_in_baseline_by_sql(
        &self,
        baseline_revision: &str,
        sql_query: &str,
        fields: &[&str],
    ) -> Result<Vec<WorkItem>> {
        let request = QueryWorkItemsInBaselineBySql {
            baseline_revision: baseline_revision.to_owned(),
            sql_query: sql_query.to_owned(),
            fields: owned(fields),
        };
        Ok(self
            .tracker
            .query_work_items_in_baseline_by_sql(&request)
            .await?
            .work_items)
    }

    /// Queries repository revisions.
    pub async fn query_revisions(
        &self,
        query: &str,
        fields: &[&str],
        sort: Option<&str>,
    ) -> Result<Vec<Revision>> {
        let request = QueryRevisions {
            query: query.to_owned(),
            sort: sort.map(str::to_owned),
            fields: owned(fields),
        };
        Ok(self.tracker.query_revisions(&request).await?.revisions)
    }

    /// Fetches a custom field of a work item, or `None` if unset.
    pub async fn get_custom_field(
        &self,
        work_item_uri: &SubterraUri,
        key: &str,
    ) -> Result<Option<CustomField>> {
        let request = GetCustomField {
            workitem_uri: work_item_uri.clone(),
            key: key.to_owned(),
        };
        Ok(self.tracker.get_custom_field(&request).await?.custom_field)
    }

    /// Fetches the test records of a test run, optionally narrowed to one
    /// test case.
    pub async fn get_test_case_records(
        &self,
        test_run_uri: &SubterraUri,
        test_case_uri: Option<&SubterraUri>,
    ) -> Result<Vec<TestRecord>> {
        let request = GetTestCaseRecords {
            test_run_uri: test_run_uri.clone(),
            test_case_uri: test_case_uri.cloned(),
        };
        Ok(self
            .test_management
            .get_test_case_records(&request)
            .await?
            .records)
    }

    /// Searches test records.
    ///
    /// The query syntax requires a project id clause, so one call reaches
    /// the records of a single test run only.
    pub async fn query_test_records(
        &self,
        query: &str,
        sort: Option<&str>,
        limit: Option<i32>,
    ) -> Result<Vec<TestRecord>> {
        let request = SearchTestRecords {
            query: query.to_owned(),
            sort: sort.map(str::to_owned),
            limit,
        };
        Ok(self
            .test_management
            .search_test_records(&request)
            .await?
            .records)
    }

    /// Fetches one test run, or `None` if it does not exist.
    pub async fn get_test_run_by_id(
        &self,
        project_id: &str,
        test_run_id: &str,
    ) -> Result<Option<TestRun>> {
        let request = GetTestRunById {
            project: project_id.to_owned(),
            id: test_run_id.to_owned(),
        };
        Ok(self
            .test_management
            .get_test_run_by_id(&request)
            .await?
            .test_run)
    }

    /// Searches test runs, populating the selected fields.
    pub async fn query_test_runs(
        &self,
        query: &str,
        sort: Option<&str>,
        fields: &[&str],
    ) -> Result<Vec<TestRun>> {
        let request = SearchTestRunsWithFields {
            query: query.to_owned(),
            sort: sort.map(str::to_owned),
            fields: owned(fields),
        };
        Ok(self
            .test_management
            .search_test_runs_with_fields(&request)
            .await?
            .test_runs)
    }
}

impl fmt::Debug for Polarion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polarion")
            .field("session_endpoint", &self.session.client().endpoint())
            .field("tracker_endpoint", &self.tracker.client().endpoint())
            .field(
                "test_management_endpoint",
                &self.test_management.client().endpoint(),
            )
            .finish_non_exhaustive()
    }
}

fn owned(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|field| (*field).to_owned()).collect()
}
