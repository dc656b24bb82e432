//! Typed client for the `TestManagementWebService`.

use polarion_protocol::test_management::{
    GetTestCaseRecords, GetTestCaseRecordsResponse, GetTestRunById, GetTestRunByIdResponse,
    SearchTestRecords, SearchTestRecordsResponse, SearchTestRunsWithFields,
    SearchTestRunsWithFieldsResponse,
};
use polarion_runtime::{Result, ServiceClient};

/// Test-management service operations.
pub struct TestManagementService {
    client: ServiceClient,
}

impl TestManagementService {
    pub(crate) fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// The underlying endpoint-bound client.
    pub fn client(&self) -> &ServiceClient {
        &self.client
    }

    pub async fn get_test_case_records(
        &self,
        request: &GetTestCaseRecords,
    ) -> Result<GetTestCaseRecordsResponse> {
        self.client.call(request).await
    }

    pub async fn search_test_records(
        &self,
        request: &SearchTestRecords,
    ) -> Result<SearchTestRecordsResponse> {
        self.client.call(request).await
    }

    pub async fn get_test_run_by_id(
        &self,
        request: &GetTestRunById,
    ) -> Result<GetTestRunByIdResponse> {
        self.client.call(request).await
    }

    pub async fn search_test_runs_with_fields(
        &self,
        request: &SearchTestRunsWithFields,
    ) -> Result<SearchTestRunsWithFieldsResponse> {
        self.client.call(request).await
    }
}
