//! Typed client for the `TrackerWebService`.
//!
//! One method per remote operation, request struct in, response struct
//! out. The ergonomic parameter-level API lives on
//! [`Polarion`](crate::Polarion).

use polarion_protocol::tracker::{
    GetCustomField, GetCustomFieldResponse, GetWorkItemById, GetWorkItemByIdResponse,
    GetWorkItemsCount, GetWorkItemsCountResponse, QueryBaselines, QueryBaselinesResponse,
    QueryRevisions, QueryRevisionsResponse, QueryWorkItems, QueryWorkItemsBySql,
    QueryWorkItemsBySqlResponse, QueryWorkItemsInBaseline, QueryWorkItemsInBaselineBySql,
    QueryWorkItemsInBaselineBySqlResponse, QueryWorkItemsInBaselineResponse,
    QueryWorkItemsResponse,
};
use polarion_runtime::{Result, ServiceClient};

/// Tracker service operations.
pub struct TrackerService {
    client: ServiceClient,
}

impl TrackerService {
    pub(crate) fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// The underlying endpoint-bound client.
    pub fn client(&self) -> &ServiceClient {
        &self.client
    }

    pub async fn get_work_item_by_id(
        &self,
        request: &GetWorkItemById,
    ) -> Result<GetWorkItemByIdResponse> {
        self.client.call(request).await
    }

    pub async fn query_work_items(
        &self,
        request: &QueryWorkItems,
    ) -> Result<QueryWorkItemsResponse> {
        self.client.call(request).await
    }

    pub async fn query_work_items_by_sql(
        &self,
        request: &QueryWorkItemsBySql,
    ) -> Result<QueryWorkItemsBySqlResponse> {
        self.client.call(request).await
    }

    pub async fn get_work_items_count(
        &self,
        request: &GetWorkItemsCount,
    ) -> Result<GetWorkItemsCountResponse> {
        self.client.call(request).await
    }

    pub async fn query_baselines(
        &self,
        request: &QueryBaselines,
    ) -> Result<QueryBaselinesResponse> {
        self.client.call(request).await
    }

    pub async fn query_work_items_in_baseline(
        &self,
        request: &QueryWorkItemsInBaseline,
    ) -> Result<QueryWorkItemsInBaselineResponse> {
        self.client.call(request).await
    }

    pub async fn query_work_items_in_baseline_by_sql(
        &self,
        request: &QueryWorkItemsInBaselineBySql,
    ) -> Result<QueryWorkItemsInBaselineBySqlResponse> {
        self.client.call(request).await
    }

    pub async fn query_revisions(
        &self,
        request: &QueryRevisions,
    ) -> Result<QueryRevisionsResponse> {
        self.client.call(request).await
    }

    pub async fn get_custom_field(
        &self,
        request: &GetCustomField,
    ) -> Result<GetCustomFieldResponse> {
        self.client.call(request).await
    }
}
