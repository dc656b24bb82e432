//! Typed client for the `SessionWebService`.

use polarion_protocol::session::{HasSubject, HasSubjectResponse};
use polarion_runtime::{Result, ServiceClient};

/// Session service operations.
///
/// Login itself is not here: it runs before any service client exists,
/// during [`Polarion::connect`](crate::Polarion::connect).
pub struct SessionService {
    client: ServiceClient,
}

impl SessionService {
    pub(crate) fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// The underlying endpoint-bound client.
    pub fn client(&self) -> &ServiceClient {
        &self.client
    }

    pub async fn has_subject(&self) -> Result<HasSubjectResponse> {
        self.client.call(&HasSubject).await
    }
}
