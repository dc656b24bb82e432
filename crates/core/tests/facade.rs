//! Facade behavior over a stub transport: session propagation, local
//! preconditions, and payload unwrapping.

mod common;

use common::{StubTransport, envelope_with_body, login_response};
use polarion::{Error, Polarion, PolarionConfig, TransportResponse};
use std::sync::Arc;

const BASE_URL: &str = "https://example.test";

fn config() -> PolarionConfig {
    PolarionConfig::new(BASE_URL, "alice", "tok-1")
}

async fn connect_with(script: Vec<TransportResponse>) -> (Polarion, Arc<StubTransport>) {
    let transport = Arc::new(StubTransport::new(script));
    let client = Polarion::connect_with_transport(config(), transport.clone())
        .await
        .expect("login should succeed");
    (client, transport)
}

#[tokio::test]
async fn login_posts_to_the_session_endpoint() {
    let (_, transport) = connect_with(vec![StubTransport::ok(login_response("sid-1"))]).await;

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].url,
        "https://example.test/polarion/ws/services/SessionWebService?wsdl"
    );
    assert_eq!(requests[0].soap_action, "urn:logInWithToken");
    assert!(!requests[0].body.contains("sessionID"));
}

#[tokio::test]
async fn all_services_share_one_session_header() {
    let (client, _) = connect_with(vec![StubTransport::ok(login_response("sid-7"))]).await;

    let session = client.session().client().session_header();
    let tracker = client.tracker().client().session_header();
    let test_management = client.test_management().client().session_header();

    assert_eq!(session.session_id(), "sid-7");
    // the same allocation, not merely equal values
    assert!(Arc::ptr_eq(session, tracker));
    assert!(Arc::ptr_eq(session, test_management));
}

#[tokio::test]
async fn calls_carry_the_login_session_id() {
    let (client, transport) = connect_with(vec![
        StubTransport::ok(login_response("sid-42")),
        StubTransport::ok(envelope_with_body(
            r#"<getWorkItemsCountResponse xmlns="http://ws.polarion.com/TrackerWebService-impl">
                 <getWorkItemsCountReturn>3</getWorkItemsCountReturn>
               </getWorkItemsCountResponse>"#,
        )),
    ])
    .await;

    let count = client.get_work_items_count("status:open").await.unwrap();
    assert_eq!(count, 3);

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[1].url,
        "https://example.test/polarion/ws/services/TrackerWebService?wsdl"
    );
    assert_eq!(requests[1].soap_action, "urn:getWorkItemsCount");
    assert!(requests[1].body.contains(">sid-42</sessionID>"));
    assert!(requests[1].body.contains("<query>status:open</query>"));
}

#[tokio::test]
async fn login_failure_yields_no_client() {
    let transport = Arc::new(StubTransport::new(vec![TransportResponse {
        status: 500,
        body: "Internal Server Error".to_owned(),
    }]));

    let err = Polarion::connect_with_transport(config(), transport)
        .await
        .err()
        .expect("construction must fail");
    assert!(matches!(
        err,
        Error::Status {
            operation: "logInWithToken",
            status: 500
        }
    ));
}

#[tokio::test]
async fn login_without_session_header_fails_construction() {
    let transport = Arc::new(StubTransport::new(vec![StubTransport::ok(
        envelope_with_body(
            r#"<logInWithTokenResponse xmlns="http://ws.polarion.com/SessionWebService-impl"/>"#,
        ),
    )]));

    let err = Polarion::connect_with_transport(config(), transport)
        .await
        .unwrap_err();
    assert!(err.is_missing_data());
}

#[tokio::test]
async fn field_selection_without_sort_is_rejected_before_any_request() {
    let (client, transport) = connect_with(vec![StubTransport::ok(login_response("sid-1"))]).await;
    let calls_after_login = transport.call_count();

    let err = client
        .query_work_items("status:open", None, &["id", "title"])
        .await
        .unwrap_err();

    assert!(err.is_invalid_argument());
    assert_eq!(err.operation(), Some("queryWorkItems"));
    // rejected locally: the stub saw nothing beyond the login call
    assert_eq!(transport.call_count(), calls_after_login);
}

#[tokio::test]
async fn query_with_sort_and_fields_is_dispatched() {
    let (client, transport) = connect_with(vec![
        StubTransport::ok(login_response("sid-1")),
        StubTransport::ok(envelope_with_body(
            r#"<queryWorkItemsResponse xmlns="http://ws.polarion.com/TrackerWebService-impl">
                 <queryWorkItemsReturn><id>WI-1</id><title>First</title></queryWorkItemsReturn>
                 <queryWorkItemsReturn><id>WI-2</id><title>Second</title></queryWorkItemsReturn>
               </queryWorkItemsResponse>"#,
        )),
    ])
    .await;

    let items = client
        .query_work_items("status:open", Some("id"), &["id", "title"])
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id.as_deref(), Some("WI-1"));
    assert_eq!(items[1].title.as_deref(), Some("Second"));

    let body = &transport.requests()[1].body;
    assert!(body.contains("<sort>id</sort>"));
    assert!(body.contains("<fields>id</fields>"));
    assert!(body.contains("<fields>title</fields>"));
}

#[tokio::test]
async fn is_logged_in_distinguishes_false_from_undetermined() {
    let has_subject = |payload: &str| {
        StubTransport::ok(envelope_with_body(&format!(
            r#"<hasSubjectResponse xmlns="http://ws.polarion.com/SessionWebService-impl">{payload}</hasSubjectResponse>"#
        )))
    };

    let (client, _) = connect_with(vec![
        StubTransport::ok(login_response("sid-1")),
        has_subject("<hasSubjectReturn>true</hasSubjectReturn>"),
        has_subject("<hasSubjectReturn>false</hasSubjectReturn>"),
        has_subject(""),
    ])
    .await;

    assert!(client.is_logged_in().await.unwrap());
    assert!(!client.is_logged_in().await.unwrap());

    // a null payload is an error, not "logged out"
    let err = client.is_logged_in().await.unwrap_err();
    assert!(matches!(
        err,
        Error::MissingData {
            operation: "hasSubject",
            what: "hasSubjectReturn"
        }
    ));
}

#[tokio::test]
async fn remote_fault_surfaces_code_and_reason() {
    let (client, _) = connect_with(vec![
        StubTransport::ok(login_response("sid-1")),
        TransportResponse {
            status: 500,
            body: envelope_with_body(
                r#"<soapenv:Fault>
                     <faultcode>soapenv:Server.userException</faultcode>
                     <faultstring>Unresolvable object</faultstring>
                   </soapenv:Fault>"#,
            ),
        },
    ])
    .await;

    let err = client
        .get_work_item_by_id("PROJ", "WI-404")
        .await
        .unwrap_err();
    assert!(err.is_fault());
    assert!(matches!(
        err,
        Error::Fault { ref reason, .. } if reason == "Unresolvable object"
    ));
}

#[tokio::test]
async fn nil_work_item_maps_to_none() {
    let (client, _) = connect_with(vec![
        StubTransport::ok(login_response("sid-1")),
        StubTransport::ok(envelope_with_body(
            r#"<getWorkItemByIdResponse xmlns="http://ws.polarion.com/TrackerWebService-impl">
                 <getWorkItemByIdReturn xsi:nil="true"/>
               </getWorkItemByIdResponse>"#,
        )),
    ])
    .await;

    let item = client.get_work_item_by_id("PROJ", "WI-404").await.unwrap();
    assert!(item.is_none());
}

#[tokio::test]
async fn test_management_calls_use_their_own_endpoint() {
    let (client, transport) = connect_with(vec![
        StubTransport::ok(login_response("sid-1")),
        StubTransport::ok(envelope_with_body(
            r#"<getTestRunByIdResponse xmlns="http://ws.polarion.com/TestManagementWebService-impl">
                 <getTestRunByIdReturn><id>TR-1</id><title>Smoke</title></getTestRunByIdReturn>
               </getTestRunByIdResponse>"#,
        )),
    ])
    .await;

    let run = client
        .get_test_run_by_id("PROJ", "TR-1")
        .await
        .unwrap()
        .expect("test run exists");
    assert_eq!(run.title.as_deref(), Some("Smoke"));

    let requests = transport.requests();
    assert_eq!(
        requests[1].url,
        "https://example.test/polarion/ws/services/TestManagementWebService?wsdl"
    );
    assert_eq!(requests[1].soap_action, "urn:getTestRunById");
}

#[tokio::test]
async fn baseline_sql_query_forwards_caller_fields() {
    let (client, transport) = connect_with(vec![
        StubTransport::ok(login_response("sid-1")),
        StubTransport::ok(envelope_with_body(
            r#"<queryWorkItemsInBaselineBySQLResponse xmlns="http://ws.polarion.com/TrackerWebService-impl"/>"#,
        )),
    ])
    .await;

    let items = client
        .query_work_items_in_baseline_by_sql("1204", "SELECT * FROM WORKITEM", &["id", "severity"])
        .await
        .unwrap();
    assert!(items.is_empty());

    let body = &transport.requests()[1].body;
    assert!(body.contains("<baselineRevision>1204</baselineRevision>"));
    assert!(body.contains("<sqlQuery>SELECT * FROM WORKITEM</sqlQuery>"));
    assert!(body.contains("<fields>severity</fields>"));
}
