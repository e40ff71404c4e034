#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use notify_odoo::config::{HelpdeskSettings, OdooSettings};
use notify_odoo::error::{ConfigError, Error as NotifyError, OdooError};
use notify_odoo::event::Event;
use notify_odoo::notifier::{Notifier, Outcome};
use notify_odoo::odoo_client::{NewTicket, OdooClient, TicketApi, TicketId, TicketQuery};
use notify_odoo::types::EventKind;
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::time::timeout;
use url::Url;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(server: &MockServer, request_timeout: Duration) -> OdooSettings {
    OdooSettings {
        base_url: Url::parse(&server.uri()).expect("valid mock url"),
        database: "odoo".to_string(),
        uid: 2,
        api_key: SecretString::from("secret"),
        allow_http: false,
        timeout: Some(request_timeout),
        connect_timeout: Some(Duration::from_secs(1)),
    }
}

fn client(server: &MockServer) -> OdooClient {
    OdooClient::new(&settings(server, Duration::from_secs(2)), true).expect("client")
}

fn rpc_result(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": result
    }))
}

fn host_event(notification_type: &str) -> Event {
    let vars = [
        ("NOTIFY_NOTIFICATIONTYPE", notification_type.to_string()),
        ("NOTIFY_WHAT", "HOST".to_string()),
        ("OMD_SITE", "site1".to_string()),
        ("NOTIFY_HOSTNAME", "web01".to_string()),
        ("NOTIFY_HOSTOUTPUT", "CRIT - Host unreachable".to_string()),
        ("NOTIFY_HOSTPROBLEMID", "0".to_string()),
        ("NOTIFY_LASTHOSTPROBLEMID", "17".to_string()),
        ("NOTIFY_HOST_CUSTOMER", "acme_42".to_string()),
    ];
    Event::from_lookup(|key| {
        vars.iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.clone())
    })
    .expect("event")
}

async fn request_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .expect("requests")
        .iter()
        .map(|request| serde_json::from_slice(&request.body).expect("json body"))
        .collect()
}

#[tokio::test]
async fn search_posts_execute_kw_to_jsonrpc_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/jsonrpc"))
        .and(body_string_contains("\"search\""))
        .respond_with(rpc_result(json!([12, 13])))
        .expect(1)
        .mount(&server)
        .await;

    let query = TicketQuery {
        customer_id: 42,
        host_name: "web01",
        problem_id: 17,
        service_name: None,
    };
    let ids = client(&server)
        .search(&query.domain(&HelpdeskSettings::default()))
        .await
        .expect("search");
    assert_eq!(ids, vec![TicketId(12), TicketId(13)]);

    let bodies = request_bodies(&server).await;
    assert_eq!(bodies[0]["params"]["service"], json!("object"));
    assert_eq!(bodies[0]["params"]["method"], json!("execute_kw"));
    assert_eq!(
        bodies[0]["params"]["args"][5],
        json!([[
            ["area_id", "=", 1],
            ["team_id", "=", 5],
            ["stage_id", "!=", 68],
            ["x_CHECKMK_HOSTNAME", "=", "web01"],
            ["x_CHECKMK_PROBLEM_ID", "=", 17],
            ["partner_id", "=", 42]
        ]])
    );
}

#[tokio::test]
async fn create_request_payload_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(rpc_result(json!(501)))
        .mount(&server)
        .await;

    let ticket = NewTicket {
        customer_id: 42,
        site: "site1",
        kind: EventKind::Host,
        host_name: "web01",
        problem_id: 17,
        description: "CRIT - Host unreachable",
        service_name: None,
    };
    let id = client(&server)
        .create(&ticket.payload(&HelpdeskSettings::default()))
        .await
        .expect("create");
    assert_eq!(id, TicketId(501));

    let body = request_bodies(&server).await.remove(0);
    insta::assert_json_snapshot!("create_ticket_payload", body);
}

#[tokio::test]
async fn returns_api_error_details() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {
                "code": 200,
                "message": "Odoo Server Error",
                "data": {
                    "name": "odoo.exceptions.AccessDenied",
                    "message": "Access Denied"
                }
            }
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .search(&[])
        .await
        .expect_err("should fail");
    match err {
        NotifyError::Odoo(OdooError::Api { code, message }) => {
            assert_eq!(code, 200);
            assert!(message.contains("Access Denied"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn server_errors_are_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .search(&[])
        .await
        .expect_err("should fail");
    assert!(matches!(
        err,
        NotifyError::Odoo(OdooError::HttpStatus { status }) if status.as_u16() == 503
    ));
}

#[tokio::test]
async fn undecodable_body_is_a_json_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Maintenance</html>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .search(&[])
        .await
        .expect_err("should fail");
    match err {
        NotifyError::Odoo(OdooError::Json { message }) => {
            assert!(message.contains("Maintenance"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn timeouts_surface_as_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(rpc_result(json!([])).set_delay(Duration::from_millis(1500)))
        .mount(&server)
        .await;

    let client = OdooClient::new(&settings(&server, Duration::from_millis(300)), true).unwrap();

    let res = timeout(Duration::from_secs(5), client.search(&[])).await;
    let err = res.expect("timeout future").expect_err("should fail");
    assert!(matches!(err, NotifyError::Odoo(OdooError::Request { .. })));
}

#[tokio::test]
async fn plain_http_requires_insecure_flag() {
    let server = MockServer::start().await;
    let err = OdooClient::new(&settings(&server, Duration::from_secs(1)), false)
        .err()
        .expect("http url should be rejected");
    assert!(matches!(
        err,
        NotifyError::Config(ConfigError::InvalidField {
            field: "odoo.url",
            ..
        })
    ));
}

#[tokio::test]
async fn allow_http_setting_reaches_plain_http_server() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(rpc_result(json!([5])))
        .expect(1)
        .mount(&server)
        .await;

    let settings = OdooSettings {
        allow_http: true,
        ..settings(&server, Duration::from_secs(2))
    };
    let ids = OdooClient::new(&settings, false)
        .expect("client")
        .search(&[])
        .await
        .expect("search");
    assert_eq!(ids, vec![TicketId(5)]);
}

#[tokio::test]
async fn problem_notification_opens_a_ticket() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("\"search\""))
        .respond_with(rpc_result(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("\"create\""))
        .respond_with(rpc_result(json!(501)))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = Notifier::new(client(&server), HelpdeskSettings::default());
    let outcome = notifier.handle(&host_event("PROBLEM")).await.expect("handle");
    assert_eq!(outcome, Outcome::Created(TicketId(501)));

    let bodies = request_bodies(&server).await;
    let payload = &bodies[1]["params"]["args"][5][0];
    assert_eq!(payload["name"], json!("Ticket for site1 - Host: web01"));
    assert_eq!(payload["x_CHECKMK_PROBLEM_ID"], json!(17));
}

#[tokio::test]
async fn recovery_notification_closes_the_ticket() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("\"search\""))
        .respond_with(rpc_result(json!([77])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("\"write\""))
        .respond_with(rpc_result(json!(true)))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = Notifier::new(client(&server), HelpdeskSettings::default());
    let outcome = notifier.handle(&host_event("RECOVERY")).await.expect("handle");
    assert_eq!(outcome, Outcome::Closed(TicketId(77)));

    let bodies = request_bodies(&server).await;
    assert_eq!(bodies[1]["params"]["args"][5], json!([[77], { "stage_id": 69 }]));
}

#[tokio::test]
async fn failed_lookup_still_opens_a_ticket() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("\"search\""))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("\"create\""))
        .respond_with(rpc_result(json!(502)))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = Notifier::new(client(&server), HelpdeskSettings::default());
    let outcome = notifier.handle(&host_event("PROBLEM")).await.expect("handle");
    assert_eq!(outcome, Outcome::Created(TicketId(502)));
}
