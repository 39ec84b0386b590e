//! End-to-end dashboard flows: state transitions driven against a mock API.

#![allow(clippy::unwrap_used)]

mod common;

use std::net::TcpListener;

use common::{client_for, client_on_port, drive, fixture_messages, free_port, mount_json};
use msgboard_core::dashboard::{DatePanel, ListPanel};
use msgboard_core::{Connection, Dashboard, DateFormatter, DateToken, FetchPhase, TypeFilter};
use chrono::Locale;
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_catalog(server: &MockServer) {
    mount_json(server, "/messages/dates", json!(["2023-01-01", "2023-01-02"])).await;
    mount_json(server, "/messages/types", json!(["INFO", "ERROR", "WARNING"])).await;
}

#[tokio::test]
async fn test_startup_selects_latest_and_loads_messages() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(method("GET"))
        .and(path("/messages"))
        .and(query_param("date", "2023-01-02"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "3", "date": "2023-01-02", "type": "WARNING", "message": "Message de test 3"}
        ])))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let mut dashboard = Dashboard::default();
    let effects = dashboard.start();
    drive(&mut dashboard, &client, effects).await;

    assert_eq!(dashboard.connection(), &Connection::Connected);
    assert_eq!(
        dashboard.selection().date,
        Some(DateToken::new("2023-01-02"))
    );
    assert_eq!(dashboard.phase(), &FetchPhase::Ready);
    assert_eq!(dashboard.messages().len(), 1);
    assert!(!dashboard.is_loading());

    let formatter = DateFormatter::new(Locale::en_US);
    let DatePanel::Chips { chips, hidden, .. } = dashboard.date_panel(&formatter) else {
        panic!("expected date chips");
    };
    assert_eq!(hidden, 0);
    assert_eq!(
        chips.iter().map(|c| c.label.as_str()).collect::<Vec<_>>(),
        vec!["2 Jan 2023", "1 Jan 2023"]
    );
}

#[tokio::test]
async fn test_all_specific_all_returns_to_unfiltered() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(method("GET"))
        .and(path("/messages"))
        .and(query_param("date", "2023-01-01"))
        .and(query_param_is_missing("type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"date": "2023-01-01", "type": "INFO", "message": "Message de test 1"},
            {"date": "2023-01-01", "type": "ERROR", "message": "Message de test 2"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/messages"))
        .and(query_param("date", "2023-01-01"))
        .and(query_param("type", "ERROR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"date": "2023-01-01", "type": "ERROR", "message": "Message de test 2"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/messages"))
        .and(query_param("date", "2023-01-02"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let mut dashboard = Dashboard::default();
    let effects = dashboard.start();
    drive(&mut dashboard, &client, effects).await;

    let effects = dashboard.select_date(DateToken::new("2023-01-01"));
    drive(&mut dashboard, &client, effects).await;
    let unfiltered = dashboard.messages().to_vec();
    assert_eq!(unfiltered.len(), 2);

    let effects = dashboard.select_type(TypeFilter::Only("ERROR".into()));
    drive(&mut dashboard, &client, effects).await;
    assert_eq!(dashboard.messages().len(), 1);
    assert_eq!(dashboard.messages()[0].kind, "ERROR");

    let effects = dashboard.select_type(TypeFilter::All);
    drive(&mut dashboard, &client, effects).await;
    assert_eq!(dashboard.messages(), unfiltered.as_slice());
}

#[tokio::test]
async fn test_empty_selection_shows_no_matches() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    mount_json(&server, "/messages", json!([])).await;
    let client = client_for(&server);

    let mut dashboard = Dashboard::default();
    let effects = dashboard.start();
    drive(&mut dashboard, &client, effects).await;

    let formatter = DateFormatter::new(Locale::en_US);
    assert_eq!(
        dashboard.list_panel(&formatter),
        ListPanel::NoMatches {
            date: "2 Jan 2023".into(),
            kind: None
        }
    );
}

#[tokio::test]
async fn test_transport_failure_then_retry_reissues_catalog() {
    let port = free_port();
    let client = client_on_port(port);

    let mut dashboard = Dashboard::default();
    let effects = dashboard.start();
    drive(&mut dashboard, &client, effects).await;

    let banner = dashboard.banner().unwrap();
    assert!(!banner.retrying);
    assert!(matches!(dashboard.connection(), Connection::Failed(_)));
    assert!(dashboard.notice().is_some());

    // Bring the server up on the same port and retry.
    let listener = TcpListener::bind(("127.0.0.1", port)).unwrap();
    let server = MockServer::builder().listener(listener).start().await;
    mount_catalog(&server).await;
    mount_json(&server, "/messages", fixture_messages()).await;

    let effects = dashboard.retry();
    assert!(dashboard.banner().is_none());
    assert!(dashboard.notice().is_none());
    drive(&mut dashboard, &client, effects).await;

    assert_eq!(dashboard.connection(), &Connection::Connected);
    let paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(paths, vec!["/messages/dates", "/messages/types", "/messages"]);
}

#[tokio::test]
async fn test_seed_from_empty_database() {
    let server = MockServer::start().await;
    // The dates endpoint answers with a non-array until data exists.
    Mock::given(method("GET"))
        .and(path("/messages/dates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detail": "empty"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_json(&server, "/messages/dates", json!(["2023-01-01"])).await;
    mount_json(&server, "/messages/types", json!(["INFO"])).await;
    mount_json(
        &server,
        "/setup-test-data",
        json!({"message": "Test data inserted successfully"}),
    )
    .await;
    mount_json(&server, "/messages", fixture_messages()).await;
    let client = client_for(&server);

    let mut dashboard = Dashboard::default();
    let effects = dashboard.start();
    drive(&mut dashboard, &client, effects).await;
    let formatter = DateFormatter::default();
    assert_eq!(dashboard.date_panel(&formatter), DatePanel::Empty);
    assert_eq!(dashboard.list_panel(&formatter), ListPanel::NoDateSelected);

    let effects = dashboard.seed();
    drive(&mut dashboard, &client, effects).await;
    assert_eq!(dashboard.dates(), &[DateToken::new("2023-01-01")]);
    assert_eq!(dashboard.phase(), &FetchPhase::Ready);
}

#[tokio::test]
async fn test_repair_failure_raises_notice() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    mount_json(&server, "/messages", json!([])).await;
    Mock::given(method("GET"))
        .and(path("/repair-messages"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let mut dashboard = Dashboard::default();
    let effects = dashboard.start();
    drive(&mut dashboard, &client, effects).await;
    let effects = dashboard.repair();
    drive(&mut dashboard, &client, effects).await;

    assert!(dashboard.notice().is_some());
    assert!(dashboard.dialog().is_none());
    assert_eq!(dashboard.connection(), &Connection::Connected);
}
