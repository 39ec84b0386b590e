//! Shared helpers for integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::collections::VecDeque;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use msgboard_core::{
    ApiClient, ClientConfig, Dashboard, Effect, Error, RequestObserver,
};
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Client pointed at a mock server.
pub fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ClientConfig::new(&server.uri()).unwrap()).unwrap()
}

/// Client pointed at `port` on localhost, with a short timeout.
pub fn client_on_port(port: u16) -> ApiClient {
    let config = ClientConfig::new(&format!("http://127.0.0.1:{port}"))
        .unwrap()
        .with_timeout(Duration::from_secs(2));
    ApiClient::new(config).unwrap()
}

/// A localhost port with nothing listening on it.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Mounts a JSON response for `GET route`.
pub async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// The fixture set the server inserts on `/setup-test-data`.
pub fn fixture_messages() -> Value {
    json!([
        {"_id": "1", "date": "2023-01-01", "type": "INFO", "message": "Message de test 1"},
        {"_id": "2", "date": "2023-01-01", "type": "ERROR", "message": "Message de test 2"},
        {"_id": "3", "date": "2023-01-02", "type": "WARNING", "message": "Message de test 3"}
    ])
}

/// Runs effects against the client until none remain. Timers are skipped.
pub async fn drive(dashboard: &mut Dashboard, client: &ApiClient, effects: Vec<Effect>) {
    let mut queue: VecDeque<Effect> = effects.into();
    while let Some(effect) = queue.pop_front() {
        let next = match effect {
            Effect::LoadCatalog => dashboard.catalog_loaded(client.load_catalog().await),
            Effect::FetchMessages(ticket) => {
                let result = client.messages_for(ticket.selection()).await;
                dashboard.messages_loaded(&ticket, result)
            }
            Effect::SeedTestData => dashboard.seed_finished(client.seed_test_data().await),
            Effect::LoadDatabaseConfig => {
                dashboard.database_config_loaded(client.database_config().await)
            }
            Effect::RepairMessages => dashboard.repair_finished(client.repair_messages().await),
            Effect::ExpireNotice { .. } => Vec::new(),
        };
        queue.extend(next);
    }
}

/// Observer that records every event as a line of text.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl RequestObserver for RecordingObserver {
    fn on_request(&self, method: &Method, url: &Url) {
        self.push(format!("request {method} {}", url.path()));
    }

    fn on_response(&self, method: &Method, url: &Url, status: StatusCode, _elapsed: Duration) {
        self.push(format!("response {method} {} {}", url.path(), status.as_u16()));
    }

    fn on_error(&self, method: &Method, url: &Url, error: &Error) {
        let kind = match error {
            Error::Transport { .. } => "transport".to_string(),
            Error::Status { status, .. } => format!("status {status}"),
            other => other.to_string(),
        };
        self.push(format!("error {method} {} {kind}", url.path()));
    }
}
