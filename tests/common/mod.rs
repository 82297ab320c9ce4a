#![allow(dead_code)]

use halo_manager::{HaloConfig, HaloService};
use serde_json::Value;
use wiremock::{MockServer, Request};

pub const TOKEN: &str = "pat_test_token";

pub fn service_for(server: &MockServer, owner: Option<&str>) -> HaloService {
    let mut config = HaloConfig::new(format!("{}/", server.uri()), TOKEN);
    if let Some(owner) = owner {
        config = config.with_owner(owner);
    }
    HaloService::new(&config)
}

pub async fn requests_to(server: &MockServer, method: &str, path: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|req| req.method.as_str() == method && req.url.path() == path)
        .collect()
}

pub fn json_body(req: &Request) -> Value {
    serde_json::from_slice(&req.body).expect("json request body")
}
