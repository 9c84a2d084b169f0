// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

#[derive(Clone)]
enum MockResponse {
    Json(u16, String),
    /// Fail at the transport layer, before any HTTP response
    Transport(String),
}

/// A mock HTTP service that returns predefined responses based on request paths
/// and records every request it receives.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), MockResponse>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.respond("GET", path, MockResponse::Json(status, body.to_string()))
    }

    /// Add a response for DELETE requests matching the exact path
    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.respond("DELETE", path, MockResponse::Json(status, body.to_string()))
    }

    /// Make GET requests on the path fail as if the connection dropped
    pub fn fail_get(self, path: &str, message: &str) -> Self {
        self.respond("GET", path, MockResponse::Transport(message.to_string()))
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// Every (method, path) received so far, in order
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn respond(self, method: &str, path: &str, response: MockResponse) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), response);
        self
    }

    fn find_response(&self, method: &str, path: &str) -> Option<MockResponse> {
        self.responses
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .cloned()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        self.requests
            .lock()
            .unwrap()
            .push((method.clone(), path.clone()));
        let response = self.find_response(&method, &path);

        Box::pin(async move {
            match response {
                Some(MockResponse::Json(status, body)) => Ok(json_response(status, body)),
                Some(MockResponse::Transport(message)) => Err(message.into()),
                // Default 404 for unmatched requests
                None => Ok(json_response(404, status_json(404, "NotFound"))),
            }
        })
    }
}

fn json_response(status: u16, body: String) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body.into_bytes()))
        .unwrap()
}

/// Create a JSON object with owner references and labels.
/// `owners` are (apiVersion, kind, name) triples.
pub fn object_json(
    api_version: &str,
    kind: &str,
    namespace: Option<&str>,
    name: &str,
    owners: &[(&str, &str, &str)],
    labels: &[(&str, &str)],
) -> String {
    object_value(api_version, kind, namespace, name, owners, labels).to_string()
}

/// Create a list response wrapping the given objects
pub fn list_json(api_version: &str, kind: &str, items: Vec<serde_json::Value>) -> String {
    serde_json::json!({
        "apiVersion": api_version,
        "kind": format!("{}List", kind),
        "metadata": { "resourceVersion": "1" },
        "items": items,
    })
    .to_string()
}

pub fn object_value(
    api_version: &str,
    kind: &str,
    namespace: Option<&str>,
    name: &str,
    owners: &[(&str, &str, &str)],
    labels: &[(&str, &str)],
) -> serde_json::Value {
    let owner_references: Vec<serde_json::Value> = owners
        .iter()
        .map(|(owner_api_version, owner_kind, owner_name)| {
            serde_json::json!({
                "apiVersion": owner_api_version,
                "kind": owner_kind,
                "name": owner_name,
                "uid": format!("{}-uid", owner_name),
                "controller": true,
            })
        })
        .collect();
    let labels: serde_json::Map<String, serde_json::Value> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
        .collect();

    let mut metadata = serde_json::json!({
        "name": name,
        "uid": format!("{}-uid", name),
        "ownerReferences": owner_references,
        "labels": labels,
    });
    if let Some(ns) = namespace {
        metadata["namespace"] = serde_json::Value::String(ns.to_string());
    }

    serde_json::json!({
        "apiVersion": api_version,
        "kind": kind,
        "metadata": metadata,
    })
}

/// Create a Status failure response
pub fn status_json(code: u16, reason: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("request failed: {}", reason),
        "reason": reason,
        "code": code
    })
    .to_string()
}
