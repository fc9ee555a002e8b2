//! In-memory collaborators for driving the pipeline without a cluster.

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use http::{Request, Response, StatusCode};
use hyper::Body;
use kube::Client;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::check::AccessReviewer;
use crate::discovery::ResourceCatalog;
use crate::report::Reporter;
use crate::types::{Access, CatalogEntry, GroupResource, Verb};

pub struct FakeCatalog {
    entries: Option<Vec<CatalogEntry>>,
}

impl FakeCatalog {
    pub fn new(entries: &[(&str, &str, &str)]) -> Self {
        Self {
            entries: Some(
                entries
                    .iter()
                    .map(|(group, version, resource)| CatalogEntry {
                        group: group.to_string(),
                        version: version.to_string(),
                        resource: resource.to_string(),
                    })
                    .collect(),
            ),
        }
    }

    pub fn unreachable() -> Self {
        Self { entries: None }
    }
}

#[async_trait]
impl ResourceCatalog for FakeCatalog {
    async fn fetch(&self) -> Result<Vec<CatalogEntry>> {
        match &self.entries {
            Some(entries) => Ok(entries.clone()),
            None => bail!("connection refused"),
        }
    }
}

type Call = (GroupResource, Verb, Option<String>);

/// Answers from a table keyed by resource name and verb.
///
/// `None` in the table makes the review fail.
pub struct FakeReviewer {
    default: Option<Access>,
    answers: HashMap<(String, Verb), Option<Access>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeReviewer {
    pub fn allowing_all() -> Self {
        Self {
            default: Some(Access::Allowed),
            answers: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_by_default() -> Self {
        Self {
            default: None,
            answers: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn allow(mut self, resource: &str, verb: Verb) -> Self {
        self.answers
            .insert((resource.to_string(), verb), Some(Access::Allowed));
        self
    }

    pub fn deny(mut self, resource: &str, verb: Verb) -> Self {
        self.answers
            .insert((resource.to_string(), verb), Some(Access::Denied));
        self
    }

    pub fn fail(mut self, resource: &str, verb: Verb) -> Self {
        self.answers.insert((resource.to_string(), verb), None);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccessReviewer for FakeReviewer {
    async fn review(
        &self,
        resource: &GroupResource,
        verb: Verb,
        namespace: Option<&str>,
    ) -> Result<Access> {
        self.calls.lock().unwrap().push((
            resource.clone(),
            verb,
            namespace.map(str::to_string),
        ));
        self.answers
            .get(&(resource.resource.clone(), verb))
            .copied()
            .unwrap_or(self.default)
            .ok_or_else(|| anyhow!("the server could not find the requested resource"))
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    infos: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }
}

pub type ApiHandle = tower_test::mock::Handle<Request<Body>, Response<Body>>;

/// A kube client whose requests are answered through the returned handle.
pub fn mock_client() -> (Client, ApiHandle) {
    let (service, handle) = tower_test::mock::pair::<Request<Body>, Response<Body>>();
    (Client::new(service, "default"), handle)
}

pub fn json_response(status: StatusCode, body: Value) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// A `metav1.Status` failure body as the API server sends it.
pub fn api_status(status: StatusCode, message: &str) -> Value {
    json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Failure",
        "message": message,
        "reason": status.canonical_reason().unwrap_or("Unknown").replace(' ', ""),
        "code": status.as_u16(),
    })
}
