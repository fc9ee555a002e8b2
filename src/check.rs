use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures::{stream, StreamExt};
use k8s_openapi::api::authorization::v1::SelfSubjectAccessReview;
use kube::api::{Api, PostParams};
use kube::Client;
use serde_json::json;
use std::collections::HashMap;
use tracing::debug;

use crate::types::{Access, FullResult, GroupResource, ResourceCheckResult, Verb};

/// Answers "may the current identity perform `verb` on `resource`?".
///
/// `Ok` carries a definite answer, either [`Access::Allowed`] or
/// [`Access::Denied`]. Any error is reported by the checker as
/// [`Access::Unknown`] for that single cell.
#[async_trait]
pub trait AccessReviewer: Send + Sync {
    async fn review(
        &self,
        resource: &GroupResource,
        verb: Verb,
        namespace: Option<&str>,
    ) -> Result<Access>;
}

pub struct KubeAccessReviewer {
    api: Api<SelfSubjectAccessReview>,
}

impl KubeAccessReviewer {
    pub fn new(client: Client) -> Self {
        Self {
            api: Api::all(client),
        }
    }
}

#[async_trait]
impl AccessReviewer for KubeAccessReviewer {
    async fn review(
        &self,
        resource: &GroupResource,
        verb: Verb,
        namespace: Option<&str>,
    ) -> Result<Access> {
        let ssar: SelfSubjectAccessReview = serde_json::from_value(json!({
            "apiVersion": "authorization.k8s.io/v1",
            "kind": "SelfSubjectAccessReview",
            "metadata": {},
            "spec": {
                "resourceAttributes": {
                  "group": resource.group,
                  "resource": resource.resource,
                  "namespace": namespace,
                  "verb": verb.as_str(),
                },
            }
        }))?;

        let res = self.api.create(&PostParams::default(), &ssar).await?;
        let status = res
            .status
            .ok_or_else(|| anyhow!("empty status in access review for {} {}", verb, resource))?;
        Ok(if status.allowed {
            Access::Allowed
        } else {
            Access::Denied
        })
    }
}

pub struct Checker<'a> {
    reviewer: &'a dyn AccessReviewer,
    namespace: Option<String>,
    concurrency: usize,
}

impl<'a> Checker<'a> {
    pub fn new(reviewer: &'a dyn AccessReviewer, namespace: Option<String>) -> Self {
        Self {
            reviewer,
            namespace: namespace.filter(|ns| !ns.is_empty()),
            concurrency: 1,
        }
    }

    /// Allows up to `concurrency` reviews in flight. Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Reviews every (resource, verb) pair exactly once.
    ///
    /// Rows come back in the order of `resources`. A failing review only
    /// affects its own cell.
    pub async fn check_all(&self, resources: &[GroupResource], verbs: &[Verb]) -> FullResult {
        let reviewer = self.reviewer;
        let namespace = self.namespace.as_deref();

        let pairs = resources
            .iter()
            .enumerate()
            .flat_map(|(idx, resource)| verbs.iter().map(move |verb| (idx, resource, *verb)));

        let outcomes: Vec<(usize, Verb, Access)> = stream::iter(pairs)
            .map(move |(idx, resource, verb)| async move {
                let access = match reviewer.review(resource, verb, namespace).await {
                    Ok(access) => access,
                    Err(e) => {
                        debug!(%resource, %verb, error = %e, "access review failed");
                        Access::Unknown
                    }
                };
                (idx, verb, access)
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut items: Vec<ResourceCheckResult> = resources
            .iter()
            .map(|resource| ResourceCheckResult {
                resource: resource.clone(),
                items: HashMap::with_capacity(verbs.len()),
            })
            .collect();
        for (idx, verb, access) in outcomes {
            items[idx].items.insert(verb, access);
        }

        FullResult { items }
    }
}
