use anyhow::Result;
use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResourceList;
use kube::Client;
use tracing::{debug, warn};

use crate::types::{CatalogEntry, GroupResource};

/// Source of the resource types a cluster exposes.
#[async_trait]
pub trait ResourceCatalog: Send + Sync {
    async fn fetch(&self) -> Result<Vec<CatalogEntry>>;
}

pub struct KubeCatalog {
    client: Client,
}

impl KubeCatalog {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn extract_group_version(group_version: &str) -> (String, String) {
    match group_version.split_once('/') {
        Some((group, version)) => (group.to_string(), version.to_string()),
        None => (String::new(), group_version.to_string()),
    }
}

fn push_entries(entries: &mut Vec<CatalogEntry>, list: APIResourceList) {
    let (group, version) = extract_group_version(&list.group_version);
    entries.extend(
        list.resources
            .into_iter()
            .filter(|r| !r.name.contains('/'))
            .map(|r| CatalogEntry {
                group: group.clone(),
                version: version.clone(),
                resource: r.name,
            }),
    );
}

#[async_trait]
impl ResourceCatalog for KubeCatalog {
    /// Lists the core resources and the preferred version of every API group.
    /// Subresources are not part of the result.
    ///
    /// A group whose resources cannot be listed, typically an aggregated API
    /// whose backing service is down, is skipped with a warning.
    async fn fetch(&self) -> Result<Vec<CatalogEntry>> {
        let mut entries = Vec::new();

        let core_api_versions = self.client.list_core_api_versions().await?;
        if let Some(version) = core_api_versions.versions.first() {
            let list = self.client.list_core_api_resources(version).await?;
            push_entries(&mut entries, list);
        }

        let api_groups = self.client.list_api_groups().await?;
        for group in api_groups.groups {
            let Some(gv) = group
                .preferred_version
                .or_else(|| group.versions.into_iter().next())
            else {
                continue;
            };
            match self.client.list_api_group_resources(&gv.group_version).await {
                Ok(list) => push_entries(&mut entries, list),
                Err(e) => warn!(
                    group_version = %gv.group_version,
                    error = %e,
                    "skipping api group that could not be discovered"
                ),
            }
        }

        debug!(count = entries.len(), "discovered api resources");
        Ok(entries)
    }
}

/// Reduces catalog entries to unique group resources, in discovery order.
pub fn group_resources(entries: &[CatalogEntry]) -> Vec<GroupResource> {
    let mut resources: Vec<GroupResource> = Vec::with_capacity(entries.len());
    for entry in entries {
        let gr = entry.group_resource();
        if resources.contains(&gr) {
            debug!(version = %entry.version, "{} already listed", gr);
        } else {
            resources.push(gr);
        }
    }
    resources
}
