use std::io::Write;

use anyhow::{Context, Result};
use tracing::debug;

use crate::check::{AccessReviewer, Checker};
use crate::config::Config;
use crate::constants;
use crate::discovery::{self, ResourceCatalog};
use crate::error::ValidationError;
use crate::formatter::Formatter;
use crate::report::Reporter;
use crate::types::{self, OutputFormat, Verb};

/// A validated [`Config`].
#[derive(Clone, Debug)]
pub struct Plan {
    pub verbs: Vec<Verb>,
    pub output: OutputFormat,
    pub namespace: Option<String>,
    pub concurrency: usize,
    pub color: bool,
}

impl Plan {
    pub fn from_config(config: &Config) -> Result<Self, ValidationError> {
        let verbs = types::parse_verbs(&config.verbs)?;
        let output = config.output.parse::<OutputFormat>()?;
        Ok(Self {
            verbs,
            output,
            namespace: config.namespace.clone(),
            concurrency: config.concurrency,
            color: config.color,
        })
    }

    fn is_cluster_scoped(&self) -> bool {
        self.namespace.as_deref().map_or(true, str::is_empty)
    }
}

pub async fn run<W: Write>(
    plan: &Plan,
    catalog: &dyn ResourceCatalog,
    reviewer: &dyn AccessReviewer,
    reporter: &dyn Reporter,
    out: &mut W,
) -> Result<()> {
    let entries = catalog
        .fetch()
        .await
        .context("fetch available group resources")?;
    let resources = discovery::group_resources(&entries);
    reporter.info(&format!(
        "checking {} verbs on {} group resources",
        plan.verbs.len(),
        resources.len()
    ));

    let result = Checker::new(reviewer, plan.namespace.clone())
        .with_concurrency(plan.concurrency)
        .check_all(&resources, &plan.verbs)
        .await;
    debug!(cells = result.cell_count(), "access checks done");

    Formatter::new(plan.output, &plan.verbs, result, plan.color)
        .write_to(out)
        .context("write results")?;

    if plan.is_cluster_scoped() {
        reporter.warn(constants::CLUSTER_SCOPE_WARNING);
    }

    Ok(())
}
