use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Client;

use crate::constants;

/// Show which verbs the current identity may use on every resource type of
/// the cluster.
#[derive(Debug, Parser)]
#[command(name = "kubectl-access-matrix", version)]
pub struct Args {
    /// Namespace to check access in, cluster scope when omitted
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Comma separated verbs to check
    #[arg(long, value_delimiter = ',', default_values = constants::DEFAULT_VERBS)]
    pub verbs: Vec<String>,

    /// Output format: icon-table, ascii-table or json
    #[arg(short, long, default_value = constants::ICON_TABLE)]
    pub output: String,

    /// Path to the kubeconfig file to use
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// Name of the kubeconfig context to use
    #[arg(long)]
    pub context: Option<String>,

    /// Username to impersonate for the checks
    #[arg(long = "as")]
    pub impersonate: Option<String>,

    /// Group to impersonate for the checks, can be repeated
    #[arg(long = "as-group")]
    pub impersonate_groups: Vec<String>,

    /// Maximum number of access reviews in flight
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Log debug information to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Everything the pipeline needs besides the cluster connection.
#[derive(Clone, Debug)]
pub struct Config {
    pub namespace: Option<String>,
    pub verbs: Vec<String>,
    pub output: String,
    pub concurrency: usize,
    pub color: bool,
}

impl Args {
    pub fn to_config(&self, color: bool) -> Config {
        Config {
            namespace: self.namespace.clone(),
            verbs: self.verbs.clone(),
            output: self.output.clone(),
            concurrency: self.concurrency,
            color,
        }
    }

    fn kubeconfig_options(&self) -> KubeConfigOptions {
        KubeConfigOptions {
            context: self.context.clone(),
            ..Default::default()
        }
    }

    /// Builds a client from `--kubeconfig`/`--context` when given, the
    /// inferred environment otherwise, with impersonation applied on top.
    pub async fn kube_client(&self) -> Result<Client> {
        let mut config = match (&self.kubeconfig, &self.context) {
            (Some(path), _) => {
                let kubeconfig = Kubeconfig::read_from(path)?;
                kube::Config::from_custom_kubeconfig(kubeconfig, &self.kubeconfig_options())
                    .await?
            }
            (None, Some(_)) => kube::Config::from_kubeconfig(&self.kubeconfig_options()).await?,
            (None, None) => kube::Config::infer().await?,
        };
        if let Some(user) = &self.impersonate {
            config.auth_info.impersonate = Some(user.clone());
        }
        if !self.impersonate_groups.is_empty() {
            config.auth_info.impersonate_groups = Some(self.impersonate_groups.clone());
        }
        Ok(Client::try_from(config)?)
    }
}
