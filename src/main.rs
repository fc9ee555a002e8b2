use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::Parser;

mod check;
mod config;
mod constants;
mod discovery;
mod error;
#[cfg(test)]
mod fakes;
mod formatter;
mod matrix;
mod report;
mod types;

#[tokio::main]
async fn main() -> Result<()> {
    let args = config::Args::parse();
    report::init_tracing(args.verbose);

    let stdout = io::stdout();
    let plan = matrix::Plan::from_config(&args.to_config(stdout.is_terminal()))?;
    let client = args.kube_client().await.context("get auth client")?;

    let catalog = discovery::KubeCatalog::new(client.clone());
    let reviewer = check::KubeAccessReviewer::new(client);
    matrix::run(
        &plan,
        &catalog,
        &reviewer,
        &report::TracingReporter,
        &mut stdout.lock(),
    )
    .await
}
