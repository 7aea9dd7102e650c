mod aggregator;
mod cloud_watch_metrics_client;
mod derived;
mod error;
mod graph;
mod metric;
mod output;
mod session;
mod time_range;

use std::env;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cloud_watch_metrics_client::CloudWatchMetricsClient;
use metric::CATALOG;
use session::SessionOptions;
use time_range::TimeRange;

#[derive(Parser, Debug)]
#[command(name = "mackerel-plugin-aws-dynamodb")]
#[command(about = "DynamoDB table metrics from CloudWatch for mackerel-agent")]
struct Args {
    /// AWS Access Key ID
    #[arg(long)]
    access_key_id: Option<String>,

    /// AWS Secret Access Key
    #[arg(long)]
    secret_access_key: Option<String>,

    /// AWS Region
    #[arg(long)]
    region: Option<String>,

    /// DynamoDB Table Name
    #[arg(long, default_value = "")]
    table_name: String,

    /// Temp file name
    #[arg(long)]
    tempfile: Option<PathBuf>,

    /// Metric key prefix
    #[arg(long, default_value = graph::DEFAULT_PREFIX)]
    metric_key_prefix: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout belongs to the agent
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let client = SessionOptions {
        access_key_id: args.access_key_id,
        secret_access_key: args.secret_access_key,
        region: args.region,
    }
    .build_client()
    .context("failed to set up CloudWatch client")?;

    if let Some(ref path) = args.tempfile {
        tracing::debug!(path = %path.display(), "no differential metrics, tempfile left untouched");
    }

    let prefix = graph::metric_key_prefix(&args.metric_key_prefix);
    let graphs = graph::graph_definition(prefix);
    let stdout = io::stdout();

    if output::meta_requested(env::var(output::META_ENV).ok().as_deref()) {
        output::write_meta(&mut stdout.lock(), prefix, &graphs)?;
        return Ok(());
    }

    let now = Utc::now();
    let fetcher = CloudWatchMetricsClient::new_with_client(client, args.table_name);
    let mut collection = aggregator::collect(&fetcher, &CATALOG, &TimeRange::from(now)).await;
    derived::derive_values(&mut collection.stats);
    tracing::debug!(
        collected = collection.stats.len(),
        failed = collection.failures.len(),
        "collection pass finished"
    );

    output::write_values(&mut stdout.lock(), prefix, &graphs, &collection.stats, now)?;
    Ok(())
}
