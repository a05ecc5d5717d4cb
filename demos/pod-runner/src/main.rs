//! Assembles a pod from a YAML document and pulls messages from its data source.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use pod_kernel::Pod;
use pod_primitives::{Endpoint, Model, Preprocessor};
use pod_telemetry::TracingConfig;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "pod-runner", about = "Assemble a pod and fetch from its data source")]
struct Args {
    /// Path to the pod document.
    config: PathBuf,

    /// Number of messages to fetch after assembly.
    #[arg(long, default_value_t = 0)]
    fetch: usize,

    /// Give up on a single fetch after this many seconds. Waits forever when unset.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the pod descriptors as JSON on stdout.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct PodSummary<'a> {
    name: &'a str,
    version: &'a str,
    datasource: Option<&'static str>,
    preprocessor: &'a Preprocessor,
    model: &'a Model,
    endpoint: &'a Endpoint,
}

impl<'a> PodSummary<'a> {
    fn new(pod: &'a Pod) -> Self {
        Self {
            name: pod.name(),
            version: pod.version(),
            datasource: pod.data_source().map(|source| source.metadata().backend()),
            preprocessor: pod.preprocessor(),
            model: pod.model(),
            endpoint: pod.endpoint(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    pod_telemetry::init(&TracingConfig::new())?;

    let args = Args::parse();
    let pod = pod_kernel::assemble(&args.config).await?;

    if args.json {
        let summary = serde_json::to_string_pretty(&PodSummary::new(&pod))?;
        println!("{summary}");
    } else {
        info!(
            name = %pod.name(),
            version = %pod.version(),
            preprocessor = %pod.preprocessor().filename,
            model = %pod.model().name,
            endpoint = %pod.endpoint().url,
            "pod ready"
        );
    }

    if args.fetch > 0 {
        fetch_messages(&pod, args.fetch, args.timeout_secs.map(Duration::from_secs)).await?;
    }

    Ok(())
}

async fn fetch_messages(pod: &Pod, count: usize, timeout: Option<Duration>) -> Result<()> {
    let Some(source) = pod.data_source() else {
        bail!("pod `{}` has no data source to fetch from", pod.name());
    };

    for index in 1..=count {
        let payload = match timeout {
            Some(limit) => tokio::time::timeout(limit, source.fetch())
                .await
                .with_context(|| format!("no message within {}s", limit.as_secs()))??,
            None => source.fetch().await?,
        };
        info!(index, len = payload.len(), "fetched message");
    }

    Ok(())
}
