use clap::Parser;
use heap_sentry::logging;
use heap_sentry::monitor::{
    DiagnosticSnapshotWriter, GatePolicy, MemoryPoller, MemorySampler, SnapshotGate,
    SysinfoMemoryStats,
};
use heap_sentry::shared::config::{Settings, load_settings};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "heap_sentry", about = "Capture diagnostic snapshots under memory pressure")]
struct Cli {
    /// Configuration file (defaults to $HEAP_SENTRY_CONFIG, then ./config)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = match cli.config.as_deref() {
        Some(path) => Settings::load_from(path)?,
        None => load_settings()?,
    };
    logging::init(&settings.logging)?;

    let stats = Arc::new(SysinfoMemoryStats::new());
    let capture = Arc::new(DiagnosticSnapshotWriter::from_config(&settings.capture));
    let gate = SnapshotGate::new(capture, GatePolicy::from_config(&settings.capture));
    let sampler = Arc::new(MemorySampler::new(
        stats,
        gate,
        settings.monitor.danger_threshold,
    ));

    let total = sampler.total_memory().await?;
    info!(
        total_bytes = total,
        danger_threshold = sampler.danger_threshold(),
        poll_interval_ms = settings.monitor.poll_interval_ms,
        output_dir = %settings.capture.output_dir,
        "heap_sentry is starting"
    );

    let poller = MemoryPoller::new(Arc::clone(&sampler), settings.monitor.poll_interval());
    poller
        .run(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;

    let stats = sampler.gate().stats();
    info!(
        started = stats.started,
        completed = stats.completed,
        failed = stats.failed,
        timed_out = stats.timed_out,
        "Capture statistics: {}",
        serde_json::to_string(&stats)?
    );
    Ok(())
}
