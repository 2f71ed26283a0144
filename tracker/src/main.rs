use anyhow::Context;
use clap::Parser;
use generator::OrbitConfig;
use gui_bridge::StatusBridge;
use log::info;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use workflow::{ConfigOverrides, Runner, TrackerConfig};

mod generator;
mod gui_bridge;
mod source;
mod workflow;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Tracks an orbiting object's distance to a fixed target and its ground speed"
)]
struct Args {
    /// Load tracker settings from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Position endpoint returning `iss_position` JSON
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    target_lat: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    target_lon: Option<f64>,
    /// Seconds between polls
    #[arg(long)]
    interval: Option<u64>,
    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
    /// Serve the latest status over HTTP for a display client
    #[arg(long, default_value_t = false)]
    serve: bool,
    /// Run this many iterations against a synthetic orbit instead of the live feed
    #[arg(long)]
    offline: Option<usize>,
    /// Seed for the synthetic orbit
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = if let Some(path) = &args.config {
        TrackerConfig::load(path)?
    } else {
        TrackerConfig::default()
    };
    config.apply(&ConfigOverrides {
        endpoint: args.endpoint.clone(),
        target_latitude: args.target_lat,
        target_longitude: args.target_lon,
        poll_interval_secs: args.interval,
        timeout_secs: args.timeout,
    });

    let runner = Runner::new(config.clone());
    let bridge = StatusBridge::new();
    if args.serve {
        bridge.serve(config.bind);
    }

    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating tracker runtime")?;

    let summary = runtime.block_on(async {
        let cancel = CancellationToken::new();
        let on_signal = cancel.clone();
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                on_signal.cancel();
            }
        });

        match args.offline {
            Some(iterations) => {
                let orbit = OrbitConfig {
                    seed: args.seed,
                    ..Default::default()
                };
                Ok(runner
                    .run_offline(orbit, iterations, bridge.clone(), &cancel)
                    .await)
            }
            None => {
                info!(
                    "Polling {} every {}s, target ({}, {})",
                    config.endpoint,
                    config.poll_interval_secs,
                    config.target.latitude,
                    config.target.longitude
                );
                runner.run_live(bridge.clone(), &cancel).await
            }
        }
    })?;

    println!(
        "Stopped after {} iterations -> samples {}, fetch failures {}, parse failures {}, skipped {}",
        summary.iterations,
        summary.metrics.samples,
        summary.metrics.fetch_failures,
        summary.metrics.parse_failures,
        summary.metrics.computation_errors
    );
    if let Some((header, footer)) = bridge.snapshot().display_lines() {
        println!("{}\n{}", header, footer);
    }

    Ok(())
}
