//! raigate
//!
//! HR policy assistant wrapped in responsible-AI guardrails: prompt shield,
//! content safety on input and output, RAG grounding and an RAI system prompt.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use raigate_cli::demo;
use raigate_cli::{build_pipeline, AppState, Cli, Commands, Settings};
use raigate_pipeline::PipelineConfig;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let missing = Settings::missing_required(&cli.azure);
    if !missing.is_empty() {
        eprintln!("❌ ERROR: Missing required environment variables:");
        for var in &missing {
            eprintln!("  - {}", var);
        }
        std::process::exit(1);
    }
    let settings = Settings::from_args(&cli.azure)?;

    let config = PipelineConfig::load(&cli.config)?;
    info!("Pipeline configuration loaded");

    let metrics_handle = init_metrics()?;

    let pipeline = build_pipeline(&settings, &config)?;
    info!(
        endpoint = %settings.openai.endpoint,
        deployment = pipeline.deployment(),
        "Guardrail pipeline ready"
    );

    match cli.command {
        Commands::Demo => {
            demo::run_demo(&settings, &pipeline).await;
        }

        Commands::Ask { query, json } => {
            let result = pipeline.ask(&query).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", demo::report(&query, &result));
            }
        }

        Commands::Serve { listen, port } => {
            let addr: SocketAddr = format!("{}:{}", listen, port).parse()?;
            let state = AppState::new(pipeline, metrics_handle);

            let shutdown = async {
                shutdown_signal().await;
                warn!("Shutdown signal received, stopping server...");
            };

            raigate_cli::server::run_server(state, addr, shutdown).await?;
        }
    }

    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("raigate=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("raigate=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "raigate_requests_total",
        "Total number of questions processed, by outcome"
    );
    metrics::describe_histogram!(
        "raigate_pipeline_latency_us",
        metrics::Unit::Microseconds,
        "End-to-end pipeline latency in microseconds"
    );

    Ok(handle)
}
