// src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::str::FromStr;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use content_tracker::api::http_router;
use content_tracker::api::types::visit_from_body;
use content_tracker::config::{Backend, CONFIG, TrackerConfig};
use content_tracker::state::AppState;

#[derive(Parser)]
#[command(name = "content-tracker", version, about = "Keeps the pages worth reading")]
struct Cli {
    /// Inference backend: chat, subprocess or text-generation
    #[arg(long, global = true, env = "CT_BACKEND")]
    backend: Option<Backend>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service (default)
    Serve {
        #[arg(long, env = "CT_HOST")]
        host: Option<String>,
        #[arg(long, env = "CT_PORT")]
        port: Option<u16>,
    },
    /// Classify a single page and print the verdict
    Analyze {
        #[arg(long)]
        url: String,
        #[arg(long)]
        domain: String,
        #[arg(long)]
        title: String,
        /// Extra visit fields as a JSON object
        #[arg(long = "json-extra")]
        extra: Option<String>,
    },
}

fn init_tracing(config: &TrackerConfig) -> Result<()> {
    let level = Level::from_str(&config.log_level).unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = CONFIG.clone();
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }

    init_tracing(&config)?;

    match cli.command.unwrap_or(Command::Serve { host: None, port: None }) {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(config).await
        }
        Command::Analyze {
            url,
            domain,
            title,
            extra,
        } => analyze_once(&config, url, domain, title, extra).await,
    }
}

async fn serve(config: TrackerConfig) -> Result<()> {
    info!("Starting content tracker");
    info!("Backend: {} ({})", config.backend, config.model);

    let app = http_router(AppState::from_config(&config));

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    info!("Listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}

async fn analyze_once(
    config: &TrackerConfig,
    url: String,
    domain: String,
    title: String,
    extra: Option<String>,
) -> Result<()> {
    let mut body = match extra {
        Some(raw) => serde_json::from_str(&raw).context("--json-extra must be a JSON object")?,
        None => serde_json::Value::Object(Default::default()),
    };
    let object = body
        .as_object_mut()
        .context("--json-extra must be a JSON object")?;
    object.insert("url".to_string(), url.into());
    object.insert("domain".to_string(), domain.into());
    object.insert("title".to_string(), title.into());

    let visit = visit_from_body(body, false)?;
    let state = AppState::from_config(config);
    let analysis = state.analyzer.analyze(&visit).await;

    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}
