use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use hearthd_panel::api;
use hearthd_panel::config::LoggingConfig;
use hearthd_panel::Delegates;
use hearthd_panel::DeviceEntitiesPanel;
use hearthd_panel::DeviceSnapshot;
use hearthd_panel::PanelConfig;
use tracing::error;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Parser)]
#[command(name = "hearthd-panel", version, about = "Show the entities of a device")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render the panel for a device snapshot and print it
    Render {
        /// Device snapshot (JSON)
        snapshot: PathBuf,

        /// Start with the disabled entities expanded
        #[arg(long)]
        show_disabled: bool,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Serve the panel for a device snapshot over HTTP until Ctrl+C
    Serve {
        /// Device snapshot (JSON)
        snapshot: PathBuf,

        /// Overrides `api.listen` from the config
        #[arg(long)]
        listen: Option<String>,

        /// Overrides `api.port` from the config
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PanelConfig::from_file(path)?,
        None => PanelConfig::default(),
    };

    init_tracing(&config.logging);

    match cli.command {
        Command::Render {
            snapshot,
            show_disabled,
            format,
        } => render(&config, &snapshot, show_disabled, format),
        Command::Serve {
            snapshot,
            listen,
            port,
        } => serve(&config, &snapshot, listen, port).await,
    }
}

/// Log to stderr so rendered output on stdout stays clean.
fn init_tracing(logging: &LoggingConfig) {
    let filter = Targets::new()
        .with_default(LevelFilter::from(logging.level))
        .with_targets(
            logging
                .overrides
                .iter()
                .map(|(target, level)| (target.clone(), LevelFilter::from(*level))),
        );

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn build_panel(
    config: &PanelConfig,
    snapshot_path: &Path,
    show_disabled: bool,
) -> anyhow::Result<DeviceEntitiesPanel> {
    let snapshot = DeviceSnapshot::from_file(snapshot_path)?;
    info!(
        "Loaded device '{}' with {} entities and {} states",
        snapshot.name,
        snapshot.entities.len(),
        snapshot.states.len()
    );

    let context = Arc::new(snapshot.context(config.translations()));
    Ok(DeviceEntitiesPanel::new(
        snapshot.inputs(show_disabled),
        context,
        Delegates::logging(),
    ))
}

fn render(
    config: &PanelConfig,
    snapshot_path: &Path,
    show_disabled: bool,
    format: Format,
) -> anyhow::Result<()> {
    let panel = build_panel(config, snapshot_path, show_disabled)?;
    let view = panel.view();

    match format {
        Format::Text => println!("{}", view),
        Format::Json => println!("{}", serde_json::to_string_pretty(&view)?),
    }
    Ok(())
}

async fn serve(
    config: &PanelConfig,
    snapshot_path: &Path,
    listen: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    let panel = build_panel(config, snapshot_path, false)?;
    let listen = listen.unwrap_or_else(|| config.api.listen.clone());
    let port = port.unwrap_or(config.api.port);

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received shutdown signal"),
            Err(e) => error!("Failed to listen for shutdown signal: {}", e),
        }
        let _ = shutdown_tx.send(());
    });

    api::serve(listen, port, panel, shutdown_rx)
        .await
        .map_err(|e| anyhow::anyhow!("HTTP API server failed: {}", e))?;

    info!("hearthd-panel shutdown complete");
    Ok(())
}
