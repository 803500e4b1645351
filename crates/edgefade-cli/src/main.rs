use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt};

use edgefade_core::{AppConfig, ScrollDirection};
use edgefade_tui::SourceMode;

mod commands;

#[derive(Parser)]
#[command(name = "edgefade")]
#[command(author, version, about = "Edge fade shadows for scrollable terminal views")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive demo
    Run {
        /// Scroll horizontally (requires --explicit or --ambient)
        #[arg(long)]
        horizontal: bool,
        /// Pass the controller to the decorator explicitly
        #[arg(long, conflicts_with = "ambient")]
        explicit: bool,
        /// Publish the controller through the render context
        #[arg(long)]
        ambient: bool,
    },
    /// Scroll through content headlessly and print the fade targets per frame
    Trace {
        /// Content length along the scroll axis
        #[arg(long, default_value_t = 1000.0)]
        content: f64,
        /// Viewport length along the scroll axis
        #[arg(long, default_value_t = 200.0)]
        viewport: f64,
        /// Offset change per frame
        #[arg(long, default_value_t = 200.0)]
        step: f64,
        /// Scroll back to the start after reaching the end
        #[arg(long)]
        back: bool,
    },
    /// Print the effective configuration
    Config {
        /// Write it to the configuration file
        #[arg(long)]
        write: bool,
    },
}

fn init_logging(level: &str, interactive: bool) {
    let env_set = std::env::var_os("RUST_LOG").is_some();
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Keep the alternate screen clean unless logging was asked for explicitly
    let writer = if interactive && !env_set {
        BoxMakeWriter::new(std::io::sink)
    } else {
        BoxMakeWriter::new(std::io::stderr)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(writer))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load()?;

    let interactive = matches!(cli.command, Some(Commands::Run { .. }) | None);
    init_logging(&config.general.log_level, interactive);

    // Handle commands
    match cli.command {
        None => commands::run::run(config, SourceMode::Owned).await,
        Some(Commands::Run {
            horizontal,
            explicit,
            ambient,
        }) => {
            if horizontal {
                config.fade.scroll_direction = ScrollDirection::Horizontal;
            }
            let mode = if explicit {
                SourceMode::Explicit
            } else if ambient {
                SourceMode::Ambient
            } else {
                SourceMode::Owned
            };
            commands::run::run(config, mode).await
        }
        Some(Commands::Trace {
            content,
            viewport,
            step,
            back,
        }) => commands::trace::run(&config, content, viewport, step, back),
        Some(Commands::Config { write }) => commands::config::run(&config, write),
    }
}
