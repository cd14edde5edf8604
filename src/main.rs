//! Prompt Refiner CLI - refine prompts from the terminal or serve the extension boundary.

use clap::{Parser, Subcommand};
use prompt_refiner::api::{create_router_with_state, AppState};
use prompt_refiner::config::{Config, FileSettingsStore, SettingsStore};
use prompt_refiner::http::{create_client, create_client_with_timeout, ReqwestTransport};
use prompt_refiner::i18n::describe_failure;
use prompt_refiner::{RefinementOutcome, RefinementRequest, RefinementStyle, Refiner};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "prompt-refiner")]
#[command(about = "Refine draft prompts with your LLM provider of choice")]
#[command(version)]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, global = true, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the enhance endpoint on localhost
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Refine a prompt once and print the result
    Refine {
        /// Draft prompt text
        text: String,

        /// Refinement style (defaults to the configured default style)
        #[arg(short, long, value_enum)]
        style: Option<StyleArg>,

        /// Number of additional independent refinements of the same text
        #[arg(long, default_value_t = 0)]
        regenerate: u32,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show or edit the configuration
    Config {
        /// Show config file path
        #[arg(long)]
        path: bool,

        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Set a persisted setting (apiProvider, apiKey, apiModel, uiLanguage, defaultRefinementStyle)
    Set { key: String, value: String },
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum StyleArg {
    Balanced,
    Subtle,
    Creative,
    Concise,
    Programming,
}

impl From<StyleArg> for RefinementStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Balanced => RefinementStyle::Balanced,
            StyleArg::Subtle => RefinementStyle::Subtle,
            StyleArg::Creative => RefinementStyle::Creative,
            StyleArg::Concise => RefinementStyle::Concise,
            StyleArg::Programming => RefinementStyle::Programming,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match cli.command {
        Some(Commands::Serve { port, config }) => {
            run_server(port, config).await?;
        }
        Some(Commands::Refine {
            text,
            style,
            regenerate,
            config,
        }) => {
            run_refine(text, style.map(Into::into), regenerate, config).await?;
        }
        Some(Commands::Config { path, action }) => {
            run_config(path, action)?;
        }
        None => {
            run_server(None, None).await?;
        }
    }

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

fn config_path(path: Option<PathBuf>) -> PathBuf {
    path.unwrap_or_else(Config::default_path)
}

fn build_refiner(config: &Config) -> anyhow::Result<Refiner> {
    let client = match config.server.request_timeout_secs {
        Some(secs) => create_client_with_timeout(Duration::from_secs(secs))?,
        None => create_client(),
    };
    Ok(Refiner::new(Arc::new(ReqwestTransport::new(client))))
}

async fn run_server(port_override: Option<u16>, config_path_arg: Option<PathBuf>) -> anyhow::Result<()> {
    let path = config_path(config_path_arg);
    let config = Config::load_from(path.clone())?.with_env_overrides();

    let port = port_override.unwrap_or(config.server.port);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let store = FileSettingsStore::new(path);
    tracing::info!(config = %store.path().display(), "reading settings per request");
    let state = AppState::new(Arc::new(store), build_refiner(&config)?);
    let app = create_router_with_state(state);

    println!("→ Prompt Refiner listening on http://{}", addr);
    println!("→ POST http://{}/v1/enhance", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Refiner listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\nRefiner stopped.");
    Ok(())
}

async fn run_refine(
    text: String,
    style: Option<RefinementStyle>,
    regenerate: u32,
    config_path_arg: Option<PathBuf>,
) -> anyhow::Result<()> {
    let path = config_path(config_path_arg);
    let config = Config::load_from(path.clone())?.with_env_overrides();
    let refiner = build_refiner(&config)?;
    let store = FileSettingsStore::new(path);

    // The text is captured once; regenerations reuse it verbatim.
    for attempt in 0..=regenerate {
        let settings = store.load()?;
        let style = style.unwrap_or_else(|| settings.default_style());
        let request = RefinementRequest::new(text.clone(), style, settings.language())?;

        match refiner.refine(&request, &settings.provider_settings()).await {
            RefinementOutcome::Success { enhanced_text } => {
                if regenerate > 0 {
                    println!("--- #{} ---", attempt + 1);
                }
                println!("{}", enhanced_text);
            }
            RefinementOutcome::Failure(failure) => {
                anyhow::bail!(describe_failure(&failure, request.language()));
            }
        }
    }

    Ok(())
}

fn run_config(show_path: bool, action: Option<ConfigAction>) -> anyhow::Result<()> {
    if show_path {
        println!("{}", Config::default_path().display());
        return Ok(());
    }

    match action {
        Some(ConfigAction::Set { key, value }) => {
            let mut config = Config::load()?;
            config.settings.set(&key, &value)?;
            config.save()?;
            println!("Saved {} to {}", key, Config::default_path().display());
        }
        None => {
            let mut config = Config::load()?.with_env_overrides();
            config.settings = config.settings.redacted();
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
