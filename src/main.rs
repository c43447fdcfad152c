//! textop: serve one text operator over HTTP.
//!
//! This is the process entry point. It parses arguments, initializes tracing,
//! loads configuration, selects the operator, binds the listener and serves
//! until SIGINT/SIGTERM.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use textop::config::{AppConfig, DEFAULT_LOG_FILTER, PORT_ENV};
use textop::{create_router, http, AppError, AppState, ConfigError, OperatorKind};

/// textop: a stateless text-operation service
#[derive(Parser, Debug)]
#[command(name = "textop", version, about)]
struct Args {
    /// Operator to serve (overrides `operator` in the config file)
    #[arg(short, long, value_enum)]
    operator: Option<OperatorKind>,

    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Listen port (overrides the PORT environment variable)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level filter (e.g., "textop=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let args = Args::parse();

    // Config is loaded before tracing so the log format can come from the file
    let config = match AppConfig::load_optional(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_tracing(args.log_level.clone(), false);
            tracing::error!(error = %e, "Failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    init_tracing(args.log_level.clone(), config.logging.is_json());

    match run(args, config).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            std::process::ExitCode::FAILURE
        }
    }
}

/// Initialize tracing with priority: CLI > env > default
fn init_tracing(cli_filter: Option<String>, json: bool) {
    let log_filter = cli_filter
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run(args: Args, config: AppConfig) -> Result<(), AppError> {
    let kind = args.operator.or(config.operator).ok_or_else(|| {
        ConfigError::Validation(
            "No operator selected. Pass --operator or set `operator` in the config file"
                .to_string(),
        )
    })?;
    let operator = kind.operator();

    let env_port = std::env::var(PORT_ENV).ok();
    let port = config
        .http
        .resolve_port(args.port, env_port.as_deref(), operator.default_port)?;

    tracing::info!(
        operator = ?kind,
        key = operator.key,
        host = %config.http.host,
        port,
        max_body_bytes = ?config.http.max_body_bytes,
        "Loaded configuration"
    );

    let state = AppState::new(operator).with_body_limit(config.http.max_body_bytes);
    let app = create_router(state);

    let listener = http::bind(&config.http.host, port).await?;
    tracing::info!("Endpoints: POST /op, GET /healthz, GET /metrics");

    http::start_server(listener, app).await?;

    Ok(())
}
