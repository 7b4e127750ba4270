//! Flavor Town API server entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use flavor_town_api::api::docs::{render, DocFormat};
use flavor_town_api::config::Config;
use flavor_town_api::{metrics, server};

/// Flavor Town API server.
#[derive(Parser, Debug)]
#[command(name = "flavor-town-api")]
#[command(about = "Flavor Town API: test and health endpoints with API docs")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// HTTP server port (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,

    /// Print or write the generated OpenAPI document.
    Openapi {
        /// Output format: json or yaml.
        #[arg(short, long, default_value = "json")]
        format: DocFormat,

        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    match args.command.unwrap_or(Command::Serve) {
        // The OpenAPI document needs no configuration
        Command::Openapi { format, output } => {
            init_tracing(None, args.verbose, args.log_json);
            cmd_openapi(format, output)
        }
        Command::CheckConfig => {
            let config = load_config(args.port)?;
            init_tracing(Some(&config.rust_log), args.verbose, args.log_json);
            cmd_check_config(&config)
        }
        Command::Serve => {
            let config = load_config(args.port)?;
            init_tracing(Some(&config.rust_log), args.verbose, args.log_json);
            cmd_serve(config).await
        }
    }
}

/// Load configuration from the environment, applying the `--port` override.
fn load_config(port_override: Option<String>) -> anyhow::Result<Config> {
    let mut config = Config::load()?;
    if let Some(port) = port_override.filter(|p| !p.is_empty()) {
        config.port = port;
    }
    Ok(config)
}

fn init_tracing(directives: Option<&str>, verbose: bool, json: bool) {
    let filter = if verbose {
        EnvFilter::new("flavor_town_api=debug,tower_http=debug,info")
    } else {
        directives
            .and_then(|d| EnvFilter::try_new(d).ok())
            .or_else(|| EnvFilter::try_from_default_env().ok())
            .unwrap_or_else(|| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .with(filter)
        .init();
}

/// Run the HTTP server.
async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    metrics::init_metrics();
    if let Some(metrics_port) = config.metrics_port {
        metrics::install_exporter(metrics_port)?;
    }

    if let Err(e) = server::serve(&config).await {
        error!("Failed to start server: {}", e);
        return Err(e.into());
    }

    Ok(())
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("FLAVOR TOWN API - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Port: {}", config.port);
    println!(
        "  Docs Dir: {} ({})",
        config.docs_dir.display(),
        if config.docs_dir.is_dir() { "found" } else { "missing" }
    );
    println!("  Log Filter: {}", config.rust_log);
    match config.metrics_port {
        Some(port) => println!("  Metrics: port {}", port),
        None => println!("  Metrics: Disabled"),
    }
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Print or write the generated OpenAPI document.
fn cmd_openapi(format: DocFormat, output: Option<PathBuf>) -> anyhow::Result<()> {
    let doc = render(format)?;

    match output {
        Some(path) => {
            std::fs::write(&path, doc)?;
            info!("OpenAPI document written to {}", path.display());
        }
        None => println!("{}", doc),
    }

    Ok(())
}
