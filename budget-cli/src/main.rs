use anyhow::{Context, Result};
use budget_api::{AppState, start_server};
use budget_core::sort_by_datetime_desc;
use budget_ingest::StatementFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

mod config;
mod logging;

use config::{Config, config_path, init_config, load_config};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUDGET_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "budget-email", version = VERSION, about = "Bank statement email webhook")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service (GET /health, POST /budget-email)
    Serve {
        /// Config file (default: ./budget-email.toml; missing file = defaults)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override [server].bind, e.g. 127.0.0.1:8080
        #[arg(long)]
        bind: Option<String>,
    },

    /// Parse a statement file offline and print its transactions, newest first
    Parse {
        /// Path to the statement CSV
        #[arg(long)]
        csv: PathBuf,

        /// capitec | discovery (default: detect from the file name)
        #[arg(long)]
        format: Option<String>,

        #[arg(long)]
        config: Option<PathBuf>,

        /// Print one JSON object per line instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write a default config file if none exists
    InitConfig {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging();

    match cli.command {
        Command::Serve { config, bind } => {
            let mut cfg = load_config(&config_path(config))?;
            if let Some(bind) = bind {
                cfg.server.bind = bind;
            }
            serve(cfg).await?;
        }

        Command::Parse { csv, format, config, json } => {
            let cfg = load_config(&config_path(config))?;
            parse_file(&csv, format.as_deref(), &cfg, json)?;
        }

        Command::InitConfig { config } => {
            init_config(&config_path(config))?;
        }
    }

    Ok(())
}

async fn serve(cfg: Config) -> Result<()> {
    let addr = cfg.bind_addr()?;
    let options = cfg.parse_options()?;
    let http = reqwest::Client::builder()
        .user_agent(concat!("budget-email/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("build HTTP client")?;

    info!(
        %addr,
        cutoff = %options.cutoff,
        timezone = %options.timezone,
        version = VERSION,
        "starting budget-email"
    );

    let state = AppState::new(options).with_http(http);
    start_server(state, addr).await.context("HTTP server failed")?;
    Ok(())
}

fn detect_format(csv: &Path, format: Option<&str>) -> Result<StatementFormat> {
    if let Some(f) = format {
        return f.parse();
    }
    let name = csv.file_name().and_then(|n| n.to_str()).unwrap_or("");
    StatementFormat::from_filename(name)
        .with_context(|| format!("can't tell the statement format from '{name}' (pass --format)"))
}

fn parse_file(csv: &Path, format: Option<&str>, cfg: &Config, json: bool) -> Result<()> {
    let format = detect_format(csv, format)?;
    let options = cfg.parse_options()?;

    let text = std::fs::read_to_string(csv).with_context(|| format!("read {}", csv.display()))?;
    let mut txns = format
        .parse(&text, &options)
        .with_context(|| format!("parsing {}", csv.display()))?;
    sort_by_datetime_desc(&mut txns);

    if json {
        for t in &txns {
            println!("{}", serde_json::to_string(t)?);
        }
        return Ok(());
    }

    for t in &txns {
        println!(
            "{} | {:<7} | {:>12} | {}",
            t.datetime.to_rfc3339(),
            t.kind.as_str(),
            t.amount,
            t.description
        );
    }
    println!(
        "\nParsed {} {} transactions after {} from {}",
        txns.len(),
        format,
        options.cutoff,
        csv.display()
    );

    Ok(())
}
