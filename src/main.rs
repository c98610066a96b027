use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use plagcheck::config::Config;
use plagcheck::error::CheckError;
use plagcheck::pipeline::Checker;
use plagcheck::search::google::GoogleSearchRetriever;

/// plagcheck: estimate how much of a text appears elsewhere on the web.
///
/// Each sentence is searched on the web and compared against the top
/// result's snippet; the per-sentence similarities are combined into one
/// plagiarism percentage with a Safe / Medium / High risk level.
#[derive(Parser)]
#[command(name = "plagcheck", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (POST /check)
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: $PORT or 3000)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (default: $PLAGCHECK_BIND or 0.0.0.0)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Check a single text and print the report
    Check {
        /// Text to check. Reads --file or stdin when omitted.
        text: Option<String>,

        /// Read the text from a file
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Print the JSON response instead of the colored report
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("plagcheck=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let checker = create_checker(&config)?;
            let port = port.unwrap_or(config.port);
            let bind = bind.unwrap_or_else(|| config.bind.clone());
            info!(
                max_sentences = config.check.max_sentences,
                denominator = ?config.check.denominator,
                "Starting server"
            );
            plagcheck::web::run_server(checker, port, &bind).await?;
        }

        Commands::Check { text, file, json } => {
            let text = read_input(text, file)?;
            let checker = create_checker(&config)?;

            let result = match checker.check(&text).await {
                Ok(result) => result,
                Err(CheckError::InvalidInput(message)) => anyhow::bail!(message),
                Err(e) => return Err(e.into()),
            };

            if json {
                print_json(&result)?;
            } else {
                plagcheck::output::terminal::display_check_result(&result);
            }
        }
    }

    Ok(())
}

/// Build the checker backed by the configured search API.
fn create_checker(config: &Config) -> Result<Checker> {
    config.require_search()?;
    let retriever = GoogleSearchRetriever::new(
        &config.search_api_url,
        &config.search_api_key,
        &config.search_engine_id,
        config.check.retrieval_timeout,
    )?;
    Ok(Checker::new(Arc::new(retriever), config.check.clone()))
}

/// Take the text from the argument, a file, or stdin, in that order.
fn read_input(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read text from stdin")?;
    Ok(buf)
}

#[cfg(feature = "web")]
fn print_json(result: &plagcheck::models::CheckResult) -> Result<()> {
    let body = plagcheck::web::handlers::check::CheckResponse::from(result);
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

#[cfg(not(feature = "web"))]
fn print_json(result: &plagcheck::models::CheckResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}
