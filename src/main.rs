//! LLMBoard CLI - LLM Leaderboard Engine
//!
//! Usage:
//!   llmboard serve [OPTIONS]    Start the HTTP server
//!   llmboard build [OPTIONS]    Build the leaderboard and print it as JSON
//!   llmboard fetch [OPTIONS]    Fetch upstream data and write the merged document
//!
//! Examples:
//!   llmboard serve --port 8080
//!   llmboard serve --config config.yaml
//!   llmboard build --source data/zeroeval_merged_leaderboard.json --view coding
//!   llmboard fetch --output data/zeroeval_merged_leaderboard.json

use clap::{Parser, Subcommand};
use llmboard::cli::{Config, ConfigError};
use llmboard::source::DataSource;

#[derive(Parser)]
#[command(name = "llmboard")]
#[command(author, version, about = "LLM Leaderboard Engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the LLMBoard HTTP server
    Serve {
        /// Configuration file path (YAML)
        #[arg(short, long)]
        config: Option<String>,

        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Benchmark document source (file path or URL)
        #[arg(long)]
        source: Option<String>,
    },

    /// Build the leaderboard from a document and print it as JSON
    Build {
        /// Configuration file path (YAML)
        #[arg(short, long)]
        config: Option<String>,

        /// Benchmark document source (file path or URL)
        #[arg(long)]
        source: Option<String>,

        /// Print a single view (overall, reasoning, popularity, coding, newmodels)
        #[arg(long)]
        view: Option<String>,

        /// Keep only the first N entries per view
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Fetch upstream benchmark data and write the merged document
    Fetch {
        /// Configuration file path (YAML)
        #[arg(short, long)]
        config: Option<String>,

        /// Full leaderboard endpoint URL
        #[arg(long)]
        full_url: Option<String>,

        /// Org/model list endpoint URL
        #[arg(long)]
        list_url: Option<String>,

        /// Output path for the merged document
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn load_config(config_file: Option<String>) -> Result<Config, ConfigError> {
    match config_file {
        Some(path) => Config::from_file(&path),
        None => Ok(Config::default()),
    }
}

/// Apply a `--source` override onto the configured source.
fn apply_source(config: &mut Config, source: Option<String>) {
    if let Some(raw) = source {
        match DataSource::parse(&raw) {
            DataSource::Url(url) => {
                config.source.url = Some(url);
                config.source.path = None;
            }
            DataSource::File(path) => {
                config.source.path = Some(path.display().to_string());
                config.source.url = None;
            }
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("llmboard=info".parse().unwrap())
                .add_directive("tower_http=debug".parse().unwrap()),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            port,
            host,
            source,
        } => {
            init_tracing();
            let mut config = load_config(config)?;
            config.server.port = port;
            config.server.host = host;
            apply_source(&mut config, source);

            llmboard::cli::run_server(config).await?;
        }

        Commands::Build {
            config,
            source,
            view,
            limit,
        } => {
            // No tracing init here: stdout carries the JSON output.
            let mut config = load_config(config)?;
            apply_source(&mut config, source);

            let mut data = config.source.data_source().load().await?;

            let output = match view {
                Some(view) => {
                    let items = data
                        .views
                        .get(&view)
                        .ok_or_else(|| ConfigError::Validation(format!("unknown view: {view}")))?;
                    let items = match limit {
                        Some(n) => &items[..items.len().min(n)],
                        None => items,
                    };
                    serde_json::to_string_pretty(&serde_json::json!({
                        "view": view,
                        "last_updated": data.last_updated,
                        "items": items,
                    }))?
                }
                None => {
                    if let Some(n) = limit {
                        let views = &mut data.views;
                        views.overall.truncate(n);
                        views.reasoning.truncate(n);
                        views.popularity.truncate(n);
                        views.coding.truncate(n);
                        views.newmodels.truncate(n);
                    }
                    serde_json::to_string_pretty(&data)?
                }
            };
            println!("{output}");
        }

        Commands::Fetch {
            config,
            full_url,
            list_url,
            output,
        } => {
            init_tracing();
            let mut config = load_config(config)?;
            if let Some(url) = full_url {
                config.ingest.full_url = url;
            }
            if let Some(url) = list_url {
                config.ingest.list_url = url;
            }
            if let Some(path) = output {
                config.ingest.output = path;
            }

            let report =
                llmboard::ingest::fetch_document(&config.ingest.full_url, &config.ingest.list_url)
                    .await?;

            if !report.invalid.is_empty() {
                tracing::warn!(count = report.invalid.len(), "rows failed conversion");
                for row in &report.invalid {
                    tracing::debug!(model_id = ?row.model_id, error = %row.error, "invalid row");
                }
            }

            let json = serde_json::to_string_pretty(&report.document)?;
            if let Some(parent) = std::path::Path::new(&config.ingest.output).parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
            tokio::fs::write(&config.ingest.output, json).await?;
            tracing::info!(
                path = %config.ingest.output,
                models = report.document.data_structure.models.len(),
                "merged document saved"
            );
        }
    }

    Ok(())
}
