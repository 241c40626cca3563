//! Market intelligence CLI
//!
//! Usage:
//! ```bash
//! market_intel run --config market_intel.toml
//! market_intel analyze --text "Sales are booming!"
//! market_intel validate --config market_intel.toml
//! market_intel example-config > market_intel.toml
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use market_intel::utils::config::EXAMPLE_CONFIG;
use market_intel::{load_config, setup_logging, AppConfig, Pipeline, SentimentIntensityAnalyzer};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "market_intel")]
#[command(version)]
#[command(about = "Collect market signals, score sentiment and forecast sales", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the whole pipeline
    Run {
        /// Config file (.toml or .json); defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print polarity scores for one text
    Analyze {
        /// Text to score
        #[arg(short, long)]
        text: String,
    },

    /// Load the config and resolve credentials without fetching anything
    Validate {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print an example TOML config
    ExampleConfig,
}

fn read_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.command {
        Commands::Run { config } | Commands::Validate { config } => read_config(config.as_deref())?,
        _ => AppConfig::default(),
    };
    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    setup_logging(level);

    match cli.command {
        Commands::Run { .. } => {
            info!("Starting market intelligence run");
            let pipeline = Pipeline::new(config)?;
            let report = pipeline.run(&mut std::io::stdout()).await?;
            println!();
            println!("{}", report.summary());
        }

        Commands::Analyze { text } => {
            let scores = SentimentIntensityAnalyzer::new().polarity_scores(&text);
            println!("Text:     {}", text);
            println!("Compound: {:+.4}", scores.compound);
            println!("Positive: {:.3}", scores.pos);
            println!("Neutral:  {:.3}", scores.neu);
            println!("Negative: {:.3}", scores.neg);
        }

        Commands::Validate { .. } => {
            config.social.resolve_credentials()?;
            println!("Configuration OK");
            println!("  news:       {}", config.sources.news_url);
            println!("  ecommerce:  {}", config.sources.ecommerce_url);
            println!("  competitor: {}", config.sources.competitor_url);
            println!(
                "  social:     {} ({:?}, {})",
                config.social.api_base, config.social.query, config.social.count
            );
            match &config.analysis.sales_csv {
                Some(path) => println!("  sales csv:  {}", path.display()),
                None => println!("  sales csv:  <none, ecommerce rows are analysed>"),
            }
        }

        Commands::ExampleConfig => {
            print!("{}", EXAMPLE_CONFIG);
        }
    }

    Ok(())
}
