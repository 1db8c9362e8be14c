use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use groomer::classifier::{KeywordClassifier, ModelClassifier, TicketClassifier};
use groomer::config::AppConfig;
use groomer::csv_io::{read_tickets, write_flagged};
use groomer::prompt::load_criteria;
use groomer::runner::Runner;
use llm_client::{Copilot, LmStudio};

#[derive(Parser)]
#[command(name = "groomer", about = "Data governance ticket analyzer")]
struct Cli {
    /// Input CSV export of tracker tickets
    #[arg(default_value = "DGC Report (MCIC Jira).csv")]
    input: PathBuf,

    /// Output CSV for governance-flagged tickets
    #[arg(short, long, default_value = "governance_flagged_issues.csv")]
    output: PathBuf,

    /// Use the GitHub Copilot API instead of a local LM Studio server
    #[arg(short, long)]
    copilot: bool,

    /// Classify offline with the built-in keyword heuristic
    #[arg(long)]
    mock: bool,

    /// File holding the governance criteria inserted into the prompt
    #[arg(long, default_value = "governance_criteria.txt")]
    criteria: PathBuf,

    /// Ask the local server for schema-constrained JSON output
    #[arg(long)]
    structured: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("groomer=info".parse()?))
        .init();

    let cli = Cli::parse();

    info!("Data governance ticket analyzer starting...");
    let mode = if cli.mock {
        "keyword heuristic (offline)"
    } else if cli.copilot {
        "GitHub Copilot API"
    } else {
        "local LM Studio"
    };
    info!(mode, "Backend selected");

    if !cli.input.exists() {
        bail!(
            "Input file '{}' not found. Place the CSV export next to the binary or pass a path.",
            cli.input.display()
        );
    }

    // Load config
    let config = AppConfig::from_env()?;
    let criteria = load_criteria(&cli.criteria);

    let classifier: Box<dyn TicketClassifier> = if cli.mock {
        Box::new(KeywordClassifier)
    } else if cli.copilot {
        let Some(api_key) = config.copilot_api_key.clone() else {
            bail!("COPILOT_API_KEY environment variable not set. Set it or run with --mock.");
        };
        let backend = Copilot::with_endpoint(api_key, &config.copilot_api_url);
        Box::new(ModelClassifier::new(
            Box::new(backend),
            &config.copilot_model,
            criteria,
        ))
    } else {
        let backend = LmStudio::new(&config.lm_studio_url);
        let mut classifier =
            ModelClassifier::new(Box::new(backend), &config.lm_studio_model, criteria);
        if cli.structured {
            classifier = classifier.with_structured_output();
        }
        Box::new(classifier)
    };

    let runner = Runner::new(classifier);
    if let Err(e) = runner.preflight().await {
        bail!(
            "{e}. Ensure LM Studio is running with a model loaded, \
             or use -c/--copilot to use the Copilot API."
        );
    }

    let tickets = read_tickets(&cli.input)?;
    info!(count = tickets.len(), "Found tickets to analyze");

    let result = runner.run(&tickets).await;

    if write_flagged(&cli.output, &result.flagged)? {
        info!(
            count = result.flagged.len(),
            output = %cli.output.display(),
            "Saved governance-flagged issues"
        );
    } else {
        info!("No issues flagged for governance review");
    }

    info!("{}", result.stats);
    Ok(())
}
