//! # airra CLI Application
//!
//! Command-line interface for generating and validating airra.txt AI-usage
//! policy files.
//!
//! ## Key Components
//!
//! - CLI argument parsing with clap
//! - `generate`: analyze a website and emit its suggested airra.txt
//! - `validate`: fetch and report on a site's published airra.txt
//!
//! ## Features
//!
//! - Cached analysis results with a 24-hour lifetime
//! - Output to stdout or a downloadable airra.txt file
//! - Text and JSON report formats for validation

mod telemetry;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{instrument, warn};
use url::Url;

use airra::analyzer::Analyzer;
use airra::api::{AnalyzeRequest, handle_analyze};
use airra::cache::{AnalysisCache, CacheConfig};
use airra::crawler::ContentCrawler;
use airra::policy::{AirraConfig, render_airra_txt};
use airra::validator::Validator;

#[derive(Parser)]
#[command(author, version, about = "Generate and validate airra.txt AI-usage policy files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a website and generate its airra.txt
    Generate(GenerateArgs),

    /// Fetch and validate a site's published airra.txt
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Website URL to analyze
    #[arg(required = true)]
    url: String,

    /// Free-text preferences forwarded to the analyzer
    #[arg(short, long, default_value = "")]
    preferences: String,

    /// Write the generated airra.txt to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Bypass the local analysis cache
    #[arg(long)]
    no_cache: bool,

    /// Cache directory
    #[arg(long, default_value = ".airra/cache")]
    cache_dir: PathBuf,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Website URL to validate
    #[arg(required = true)]
    url: String,

    /// Output format (text|json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Disable the bundled demo fixtures
    #[arg(long)]
    no_fixtures: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing_subscriber();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate(args)) => {
            generate_command(args).await?;
        }
        Some(Commands::Validate(args)) => {
            validate_command(args).await?;
        }
        None => {
            // If no command is provided, show help
            let _ = Cli::parse_from(["--help"]);
        }
    }

    Ok(())
}

#[instrument]
async fn generate_command(args: GenerateArgs) -> anyhow::Result<()> {
    Url::parse(&args.url).with_context(|| format!("invalid URL: {}", args.url))?;

    let cache = AnalysisCache::with_config(CacheConfig {
        base_path: args.cache_dir.clone(),
    });

    let mut analysis = None;
    if !args.no_cache {
        analysis = cache.get(&args.url).await;
        if analysis.is_some() {
            eprintln!("Using cached analysis for {}", args.url);
        }
    }

    let analysis = match analysis {
        Some(analysis) => analysis,
        None => {
            let crawler = ContentCrawler::new();
            let analyzer = Analyzer::from_env().context("analyzer configuration")?;
            let request = AnalyzeRequest {
                url: args.url.clone(),
                preferences: args.preferences.clone(),
            };

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner} {msg}")
                    .unwrap(),
            );
            spinner.set_message(format!("Analyzing {}...", args.url));
            spinner.enable_steady_tick(Duration::from_millis(100));

            let response = handle_analyze(&crawler, &analyzer, &request).await;
            spinner.finish_and_clear();

            let analysis = match response.analysis {
                Some(analysis) => analysis,
                None => anyhow::bail!(
                    "analysis failed: {}",
                    response.error.unwrap_or_else(|| "unknown error".to_string())
                ),
            };

            if !args.no_cache {
                if let Err(e) = cache.set(&args.url, &analysis).await {
                    warn!("Failed to cache analysis for {}: {}", args.url, e);
                }
            }

            analysis
        }
    };

    let document = render_airra_txt(&analysis);

    match args.output {
        Some(path) => {
            tokio::fs::write(&path, &document)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Saved airra.txt to {}", path.display());
        }
        None => println!("{}", document),
    }

    Ok(())
}

#[instrument]
async fn validate_command(args: ValidateArgs) -> anyhow::Result<()> {
    Url::parse(&args.url).with_context(|| format!("invalid URL: {}", args.url))?;

    let validator = if args.no_fixtures {
        Validator::new()
    } else {
        Validator::with_exemplar()
    };

    let report = validator.validate(&args.url).await;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_report(&report),
    }

    Ok(())
}

fn print_report(report: &AirraConfig) {
    if let Some(error) = &report.error {
        println!("Validation failed: {}", error);
        return;
    }

    let creator = if report.creator.is_empty() {
        "Not specified"
    } else {
        report.creator.as_str()
    };
    println!("Creator: {}", creator);

    println!("\nContent Types:");
    if report.content_types.is_empty() {
        println!("  No content types specified");
    }
    for content_type in &report.content_types {
        let usages = report
            .allowed_usage_types
            .get(content_type)
            .filter(|usages| !usages.is_empty());
        match usages {
            Some(usages) => println!("  - {} (allowed: {})", content_type, usages.join(", ")),
            None => println!("  - {} (not allowed)", content_type),
        }
    }

    println!("\nAttribution Requirements:");
    if report.attribution_requirements.is_empty() {
        println!("  No attribution requirements specified");
    }
    for requirement in &report.attribution_requirements {
        println!("  - {}", requirement);
    }

    println!("\nRestrictions:");
    if report.restrictions.is_empty() {
        println!("  No restrictions specified");
    }
    for restriction in &report.restrictions {
        println!("  - {}", restriction);
    }
}
