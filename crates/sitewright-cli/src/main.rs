//! Sitewright CLI - quality-gated website component generation
//!
//! Usage:
//!   sitewright init                      Write a default sitewright.toml
//!   sitewright generate <vision>         Run a full generation pass
//!   sitewright plan <vision>             Print the planned design strategy
//!   sitewright score <file>              Score an existing artifact
//!   sitewright repair <file>             Filter and repair an artifact
//!   sitewright icons                     Show the icon catalog

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sitewright_core::{
    ComponentKind, OrchestrationMode, SiteContext, SitewrightConfig,
};
use sitewright_gen::{AnthropicClient, ArtifactGenerator, Model};
use sitewright_orchestrator::{
    FsArtifactStore, OrchestrationDriver, RetryController, RetryPolicy,
};
use sitewright_planning::StrategyPlanner;
use sitewright_repair::{CommentaryFilter, RepairEngine};
use sitewright_validation::{QualityParams, QualityScorer, StructuralValidator};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "sitewright")]
#[command(author, version, about = "Quality-gated website component generation")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default sitewright.toml to the project directory
    Init {
        /// Project path (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Run a full generation pass over every component kind
    Generate {
        /// Free-text design vision
        vision: String,

        /// Site name
        #[arg(long)]
        site: String,

        /// Site industry
        #[arg(long)]
        industry: String,

        /// Optional site description
        #[arg(long)]
        description: Option<String>,

        /// Optional target audience
        #[arg(long)]
        audience: Option<String>,

        /// Orchestration mode
        #[arg(long, default_value = "full_site")]
        mode: OrchestrationMode,

        /// Artifact output directory
        #[arg(long, default_value = "components")]
        output: PathBuf,
    },

    /// Plan a design strategy and print it as JSON
    Plan {
        /// Free-text design vision
        vision: String,

        /// Site name
        #[arg(long)]
        site: String,

        /// Site industry
        #[arg(long)]
        industry: String,
    },

    /// Score an existing artifact file against the rubric
    Score {
        /// Artifact source file
        file: PathBuf,

        /// Component kind the artifact implements
        #[arg(long)]
        kind: ComponentKind,
    },

    /// Filter and repair an artifact file
    Repair {
        /// Artifact source file
        file: PathBuf,

        /// Component kind the artifact implements
        #[arg(long)]
        kind: ComponentKind,

        /// Write the repaired text back instead of printing it
        #[arg(long)]
        write: bool,
    },

    /// Show the icon catalog: allow-list and brand substitutions
    Icons,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to initialize logging")?;

    match cli.command {
        Commands::Init { path } => cmd_init(path),
        Commands::Generate {
            vision,
            site,
            industry,
            description,
            audience,
            mode,
            output,
        } => cmd_generate(vision, site, industry, description, audience, mode, output).await,
        Commands::Plan {
            vision,
            site,
            industry,
        } => cmd_plan(vision, site, industry).await,
        Commands::Score { file, kind } => cmd_score(file, kind),
        Commands::Repair { file, kind, write } => cmd_repair(file, kind, write),
        Commands::Icons => cmd_icons(),
    }
}

fn cmd_init(path: PathBuf) -> Result<()> {
    SitewrightConfig::write_default(&path).context("Failed to write default config")?;
    println!("Wrote {}", path.join("sitewright.toml").display());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn cmd_generate(
    vision: String,
    site_name: String,
    industry: String,
    description: Option<String>,
    audience: Option<String>,
    mode: OrchestrationMode,
    output: PathBuf,
) -> Result<()> {
    let config = SitewrightConfig::load_or_default(&PathBuf::from("."))
        .context("Failed to load configuration")?;
    let model: Model = config
        .generation
        .model
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let mut site = SiteContext::new(site_name, industry);
    if let Some(description) = description {
        site = site.with_description(description);
    }
    if let Some(audience) = audience {
        site = site.with_audience(audience);
    }

    let service = Arc::new(AnthropicClient::new());

    info!("Planning design strategy ({} mode)", mode);
    let planner = StrategyPlanner::new(service.clone()).with_model(model);
    let strategy = planner.plan(&vision, &site, mode).await;

    let generator = ArtifactGenerator::new(service, config.icons.clone())
        .with_model(model)
        .with_max_tokens(config.generation.max_output_tokens)
        .with_temperature(config.generation.temperature);

    let controller = RetryController::new(generator)
        .with_engine(RepairEngine::new(config.icons.clone(), config.repair.clone()))
        .with_scorer(QualityScorer::new(QualityParams {
            min_content_len: config.repair.min_content_len,
        }))
        .with_policy(RetryPolicy {
            max_attempts: config.generation.max_attempts,
            target_score: config.generation.target_score,
        });

    let driver = OrchestrationDriver::new(controller);
    let store = FsArtifactStore::new(output);

    let report = driver.run(&strategy, &site, &store).await?;

    println!("Run {} complete", report.run_id);
    println!("  Backup: {}", report.backup.location);
    for outcome in &report.outcomes {
        let status = if outcome.accepted { "accepted" } else { "failed" };
        println!(
            "  {:<13} {} (score {:.0}, {} attempts)",
            outcome.kind.to_string(),
            status,
            outcome.final_score,
            outcome.attempts_used
        );
    }
    println!(
        "  Success rate {:.0}%, average quality {:.0}",
        report.summary.success_rate * 100.0,
        report.summary.average_quality
    );
    Ok(())
}

async fn cmd_plan(vision: String, site_name: String, industry: String) -> Result<()> {
    let config = SitewrightConfig::load_or_default(&PathBuf::from("."))
        .context("Failed to load configuration")?;
    let model: Model = config
        .generation
        .model
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let site = SiteContext::new(site_name, industry);
    let planner = StrategyPlanner::new(Arc::new(AnthropicClient::new())).with_model(model);
    let strategy = planner
        .plan(&vision, &site, OrchestrationMode::FullSite)
        .await;

    println!("{}", serde_json::to_string_pretty(&strategy)?);
    Ok(())
}

fn cmd_score(file: PathBuf, kind: ComponentKind) -> Result<()> {
    let text = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let config = SitewrightConfig::load_or_default(&PathBuf::from("."))
        .context("Failed to load configuration")?;

    let report = StructuralValidator::new().validate(kind, &text);
    let quality = QualityScorer::new(QualityParams {
        min_content_len: config.repair.min_content_len,
    })
    .score(&text, report.is_complete);

    println!("Completeness: {:.0} (complete: {})", report.completeness, report.is_complete);
    for check in &report.checks {
        println!(
            "  {:<22} {}",
            check.name,
            if check.passed { "PASSED" } else { "FAILED" }
        );
    }
    println!("Quality score: {:.0}", quality.score);
    for check in &quality.hygiene {
        println!(
            "  {:<22} {}",
            check.name,
            if check.passed { "PASSED" } else { "FAILED" }
        );
    }
    Ok(())
}

fn cmd_repair(file: PathBuf, kind: ComponentKind, write: bool) -> Result<()> {
    let text = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let config = SitewrightConfig::load_or_default(&PathBuf::from("."))
        .context("Failed to load configuration")?;

    let filtered = CommentaryFilter::new().filter(&text);
    let repaired = RepairEngine::new(config.icons, config.repair).repair(kind, &filtered);

    if write {
        std::fs::write(&file, &repaired)
            .with_context(|| format!("Failed to write {}", file.display()))?;
        println!("Repaired {}", file.display());
    } else {
        print!("{}", repaired);
    }
    Ok(())
}

fn cmd_icons() -> Result<()> {
    let config = SitewrightConfig::load_or_default(&PathBuf::from("."))
        .context("Failed to load configuration")?;

    println!("Allowed icons:");
    for icon in &config.icons.allowed {
        println!("  {}", icon);
    }
    println!("\nBrand substitutions:");
    let mut synonyms: Vec<_> = config.icons.synonyms.iter().collect();
    synonyms.sort();
    for (brand, generic) in synonyms {
        println!("  {} -> {}", brand, generic);
    }
    Ok(())
}
