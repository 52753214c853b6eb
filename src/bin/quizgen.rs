use anyhow::{Context, Result};
use clap::Parser;
use recognition_quiz::config::Config;
use recognition_quiz::models::generation::{GenerationLimits, PipelineEvent};
use recognition_quiz::services::ai_service::AIService;
use recognition_quiz::services::completion_client::ChatCompletionClient;
use recognition_quiz::services::data_service::DataService;
use recognition_quiz::services::export_service::{ExportService, XLSX_FILE_NAME};
use recognition_quiz::services::pipeline_service::{PipelineConfig, QuizPipeline};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quizgen")]
#[command(about = "Generate quiz questions from an employee recognition CSV")]
#[command(version, long_about = None)]
struct Cli {
    /// Recognition export with the seven required columns
    #[arg(short, long)]
    input: PathBuf,

    /// Directory for quiz_questions.json and quiz_questions_formatted.txt
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Desired number of questions (50-200); derives all four limits
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(50..=200))]
    target: Option<u16>,

    #[arg(long)]
    comment_limit: Option<usize>,

    #[arg(long)]
    scenario_limit: Option<usize>,

    #[arg(long)]
    ai_advanced_limit: Option<usize>,

    #[arg(long)]
    relationship_limit: Option<usize>,

    /// Seed for scenario sampling
    #[arg(long)]
    seed: Option<u64>,

    /// LLM API key, overriding LLM_API_KEY
    #[arg(long, env = "LLM_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Also write quiz_questions.xlsx
    #[arg(long)]
    xlsx: bool,
}

impl Cli {
    fn limits(&self) -> GenerationLimits {
        let base = self
            .target
            .map(|t| GenerationLimits::from_target(t as usize))
            .unwrap_or_default();

        GenerationLimits {
            comment_limit: self.comment_limit.unwrap_or(base.comment_limit),
            scenario_limit: self.scenario_limit.unwrap_or(base.scenario_limit),
            ai_advanced_limit: self.ai_advanced_limit.unwrap_or(base.ai_advanced_limit),
            relationship_limit: self.relationship_limit.unwrap_or(base.relationship_limit),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let bytes = std::fs::read(&cli.input).with_context(|| format!("reading {}", cli.input.display()))?;
    let records = DataService::load_csv(&bytes)?;
    println!("Loaded {} records from {}", records.len(), cli.input.display());

    let http_client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.llm_timeout_secs))
        .build()?;
    let client = ChatCompletionClient::from_config(&config, http_client).with_api_key(cli.api_key.clone());

    let mut limits = cli.limits();
    if !client.has_api_key() {
        tracing::warn!("No LLM API key available, skipping AI-generated questions");
        limits.comment_limit = 0;
        limits.ai_advanced_limit = 0;
    }

    let pipeline = QuizPipeline::new(
        AIService::new(client, config.llm_model.clone(), config.llm_temperature),
        PipelineConfig {
            limits,
            reference_year: config.reference_year,
            seed: cli.seed,
            ..PipelineConfig::default()
        },
    );

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<PipelineEvent>();
    let progress = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            println!("  {:?}: {} questions ({} dropped)", event.stage, event.questions, event.dropped);
        }
    });

    let output = pipeline.run(&records, Some(&tx)).await?;
    drop(tx);
    progress.await?;

    let summary = &output.summary;
    println!("\n{}", "=".repeat(60));
    println!("Raw questions generated: {}", summary.raw);
    println!("After validation: {}", summary.after_validation);
    println!("After filtering: {}", summary.after_filtering);
    println!("Final unique: {}", summary.final_unique);
    println!("Total removed: {}", summary.removed);
    println!("{}\n", "=".repeat(60));

    ExportService::write_outputs(&cli.output_dir, &output.questions)?;
    if cli.xlsx {
        let path = cli.output_dir.join(XLSX_FILE_NAME);
        std::fs::write(&path, ExportService::generate_questions_xlsx(&output.questions)?)?;
        println!("Saved workbook to {}", path.display());
    }

    println!("Generated {} unique questions", output.questions.len());
    println!("\nBreakdown by category:");
    for (category, count) in &summary.by_category {
        println!("  {}: {}", category, count);
    }

    Ok(())
}
