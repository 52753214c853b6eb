use anyhow::{Context, Result};
use clap::Parser;
use recognition_quiz::services::quality_service::{AuditedQuestion, QualityService};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "check-questions")]
#[command(about = "Audit a generated question file for duplicates and malformed answers")]
#[command(version, long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "quiz_questions.json")]
    input: PathBuf,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let raw = std::fs::read_to_string(&cli.input).with_context(|| format!("reading {}", cli.input.display()))?;
    let questions: Vec<AuditedQuestion> =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", cli.input.display()))?;

    let report = QualityService::check(&questions);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", QualityService::render(&report));
    }

    Ok(())
}
