//! Match command - train the skill matcher and score one résumé against a job.

use std::fs;
use std::path::PathBuf;

use clap::{ArgGroup, Args};
use console::style;
use tracing::info;

use resumatch_core::extract::RecordExtractor;
use resumatch_core::matcher::SkillMatcher;
use resumatch_core::models::profile::MatchResult;

use super::{OutputFormat, load_config, load_inputs};

/// Arguments for the match command.
#[derive(Args)]
#[command(group(ArgGroup::new("candidate").required(true).args(["resume", "text"])))]
pub struct MatchArgs {
    /// Training documents: files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Job title from the catalog (case-insensitive)
    #[arg(short, long)]
    job: String,

    /// Plain-text résumé to score
    #[arg(long)]
    resume: Option<PathBuf>,

    /// Résumé text to score
    #[arg(long)]
    text: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub fn run(args: MatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let mut matcher = SkillMatcher::from_config(&config)?;
    if matcher.find_profile(&args.job).is_none() {
        anyhow::bail!("Job title '{}' not found. Run 'resumatch jobs' to list titles.", args.job);
    }

    let resume_text = match (&args.resume, &args.text) {
        (Some(path), _) => fs::read_to_string(path)?,
        (None, Some(text)) => text.clone(),
        (None, None) => anyhow::bail!("Provide --resume or --text"),
    };

    let batch = load_inputs(&args.input)?;
    let extractor = RecordExtractor::from_config(&config.extraction)?;

    let report = matcher.fit_documents(&batch.documents, &extractor)?;
    info!("Matcher trained with {} ({:.2} accuracy)", report.model, report.accuracy());
    eprintln!(
        "{} Trained {} on {} examples, held-out accuracy {:.1}%",
        style("✓").green(),
        report.model,
        report.train_size + report.test_size,
        report.accuracy() * 100.0
    );

    let result = matcher.predict_match(&resume_text, &args.job)?;

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&result)?,
        OutputFormat::Csv => format_csv(&result)?,
        OutputFormat::Text => format_text(&result),
    };
    println!("{}", output);

    Ok(())
}

fn join(items: impl IntoIterator<Item = impl AsRef<str>>, sep: &str) -> String {
    items.into_iter().map(|s| s.as_ref().to_string()).collect::<Vec<_>>().join(sep)
}

fn format_csv(result: &MatchResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "job_title",
        "match",
        "confidence",
        "overlap",
        "matched_skills",
        "missing_skills",
    ])?;

    wtr.write_record([
        &result.job_title,
        &result.is_match.to_string(),
        &format!("{:.4}", result.confidence),
        &format!("{:.4}", result.overlap),
        &join(&result.matched_skills, "; "),
        &join(&result.missing_skills, "; "),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &MatchResult) -> String {
    let mut output = String::new();

    let verdict = if result.is_match {
        style("MATCH").green().bold().to_string()
    } else {
        style("NO MATCH").red().bold().to_string()
    };

    output.push_str(&format!("Job: {}\n", result.job_title));
    output.push_str(&format!(
        "Prediction: {} ({:.1}% confidence)\n",
        verdict,
        result.confidence * 100.0
    ));
    output.push_str(&format!("Skill overlap: {:.0}%\n", result.overlap * 100.0));
    output.push('\n');
    output.push_str(&format!("Required: {}\n", join(&result.required_skills, ", ")));
    output.push_str(&format!("Matched:  {}\n", join(&result.matched_skills, ", ")));
    output.push_str(&format!("Missing:  {}\n", join(&result.missing_skills, ", ")));

    output
}
