//! Roles command - train and evaluate the role classifier.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use resumatch_core::ml::role::RoleClassifier;

use super::{load_config, load_inputs};

/// Arguments for the roles command.
#[derive(Args)]
pub struct RolesArgs {
    /// Input files or glob pattern (JSON array or newline-delimited JSON)
    #[arg(required = true)]
    input: String,

    /// Write the training report as JSON
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Classify this text with the trained model
    #[arg(long)]
    text: Option<String>,

    /// Classify the contents of this file with the trained model
    #[arg(long, conflicts_with = "text")]
    resume: Option<PathBuf>,
}

pub fn run(args: RolesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let batch = load_inputs(&args.input)?;

    let (classifier, report) = RoleClassifier::train(&batch.documents, &config.training)?;

    println!("{}", style("Role distribution:").bold());
    for (category, count) in &report.class_counts {
        println!("  {:<12} {}", category.to_string(), count);
    }
    if !report.skipped.is_empty() {
        println!("  {} documents skipped", style(report.skipped.len()).yellow());
    }

    println!();
    println!("{}", style("Candidates:").bold());
    for (name, accuracy) in &report.training.candidates {
        println!("  {:<20} {:.2}", name, accuracy);
    }

    println!();
    println!(
        "{} Selected {} ({} training / {} held out)",
        style("✓").green(),
        report.training.model,
        report.training.train_size,
        report.training.test_size
    );
    if report.training.evaluated_on_training {
        println!(
            "{} Too few documents to hold out; scores are on the training set.",
            style("⚠").yellow()
        );
    }
    println!();
    println!("{}", report.training.evaluation);

    if let Some(report_path) = &args.report {
        fs::write(report_path, serde_json::to_string_pretty(&report)?)?;
        println!();
        println!(
            "{} Report written to {}",
            style("✓").green(),
            report_path.display()
        );
    }

    let text = match (&args.text, &args.resume) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(path)) => Some(fs::read_to_string(path)?),
        (None, None) => None,
    };

    if let Some(text) = text {
        println!();
        match classifier.predict(&text) {
            Some((category, confidence)) => println!(
                "{} Predicted role: {} ({:.1}%)",
                style("ℹ").blue(),
                style(category).bold(),
                confidence * 100.0
            ),
            None => println!(
                "{} Text is too short to classify (needs more than {} characters after cleaning).",
                style("⚠").yellow(),
                config.training.min_text_length
            ),
        }
    }

    Ok(())
}
