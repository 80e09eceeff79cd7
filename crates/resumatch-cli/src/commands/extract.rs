//! Extract command - normalized entities from annotated résumés.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;

use resumatch_core::export::{ExportRow, export_rows};
use resumatch_core::extract::RecordExtractor;
use resumatch_core::models::record::ExtractedRecord;

use super::{OutputFormat, load_config, load_inputs};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input files or glob pattern (JSON array or newline-delimited JSON)
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Skip records without at least one skill and one designation
    #[arg(long)]
    complete_only: bool,
}

#[derive(Serialize)]
struct RecordOutput<'a> {
    document: usize,
    #[serde(flatten)]
    record: &'a ExtractedRecord,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let batch = load_inputs(&args.input)?;

    let extractor = RecordExtractor::from_config(&config.extraction)?
        .with_require_complete(config.extraction.require_complete_records || args.complete_only);
    let (records, report) = extractor.extract_batch(&batch.documents);

    let output = match args.format {
        OutputFormat::Json => format_json(&records)?,
        OutputFormat::Csv => format_csv(&export_rows(&records))?,
        OutputFormat::Text => format_text(&records),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    let skipped = report.skipped();
    eprintln!(
        "{} Extracted {} records in {:?}",
        style("✓").green(),
        report.extracted(),
        start.elapsed()
    );
    if !skipped.is_empty() {
        eprintln!("   {} skipped", style(skipped.len()).yellow());
        for (index, reason) in skipped {
            eprintln!("  - document {}: {}", index, reason);
        }
    }

    Ok(())
}

fn format_json(records: &[ExtractedRecord]) -> anyhow::Result<String> {
    let output: Vec<_> = records
        .iter()
        .enumerate()
        .map(|(document, record)| RecordOutput { document, record })
        .collect();
    Ok(serde_json::to_string_pretty(&output)?)
}

fn format_csv(rows: &[ExportRow]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for row in rows {
        wtr.serialize(row)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(records: &[ExtractedRecord]) -> String {
    let mut output = String::new();

    for (index, record) in records.iter().enumerate() {
        output.push_str(&format!("Document {}\n", index));
        push_field(&mut output, "Names", record.names.iter());
        push_field(&mut output, "Designations", record.designations.iter());
        push_field(&mut output, "Skills", record.skills.iter());
        push_field(&mut output, "Degrees", record.degrees.iter());
        push_field(&mut output, "Colleges", record.colleges.iter());
        push_field(&mut output, "Locations", record.locations.iter());
        push_field(&mut output, "Companies", record.companies.iter());
        if let Some(years) = record.experience_years {
            output.push_str(&format!("  Experience: {} years\n", years));
        }
        output.push('\n');
    }

    output
}

fn push_field<'a>(output: &mut String, name: &str, values: impl Iterator<Item = &'a String>) {
    let values: Vec<&str> = values.map(String::as_str).collect();
    if !values.is_empty() {
        output.push_str(&format!("  {}: {}\n", name, values.join(", ")));
    }
}
