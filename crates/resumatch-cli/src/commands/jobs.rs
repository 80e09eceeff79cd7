//! Jobs command - list the job profile catalog.

use clap::Args;
use console::style;

use resumatch_core::matcher::SkillMatcher;

use super::{OutputFormat, load_config};

/// Arguments for the jobs command.
#[derive(Args)]
pub struct JobsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub fn run(args: JobsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let matcher = SkillMatcher::from_config(&config)?;
    let profiles = matcher.profiles();

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(profiles)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(["title", "required_skills", "description"])?;
            for profile in profiles {
                wtr.write_record([
                    profile.title.as_str(),
                    profile.required_skills.join("; ").as_str(),
                    profile.description.as_str(),
                ])?;
            }
            wtr.flush()?;
        }
        OutputFormat::Text => {
            println!("{}", style("Job profiles:").bold());
            for profile in profiles {
                println!();
                println!("  {}", style(&profile.title).cyan().bold());
                println!("    Required: {}", profile.required_skills.join(", "));
                if !profile.description.is_empty() {
                    println!("    {}", profile.description);
                }
            }
        }
    }

    Ok(())
}
