//! CLI application for résumé screening and job matching.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, extract, jobs, matching, roles};

/// Résumé screening - Extract entities from annotated résumés and match them to jobs
#[derive(Parser)]
#[command(name = "resumatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract normalized entities from annotated résumés
    Extract(extract::ExtractArgs),

    /// Train and evaluate the role classifier
    Roles(roles::RolesArgs),

    /// Train the skill matcher and score a résumé against a job
    Match(matching::MatchArgs),

    /// List the job profile catalog
    Jobs(jobs::JobsArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Extract(args) => extract::run(args, cli.config.as_deref()),
        Commands::Roles(args) => roles::run(args, cli.config.as_deref()),
        Commands::Match(args) => matching::run(args, cli.config.as_deref()),
        Commands::Jobs(args) => jobs::run(args, cli.config.as_deref()),
        Commands::Config(args) => config::run(args, cli.config.as_deref()),
    }
}
