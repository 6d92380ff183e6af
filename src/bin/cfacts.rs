use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use country_facts::config::REPORT_SUBJECT;
use country_facts::report::Report;
use country_facts::{CountryFacts, Source, storage};
use env_logger::Env;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cfacts",
    version,
    about = "Load country records and report descriptive statistics over them"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the dataset and print the ten country facts.
    Report(ReportArgs),
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Dataset URL (http/https) or path to a JSON file. Defaults to the public REST Countries v2 API.
    #[arg(short, long)]
    source: Option<String>,
    /// Also save the report as JSON at this path.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.cmd {
        Command::Report(args) => cmd_report(args),
    }
}

fn cmd_report(args: ReportArgs) -> Result<()> {
    let source = match &args.source {
        Some(s) => s.parse::<Source>()?,
        None => Source::default(),
    };

    let countries = source
        .load()
        .with_context(|| format!("loading countries from {}", source))?;
    let facts = CountryFacts::new(countries);

    // Build everything first so a failing query prints nothing.
    let report = Report::build(&facts, REPORT_SUBJECT).context("computing country facts")?;

    if let Some(path) = args.out.as_ref() {
        storage::save_report_json(&report, path)
            .with_context(|| format!("saving report to {}", path.display()))?;
        info!("saved report to {}", path.display());
    }

    println!("Country Facts");
    println!();
    print!("{}", report);
    Ok(())
}
