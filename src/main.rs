mod cli;
mod logging;
mod reporter;

use anyhow::{bail, Context};
use clap::Parser;
use cli::{Cli, Commands, IngestArgs};
use colored::*;
use disc_intake::config::{self, AppConfig, Overrides};
use disc_intake::defaults;
use disc_intake::eject::{CommandEjector, Ejector};
use disc_intake::prompt::ConsolePrompt;
use disc_intake::volume::Volume;
use disc_intake::Intake;
use dotenv::dotenv;
use reporter::CliReporter;
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let args = Cli::parse();

    let overrides = Overrides {
        media_root: args.media_root,
        destination_root: args.destination,
        poll_interval_secs: args.interval,
    };
    let config =
        config::load_configuration(&overrides).context("Error loading configuration")?;

    match args.command.unwrap_or(Commands::Watch) {
        Commands::Watch => run_watch(&config),
        Commands::Ingest(ingest) => run_ingest(&config, ingest),
        Commands::PrintConfig => {
            println!("Configuration: {:#?}", config);
            Ok(())
        }
        Commands::ShowDefaults => show_defaults(&config),
    }
}

fn ejector(config: &AppConfig) -> Option<CommandEjector> {
    let ejector = CommandEjector::from_command(&config.eject_command);
    if ejector.is_none() {
        warn!("No eject command configured; volumes will be left mounted");
    }
    ejector
}

fn run_watch(config: &AppConfig) -> anyhow::Result<()> {
    info!(
        "Watching {} every {}s, writing to {}",
        config.media_root.display(),
        config.poll_interval_secs,
        config.destination_root.display()
    );

    let mut prompt = ConsolePrompt::stdio();
    let sink = CliReporter::new();
    let ejector = ejector(config);

    let mut intake = Intake::new(
        config,
        &mut prompt,
        &sink,
        ejector.as_ref().map(|e| e as &dyn Ejector),
    );
    intake.run().context("Intake stopped")
}

fn run_ingest(config: &AppConfig, args: IngestArgs) -> anyhow::Result<()> {
    if !args.source.is_dir() {
        bail!("{} is not a directory", args.source.display());
    }
    let name = args
        .source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.source.display().to_string());
    let volume = Volume {
        name,
        path: args.source,
    };

    let mut prompt = ConsolePrompt::stdio();
    let sink = CliReporter::new();
    let ejector = if args.eject { ejector(config) } else { None };

    let mut intake = Intake::new(
        config,
        &mut prompt,
        &sink,
        ejector.as_ref().map(|e| e as &dyn Ejector),
    );
    let report = intake
        .drain(volume, args.eject)
        .context("Ingest failed")?;

    match report.progress {
        Some(_) => Ok(()),
        None => bail!("Copy of {} did not complete", report.volume.path.display()),
    }
}

fn show_defaults(config: &AppConfig) -> anyhow::Result<()> {
    let saved = defaults::load(&config.defaults_file)
        .with_context(|| format!("Error reading {}", config.defaults_file.display()))?;
    if saved.is_empty() {
        println!("No saved defaults in {}", config.defaults_file.display());
    }
    for (key, value) in saved.iter() {
        println!("{} = {}", key, value.yellow());
    }
    Ok(())
}
