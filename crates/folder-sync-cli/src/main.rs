mod commands;
mod logging;
mod progress;

use std::path::Path;
use std::process;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use folder_sync_core::{export, ProgressReporter, SyncEngine};
use progress::CliReporter;
use tracing::{error, info};

const BANNER: &str = r#"
  __       _     _
 / _| ___ | | __| | ___ _ __      ___ _   _ _ __   ___
| |_ / _ \| |/ _` |/ _ \ '__|____/ __| | | | '_ \ / __|
|  _| (_) | | (_| |  __/ | |_____\__ \ |_| | | | | (__
|_|  \___/|_|\__,_|\___|_|       |___/\__, |_| |_|\___|
                                      |___/
"#;

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match folder_sync_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Report { output }) => {
            println!("{}", BANNER.cyan());
            if let Err(err) = run_report(&config, output) {
                error!("Error: {}", err);
            }
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn run_report(
    config: &folder_sync_core::AppConfig,
    output: Option<String>,
) -> anyhow::Result<()> {
    let engine = SyncEngine::new(config.clone());
    let reporter = CliReporter::new();
    let result = engine.run(&reporter)?;

    let output = output.unwrap_or_else(default_report_name);
    export::write_csv(&result.entries, Path::new(&output))
        .with_context(|| format!("writing report to {}", output))?;
    reporter.on_export_complete(result.entries.len(), &output);

    println!();
    info!(
        "Local: {}, Mega: {}, Merge: {}",
        format!("{:.2}s", result.local_duration.as_secs_f64()).green(),
        format!("{:.2}s", result.remote_duration.as_secs_f64()).green(),
        format!("{:.2}s", result.merge_duration.as_secs_f64()).green(),
    );
    info!(
        "{} local items, {} Mega items, {} merged rows",
        format!("{}", result.local_items).cyan(),
        format!("{}", result.remote_items).cyan(),
        format!("{}", result.entries.len()).cyan(),
    );
    info!("Result file: {}", output.green());

    Ok(())
}

fn default_report_name() -> String {
    format!(
        "export {}.csv",
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
    )
}
