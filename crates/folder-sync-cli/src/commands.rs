use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "folder-sync")]
#[command(about = "Reconcile local folders against Mega cloud storage", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Collect both inventories, merge them and export the CSV report
    Report {
        /// Output file; defaults to "export <timestamp>.csv"
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print configuration values
    PrintConfig,
}
