//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "doukit",
    version,
    about = "Front end for the dou dizhu endgame solver"
)]
pub struct DoukitCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play an interactive session against the solver
    Play {
        /// Path to the solver executable (overrides config)
        #[arg(long)]
        solver: Option<PathBuf>,
        /// Startup-hands file (overrides config)
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Edit the starting hands and save them to the startup file
    Edit {
        /// Startup-hands file (overrides config)
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Display the resolved configuration
    Cfg,
    /// Run environment diagnostics
    Doctor,
}
