// CLI module for handling command-line interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "modfix")]
#[command(version)]
#[command(about = "Minecraft mod folder diagnostics: dependency tree and missing dependencies")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a mods folder and print a diagnostic report
    Scan {
        /// Path to the mods folder
        mods_dir: PathBuf,
        /// Look for missing required dependencies
        #[arg(short, long)]
        find_missing: bool,
        /// Do not query Modrinth for download suggestions
        #[arg(long)]
        offline: bool,
        /// Print the result as JSON instead of a text report
        #[arg(long)]
        json: bool,
        /// Also write the report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print only the dependency tree of a mods folder
    Tree {
        /// Path to the mods folder
        mods_dir: PathBuf,
    },
}
