mod cli;
mod commands;
mod config;
mod constants;
mod metadata;
mod report;
mod resolver;
mod scanner;
mod sources;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use commands::scan::ScanOptions;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan {
            mods_dir,
            find_missing,
            offline,
            json,
            output,
        } => {
            commands::scan::scan(
                &mods_dir,
                ScanOptions {
                    find_missing,
                    offline,
                    json,
                    output,
                },
            )
            .await
        }
        Commands::Tree { mods_dir } => commands::tree::tree(&mods_dir),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            ui::error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}
