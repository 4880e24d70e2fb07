//! # ArtVault Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        artvault                                         │
//! │                                                                         │
//! │  main.rs ────► parse args, set up logging, run one command              │
//! │                                                                         │
//! │  lib.rs ─────► load config, open storage, load session                  │
//! │                                                                         │
//! │  commands/ ──► gallery, upload, login, cart, checkout, ...              │
//! │                                                                         │
//! │  stdout ─────► command result as JSON                                   │
//! │  stderr ─────► notifications, logs, errors                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process;

use clap::Parser;

use artvault_app::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    artvault_app::init_tracing();

    match artvault_app::run(cli).await {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{json}"),
            Err(error) => {
                eprintln!("{error}");
                process::exit(1);
            }
        },
        Err(error) => {
            eprintln!("{error}");
            process::exit(1);
        }
    }
}
