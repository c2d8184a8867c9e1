//! # motion-relay
//!
//! Invoked by the motion detector with the captured media file. Emails the
//! file, uploads it to Dropbox, sends an SMS alert, then deletes it.
//!
//! Command format:
//! `motion-relay -f <file_path>`

pub mod action;
pub mod config;
pub mod consts;
pub mod dispatcher;
pub mod errors;
pub mod logger;
pub mod models;
pub mod services;

use clap::Parser;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(err) = logger::setup_simple_logger() {
        eprintln!("failed to set up logger: {err}");
    }

    let args = action::AppArgs::parse();

    match args.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
