//! treeforge - Entry Point
//!
//! Bulk file and folder creation from a slash-prefixed tree description.

use clap::Parser;
use log::debug;

use treeforge::commands::{Cli, run};
use treeforge::error::handlers::{error_to_exit_code, handle_error};

#[tokio::main]
async fn main() {
    // RUST_LOG overrides the default filter
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    debug!("Parsed command line: {:?}", cli);

    if let Err(e) = run(cli).await {
        handle_error(&e, &mut std::io::stderr().lock());
        std::process::exit(error_to_exit_code(&e));
    }
}
