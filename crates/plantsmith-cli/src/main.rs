//! Plantsmith CLI - Translate flow notation into PlantUML

mod cli;
mod colorizer;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // Logging is initialized inside run() once the flags are known
    let mut app = cli::PlantsmithApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
