//! Opsdesk - Local-first task tracking for network operations teams

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = opsdesk::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
