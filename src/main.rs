use std::process::ExitCode;

use excalidraw_extract::commands;

fn main() -> ExitCode {
    match commands::execute() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
