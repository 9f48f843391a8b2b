//! CLI output: JSON envelope or human status lines, chosen by `--json`.

mod report;
mod response;

pub use report::Report;
pub use response::{exit_code_for_error, map_cmd_result_to_json, print_json_result};

use retoken::{Error, Result};
use serde::Serialize;

use crate::commands::{CmdResult, GlobalArgs};

pub(crate) fn write_stdout(payload: &str) -> Result<()> {
    use std::io::{self, Write};

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", payload) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return Ok(()); // Exit gracefully on SIGPIPE
        }
        return Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        ));
    }
    Ok(())
}

fn print_error_text(err: &Error) {
    eprintln!("❌ {}", err);
    for hint in &err.hints {
        eprintln!("   hint: {}", hint.message);
    }
}

/// Print a command's result in the selected mode and return the exit code.
pub(crate) fn emit<T: Serialize + Report>(result: CmdResult<T>, global: &GlobalArgs) -> i32 {
    if global.json {
        let (json_result, exit_code) = map_cmd_result_to_json(result);
        return match print_json_result(json_result) {
            Ok(()) => exit_code,
            Err(err) => {
                print_error_text(&err);
                exit_code_for_error(err.code)
            }
        };
    }

    let outcome = result.and_then(|(data, exit_code)| {
        write_stdout(&data.report())?;
        Ok(exit_code)
    });

    match outcome {
        Ok(exit_code) => exit_code,
        Err(err) => {
            print_error_text(&err);
            exit_code_for_error(err.code)
        }
    }
}
