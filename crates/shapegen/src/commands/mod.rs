//! CLI command implementations

pub mod interfacer;
pub mod structer;

use std::io::{Read, Write};

use crate::error::CliError;

/// Path meaning standard input or output
pub const STDIO: &str = "-";

/// Read all of `path`, or stdin for `-`
pub(crate) fn read_input(path: &str) -> Result<Vec<u8>, CliError> {
    let mut buf = Vec::new();
    if path == STDIO {
        std::io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| CliError::io("read", "standard input", e))?;
    } else {
        buf = std::fs::read(path).map_err(|e| CliError::io("read", path, e))?;
    }
    Ok(buf)
}

/// Write `content` to `path`, or stdout for `-`
pub(crate) fn write_output(path: &str, content: &str) -> Result<(), CliError> {
    if path == STDIO {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(|e| CliError::io("write", "standard output", e))
    } else {
        std::fs::write(path, content).map_err(|e| CliError::io("write", path, e))
    }
}
