/// Reading edge lists from disk or stdin.
///
/// `chordless-core` never touches the filesystem; all input I/O happens here.
/// Disk files are size-checked via `std::fs::metadata` before any read and
/// stdin is read through a `Read::take` cap, so allocation stays bounded by
/// `--max-file-size` either way.
use std::io::Read as _;
use std::path::Path;

use crate::PathOrStdin;
use crate::error::CliError;

/// Reads the entire contents of `source` into a `String`.
///
/// # Errors
///
/// Returns a [`CliError`] with exit code 2 if the input is missing,
/// unreadable, larger than `max_size`, or not valid UTF-8.
pub fn read_input(source: &PathOrStdin, max_size: u64) -> Result<String, CliError> {
    let bytes = match source {
        PathOrStdin::Path(path) => read_file(path, max_size)?,
        PathOrStdin::Stdin => read_capped(std::io::stdin().lock(), max_size)?,
    };
    bytes_to_string(bytes, &source.label())
}

fn read_file(path: &Path, max_size: u64) -> Result<Vec<u8>, CliError> {
    let file_size = std::fs::metadata(path)
        .map_err(|e| io_error_to_cli(&e, path))?
        .len();
    if file_size > max_size {
        return Err(CliError::FileTooLarge {
            source: path.display().to_string(),
            limit: max_size,
            actual: Some(file_size),
        });
    }
    std::fs::read(path).map_err(|e| io_error_to_cli(&e, path))
}

fn io_error_to_cli(e: &std::io::Error, path: &Path) -> CliError {
    match e.kind() {
        std::io::ErrorKind::NotFound => CliError::FileNotFound {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => CliError::PermissionDenied {
            path: path.to_path_buf(),
        },
        // Everything else keeps the OS message.
        std::io::ErrorKind::IsADirectory
        | std::io::ErrorKind::InvalidInput
        | std::io::ErrorKind::InvalidData
        | std::io::ErrorKind::Interrupted
        | std::io::ErrorKind::UnexpectedEof
        | std::io::ErrorKind::OutOfMemory
        | std::io::ErrorKind::Other
        | _ => CliError::IoError {
            source: path.display().to_string(),
            detail: e.to_string(),
        },
    }
}

/// Reads at most `max_size` bytes from `reader`. Reading exactly `max_size`
/// bytes triggers a one-byte extra read to tell "at the limit" from "over it".
fn read_capped<R: std::io::Read>(mut reader: R, max_size: u64) -> Result<Vec<u8>, CliError> {
    let stdin_error = |e: std::io::Error| CliError::StdinReadError {
        detail: e.to_string(),
    };

    let mut buf = Vec::new();
    (&mut reader)
        .take(max_size)
        .read_to_end(&mut buf)
        .map_err(stdin_error)?;

    if buf.len() as u64 == max_size {
        let mut extra = [0u8; 1];
        if reader.read(&mut extra).map_err(stdin_error)? > 0 {
            return Err(CliError::FileTooLarge {
                source: "-".to_owned(),
                limit: max_size,
                actual: None,
            });
        }
    }
    Ok(buf)
}

fn bytes_to_string(bytes: Vec<u8>, source_label: &str) -> Result<String, CliError> {
    String::from_utf8(bytes).map_err(|e| CliError::InvalidUtf8 {
        source: source_label.to_owned(),
        byte_offset: e.utf8_error().valid_up_to(),
    })
}
