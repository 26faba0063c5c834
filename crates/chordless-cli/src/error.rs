/// Failures of the `chordless` binary and how they end the process.
///
/// Anything that goes wrong before the graph is loaded exits with status 2.
/// Losing stdout after enumeration has started exits with status 1.
use std::fmt;
use std::path::PathBuf;

use chordless_core::EdgeListError;

/// A failure reported on stderr before the process exits.
#[derive(Debug)]
pub enum CliError {
    /// The input path does not exist.
    FileNotFound { path: PathBuf },

    /// The input path exists but cannot be opened.
    PermissionDenied { path: PathBuf },

    /// The input is bigger than `--max-file-size`. `actual` is only known for
    /// files on disk; stdin is cut off at the limit.
    FileTooLarge {
        source: String,
        limit: u64,
        actual: Option<u64>,
    },

    /// The input is not UTF-8 text.
    InvalidUtf8 { source: String, byte_offset: usize },

    StdinReadError { detail: String },

    /// Any other read failure.
    IoError { source: String, detail: String },

    /// The text was read but is not an edge list the parser accepts.
    ParseError {
        source: String,
        error: EdgeListError,
    },

    /// stdout went away mid-run, usually a closed pipe.
    OutputError { detail: String },
}

impl CliError {
    /// Status passed to `std::process::exit`.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::OutputError { .. } => 1,
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::InvalidUtf8 { .. }
            | Self::StdinReadError { .. }
            | Self::IoError { .. }
            | Self::ParseError { .. } => 2,
        }
    }

    /// The line printed to stderr: `error: ` followed by the description.
    pub fn message(&self) -> String {
        format!("error: {self}")
    }

    pub fn output(e: &std::io::Error) -> Self {
        Self::OutputError {
            detail: e.to_string(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound { path } => write!(f, "{}: not found", path.display()),
            Self::PermissionDenied { path } => {
                write!(f, "{}: permission denied", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual,
            } => {
                write!(f, "{source}: input too large (limit {limit} bytes")?;
                match actual {
                    Some(actual) => write!(f, ", got {actual})"),
                    None => f.write_str(")"),
                }
            }
            Self::InvalidUtf8 {
                source,
                byte_offset,
            } => write!(f, "{source}: not UTF-8 (bad byte at offset {byte_offset})"),
            Self::StdinReadError { detail } => write!(f, "reading stdin: {detail}"),
            Self::IoError { source, detail } => write!(f, "reading {source}: {detail}"),
            Self::ParseError { source, error } => write!(f, "{source}: {error}"),
            Self::OutputError { detail } => write!(f, "writing results: {detail}"),
        }
    }
}

impl std::error::Error for CliError {}
