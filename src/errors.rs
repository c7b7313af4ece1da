//! Errors and exit codes reported by `scpercent`.

use std::fmt::Display;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A [`Result`](std::result::Result) with a [`ScanError`] as the error type.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Every way a scan can fail. All of them are terminal: nothing is retried and
/// no partial result is reported.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The input is missing, unreadable, or not a recognized container.
    #[error("Error opening file {}", path.display())]
    Open {
        /// The path that was being opened.
        path: PathBuf,

        /// The underlying cause.
        #[source]
        source: io::Error,
    },

    /// The decompression worker count was rejected.
    #[error("Error setting thread count: {requested} exceeds the maximum of {max}")]
    Config {
        /// The worker count that was requested.
        requested: usize,

        /// The largest worker count that is accepted.
        max: usize,
    },

    /// The container header could not be read or parsed.
    #[error("Error reading header from {}", path.display())]
    Header {
        /// The path of the file whose header was malformed.
        path: PathBuf,

        /// The underlying cause.
        #[source]
        source: io::Error,
    },

    /// A record could not be decoded partway through the stream.
    #[error("Error reading record {record}")]
    Read {
        /// The one-based number of the record that failed to decode.
        record: u64,

        /// The underlying cause.
        #[source]
        source: io::Error,
    },

    /// The stream ended without yielding a single record.
    #[error("No lines found.")]
    EmptyInput,
}

/// Exit codes used by the `scpercent` binary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitCode {
    /// The scan completed and the percentage was printed.
    Success = 0,

    /// The arguments were invalid or the scan failed.
    Failure = 1,
}

/// Prints a single diagnostic line to stderr and terminates the process.
pub fn exit<I>(message: I, code: ExitCode) -> !
where
    I: Display,
{
    eprintln!("{}", message);
    std::process::exit(code as i32);
}
