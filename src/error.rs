

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;
pub type PassiveResult = Result<()>;

pub use std::io::Error as IoError;
pub use std::io::Result as IoResult;


/// Every way a compress or decompress operation can fail.
///
/// Variant names mirror the error kinds of the original tool (`IOError`,
/// `CodecError`, `UsageError`) plus `Format`, which the original tool never
/// distinguished from a generic invalid-input condition.
#[derive(Debug)]
pub enum Error {
    /// Opening, reading or writing a file failed.
    Io(IoError),

    /// The entropy coder rejected its input or could not produce output
    /// within the destination size supplied by the caller.
    Codec(String),

    /// Command line arguments were missing, malformed, or named an unknown mode.
    Usage(String),

    /// The container itself is inconsistent: a trailer points outside the
    /// file, the footer overruns, or a preprocessing tag is out of range.
    Format(String),
}


impl Error {
    pub fn codec(message: impl Into<String>) -> Self {
        Error::Codec(message.into())
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Error::Usage(message.into())
    }

    pub fn format(message: impl Into<String>) -> Self {
        Error::Format(message.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(error) => write!(formatter, "i/o error: {}", error),
            Error::Codec(message) => write!(formatter, "codec error: {}", message),
            Error::Usage(message) => write!(formatter, "usage error: {}", message),
            Error::Format(message) => write!(formatter, "format error: {}", message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(error) => Some(error),
            _ => None,
        }
    }
}

/// Enable using the `?` operator on io::Result
impl From<IoError> for Error {
    fn from(error: IoError) -> Self {
        Error::Io(error)
    }
}

impl Error {
    /// All errors are fatal at the top-level command: exit code 1 on any
    /// failure, 0 on success.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
