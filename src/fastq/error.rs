use std::error::Error as StdError;
use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

/// Parsing error
#[derive(Debug)]
pub struct Error {
    kind: Box<ErrorKind>,
}

impl Error {
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Error {
            kind: Box::new(kind),
        }
    }

    /// Returns a reference to the [`ErrorKind`](ErrorKind) associated with
    /// the error.
    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the [`ErrorKind`](ErrorKind) associated with the error,
    /// thereby consuming the error.
    #[inline]
    pub fn into_kind(self) -> ErrorKind {
        *self.kind
    }

    /// Returns the 0-based line within the input at which the error
    /// occurred, if one is known.
    #[inline]
    pub fn line(&self) -> Option<u64> {
        self.kind.line()
    }
}

/// The different kinds of parsing errors. All format errors are fatal: the
/// reader is poisoned and will not return further records.
#[derive(Debug)]
pub enum ErrorKind {
    /// `std::io::Error`
    Io(io::Error),
    /// Invalid start byte encountered (expected `@`)
    InvalidStart {
        /// 0-based line of the record start
        line: u64,
        /// Byte found instead
        found: u8,
    },
    /// Invalid separator byte encountered (expected `+`)
    InvalidSep {
        /// 0-based line of the separator
        line: u64,
        /// Byte found instead
        found: u8,
    },
    /// The `+` line repeats a header that differs from the record header.
    /// An empty second header is always accepted.
    SecondHeaderMismatch {
        /// 0-based line of the separator
        line: u64,
        /// The record header (possibly shortened)
        head: String,
        /// The second header (possibly shortened)
        sep_head: String,
    },
    /// Sequence and quality lengths found to be different
    UnequalLengths {
        /// 0-based line of the quality scores
        line: u64,
        /// Length of the sequence
        seq: usize,
        /// Length of the quality scores
        qual: usize,
    },
    /// A record of the textual flavour contains bytes outside `[0, 127]`
    NonAscii {
        /// 0-based line of the record start
        line: u64,
    },
    /// Truncated record found at the end of the input
    UnexpectedEnd {
        /// 0-based line at which the input ended
        line: u64,
    },
    /// Size limit of the buffer was reached, which happens if
    /// `policy::BufPolicy::next_size()` returned `None`
    BufferLimit,
}

impl ErrorKind {
    /// Returns the 0-based line for this error, if one exists.
    pub fn line(&self) -> Option<u64> {
        match self {
            ErrorKind::InvalidStart { line, .. } => Some(*line),
            ErrorKind::InvalidSep { line, .. } => Some(*line),
            ErrorKind::SecondHeaderMismatch { line, .. } => Some(*line),
            ErrorKind::UnequalLengths { line, .. } => Some(*line),
            ErrorKind::NonAscii { line } => Some(*line),
            ErrorKind::UnexpectedEnd { line } => Some(*line),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind() {
            ErrorKind::Io(e) => e.fmt(f),
            ErrorKind::InvalidStart { line, found } => write!(
                f,
                "FASTQ parse error: expected '@' at record start but found '{}' (line {})",
                (*found as char).escape_default(),
                line + 1
            ),
            ErrorKind::InvalidSep { line, found } => write!(
                f,
                "FASTQ parse error: expected '+' separator but found '{}' (line {})",
                (*found as char).escape_default(),
                line + 1
            ),
            ErrorKind::SecondHeaderMismatch {
                line,
                head,
                sep_head,
            } => write!(
                f,
                "FASTQ parse error: second header '{}' does not match record header '{}' \
                 (line {}); it must be either empty or equal to the record header",
                sep_head,
                head,
                line + 1
            ),
            ErrorKind::UnequalLengths { line, seq, qual } => write!(
                f,
                "FASTQ parse error: sequence length is {}, but quality length is {} (line {})",
                seq,
                qual,
                line + 1
            ),
            ErrorKind::NonAscii { line } => write!(
                f,
                "FASTQ parse error: record contains non-ASCII characters (line {})",
                line + 1
            ),
            ErrorKind::UnexpectedEnd { line } => write!(
                f,
                "FASTQ parse error: unexpected end of input (line {})",
                line + 1
            ),
            ErrorKind::BufferLimit => write!(f, "FASTQ parse error: buffer limit reached"),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::new(ErrorKind::Io(e))
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        io::Error::new(io::ErrorKind::Other, err)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self.kind() {
            ErrorKind::Io(err) => Some(err),
            _ => None,
        }
    }
}
