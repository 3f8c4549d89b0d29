// src/lexer/tables/error.rs

/// Errors produced while building, loading or writing keyword tables.
#[derive(Debug)]
pub enum TableError {
    /// Candidate size range is empty or starts at zero (min, max)
    InvalidRange { min: usize, max: usize },

    /// A table of size zero was requested
    ZeroTableSize,

    /// The same keyword appears twice in one set
    DuplicateKeyword(String),

    /// A keyword with no characters (position in the input)
    EmptyKeyword(usize),

    /// Loaded table violates a structural invariant
    Corrupt(String),

    /// I/O error
    Io(std::io::Error),

    /// JSON (de)serialization failed
    Json(serde_json::Error),
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRange { min, max } => {
                write!(f, "invalid table size range [{min}, {max}): need 1 <= min < max")
            }
            Self::ZeroTableSize => write!(f, "table size must be at least 1"),
            Self::DuplicateKeyword(kw) => write!(f, "duplicate keyword {kw:?}"),
            Self::EmptyKeyword(i) => write!(f, "keyword #{i} is empty"),
            Self::Corrupt(msg) => write!(f, "corrupt keyword table: {msg}"),
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TableError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for TableError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

pub type Result<T> = std::result::Result<T, TableError>;
