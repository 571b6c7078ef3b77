use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to open file '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("No files match '{0}'")]
    NoMatch(String),

    #[error("Malformed game record: {0}")]
    Malformed(String),

    #[error("Malformed game record: file='{}'; game_index={index}; {reason}", path.display())]
    MalformedGame {
        path: PathBuf,
        index: usize,
        reason: String,
    },

    #[error("Unknown annotation code ${0}")]
    UnknownNag(u8),

    #[error("Unknown directive color '{0}' (expected G or R)")]
    UnknownColor(char),

    #[error("Malformed comment directive '{directive}': {reason}")]
    Directive { directive: String, reason: String },

    #[error("--output can only be used with a single input file ({0} given)")]
    AmbiguousOutput(usize),
}

impl Error {
    /// Attach the file and game position to a record-level failure.
    pub fn in_game(self, path: &std::path::Path, index: usize) -> Self {
        match self {
            Self::Malformed(reason) => Self::MalformedGame {
                path: path.to_path_buf(),
                index,
                reason,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
