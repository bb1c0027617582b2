use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    InvalidInput = 1,
    Config = 2,
    Io = 4,
}

#[derive(Debug, Error)]
pub enum DescError {
    #[error("failed to read articles from {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to parse articles from {origin}: {source}")]
    Parse {
        origin: String,
        source: serde_json::Error,
    },

    #[error("issue {0} is not configured")]
    MissingIssueField(&'static str),
}

impl DescError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Io { .. } => ExitCode::Io,
            Self::Parse { .. } => ExitCode::InvalidInput,
            Self::MissingIssueField(_) => ExitCode::Config,
        }
    }
}

pub type DescResult<T> = Result<T, DescError>;
