use serde::Serialize;
use thiserror::Error;

use bkt_algo::{BktError, ErrorKind};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub code: String,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Bkt(#[from] BktError),

    #[error("invalid request body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("usage: {0}")]
    Usage(String),
}

impl CliError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Bkt(err) => match err.kind() {
                ErrorKind::Validation => "VALIDATION_ERROR",
                ErrorKind::Lookup => "NOT_FOUND",
                ErrorKind::Sequence => "SEQUENCE_ERROR",
                ErrorKind::Arithmetic => "ARITHMETIC_ERROR",
            },
            Self::Json(_) | Self::Usage(_) => "BAD_REQUEST",
            Self::Io(_) => "IO_ERROR",
        }
    }

    /// 2 for rejected requests, 1 for environment failures
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            _ => 2,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            success: false,
            error: self.to_string(),
            code: self.code().to_string(),
        }
    }
}
