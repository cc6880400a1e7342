use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// What a single probe produced: its label, the outcome and how long it took.
#[derive(Debug)]
pub struct ProbeResult {
    pub name: &'static str,
    pub outcome: Result<ProbeSuccess, ProbeError>,
    pub elapsed: Duration,
}

impl ProbeResult {
    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The predict probe was never attempted because no image was supplied.
    pub fn skipped(&self) -> bool {
        matches!(self.outcome, Err(ProbeError::NoImage))
    }
}

#[derive(Debug)]
pub struct ProbeSuccess {
    pub status: u16,
    pub body: serde_json::Value,
    /// Only set by the predict probe.
    pub detections: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request failed")]
    Transport(#[source] reqwest::Error),

    #[error("request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("response with status {status} is not valid JSON: {body}")]
    InvalidJson { status: u16, body: String },

    #[error("response does not match the expected schema ({reason}): {body}")]
    SchemaMismatch { reason: String, body: String },

    #[error("no image provided, predict probe not attempted")]
    NoImage,

    #[error("image not found at {}", .path.display())]
    ImageNotFound { path: PathBuf },

    #[error("failed to read image {}", .path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid endpoint URL `{url}`")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl ProbeError {
    /// Split a reqwest failure into the timeout case and everything else.
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ProbeError::Timeout { timeout }
        } else {
            ProbeError::Transport(err)
        }
    }
}
