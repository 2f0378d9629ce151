//! yt-transcript - fetch YouTube transcripts from the command line
//!
//! This library lists the caption tracks of a video, picks one of them with an
//! explicit language fallback policy and renders the fetched timed text as plain
//! lines or as a JSON envelope.

pub mod cli;
pub mod config;
pub mod fetch;
pub mod output;
pub mod select;
pub mod tracks;
pub mod utils;

pub use cli::{FileCli, JsonCli, PolicyArg};
pub use config::Config;
pub use fetch::{fetch_from_youtube, FetchedTranscript, Outcome, TranscriptPipeline};
pub use select::{select, Policy, Selection, Step};
pub use tracks::{TrackCollection, TranscriptContent, TranscriptSegment, TranscriptSource, TranscriptTrack};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Failures reported by the transcript listing and fetching collaborators
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("Transcripts are disabled for this video")]
    TranscriptsDisabled,

    #[error("Video is unavailable or private")]
    VideoUnavailable,

    #[error("No transcript found for languages: {}", .requested.join(", "))]
    NoTranscriptFound { requested: Vec<String> },

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TranscriptError {
    fn from(err: reqwest::Error) -> Self {
        if err.status() == Some(reqwest::StatusCode::TOO_MANY_REQUESTS) {
            return TranscriptError::Other(
                "too many requests, YouTube is blocking requests from this IP".to_string(),
            );
        }
        TranscriptError::Other(format!("HTTP request failed: {}", err))
    }
}

impl From<serde_json::Error> for TranscriptError {
    fn from(err: serde_json::Error) -> Self {
        TranscriptError::Other(format!("unexpected response from YouTube: {}", err))
    }
}
