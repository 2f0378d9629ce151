use anyhow::Result;
use serde::Serialize;

use crate::fetch::Outcome;
use crate::tracks::TranscriptContent;
use crate::TranscriptError;

/// One line per segment, each terminated by a newline
pub fn format_as_text(content: &TranscriptContent) -> String {
    content.texts().fold(String::new(), |mut out, text| {
        out.push_str(text);
        out.push('\n');
        out
    })
}

/// All segment texts joined by single spaces
pub fn format_as_paragraph(content: &TranscriptContent) -> String {
    content.texts().collect::<Vec<_>>().join(" ")
}

/// Single-line JSON report printed by `transcript-json`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JsonEnvelope {
    Success {
        success: bool,
        transcript: String,
        language: String,
        segments: usize,
    },
    Failure {
        success: bool,
        error: String,
    },
}

impl JsonEnvelope {
    pub fn from_outcome(outcome: &Outcome) -> Self {
        match outcome {
            Ok(Some(fetched)) => JsonEnvelope::Success {
                success: true,
                transcript: format_as_paragraph(&fetched.content),
                language: fetched.language.clone(),
                segments: fetched.content.len(),
            },
            Ok(None) => Self::failure("No transcripts available"),
            Err(err) => Self::failure(error_message(err)),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        JsonEnvelope::Failure {
            success: false,
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JsonEnvelope::Success { .. })
    }

    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Short error text used in the JSON envelope
pub fn error_message(err: &TranscriptError) -> String {
    match err {
        TranscriptError::TranscriptsDisabled => "Transcripts are disabled".to_string(),
        TranscriptError::VideoUnavailable => "Video is unavailable or private".to_string(),
        TranscriptError::NoTranscriptFound { .. } => "No transcripts found".to_string(),
        TranscriptError::Other(message) => message.clone(),
    }
}

/// Human readable status line printed by `transcript-file`
pub fn file_status(outcome: &Outcome) -> String {
    match outcome {
        Ok(Some(fetched)) => format!("Transcript saved successfully in language: {}", fetched.language),
        Ok(None) => "No transcripts available for this video. Empty file created.".to_string(),
        Err(TranscriptError::TranscriptsDisabled) => {
            "Transcripts are disabled for this video. Empty file created.".to_string()
        }
        Err(TranscriptError::VideoUnavailable) => {
            "Video is unavailable or private. Empty file created.".to_string()
        }
        Err(TranscriptError::NoTranscriptFound { .. }) => {
            "No transcripts found for this video. Empty file created.".to_string()
        }
        Err(TranscriptError::Other(message)) => {
            format!("Error occurred: {}. Empty file created.", message)
        }
    }
}
