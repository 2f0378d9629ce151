use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod timedtext;
pub mod youtube;

use crate::TranscriptError;

/// One caption track available for a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptTrack {
    /// Language code as reported by YouTube ("en", "es", "pt-BR")
    pub language_code: String,

    /// Human readable language name
    pub language: String,

    /// True for speech recognition tracks, false for uploaded captions
    pub is_generated: bool,

    /// Whether YouTube offers machine translation of this track
    pub is_translatable: bool,

    /// Timed text endpoint for this track
    pub base_url: String,
}

impl TranscriptTrack {
    /// Track without a fetch URL, mostly useful for selection
    pub fn new(language_code: impl Into<String>, is_generated: bool) -> Self {
        let language_code = language_code.into();
        Self {
            language: language_code.clone(),
            language_code,
            is_generated,
            is_translatable: false,
            base_url: String::new(),
        }
    }

    pub fn is_manual(&self) -> bool {
        !self.is_generated
    }

    pub fn kind(&self) -> &'static str {
        if self.is_generated {
            "generated"
        } else {
            "manual"
        }
    }
}

impl std::fmt::Display for TranscriptTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.language_code, self.language, self.kind())
    }
}

/// Tracks of a single video, in the order the listing yielded them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackCollection {
    video_id: String,
    tracks: Vec<TranscriptTrack>,
}

impl TrackCollection {
    pub fn new(video_id: impl Into<String>, tracks: Vec<TranscriptTrack>) -> Self {
        Self {
            video_id: video_id.into(),
            tracks,
        }
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn tracks(&self) -> &[TranscriptTrack] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Take ownership of the track at `index`
    pub fn into_track(self, index: usize) -> Option<TranscriptTrack> {
        self.tracks.into_iter().nth(index)
    }
}

/// Individual timed text segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Segment text
    pub text: String,

    /// Start time in seconds
    pub start: f64,

    /// Duration in seconds
    pub duration: f64,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// Timed text of one fetched track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptContent {
    pub segments: Vec<TranscriptSegment>,
}

impl TranscriptContent {
    pub fn new(segments: Vec<TranscriptSegment>) -> Self {
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|segment| segment.text.as_str())
    }
}

/// Lists and fetches caption tracks for a video
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// List every caption track available for the video
    async fn list_tracks(&self, video_id: &str) -> Result<TrackCollection, TranscriptError>;

    /// Fetch the timed text of a listed track
    async fn fetch(&self, track: &TranscriptTrack) -> Result<TranscriptContent, TranscriptError>;

    /// Name of the service behind this source
    fn service_name(&self) -> &'static str;
}
