//! Transcript track selection
//!
//! A [`Policy`] is an ordered list of [`Step`]s. Each step looks for one kind of
//! track in collection order and the first step with a match decides the
//! selection. Tracks are never reordered and a selection always comes from the
//! collection it was made from.

use serde::{Deserialize, Serialize};

use crate::tracks::{TrackCollection, TranscriptTrack};

const ENGLISH: &str = "en";

/// Which tracks a step accepts, by language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageMatch {
    Any,
    Code(String),
}

impl LanguageMatch {
    fn accepts(&self, track: &TranscriptTrack) -> bool {
        match self {
            LanguageMatch::Any => true,
            LanguageMatch::Code(code) => track.language_code == *code,
        }
    }
}

/// One rule of a selection policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Uploaded captions matching the language
    Manual(LanguageMatch),

    /// Speech recognition captions matching the language
    Generated(LanguageMatch),

    /// Whatever track was listed first
    FirstListed,
}

impl Step {
    /// Index of the first track this step accepts
    fn find(&self, tracks: &[TranscriptTrack]) -> Option<usize> {
        match self {
            Step::Manual(language) => tracks
                .iter()
                .position(|track| track.is_manual() && language.accepts(track)),
            Step::Generated(language) => tracks
                .iter()
                .position(|track| track.is_generated && language.accepts(track)),
            Step::FirstListed => (!tracks.is_empty()).then_some(0),
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Manual(LanguageMatch::Any) => write!(f, "first manual track"),
            Step::Manual(LanguageMatch::Code(code)) => write!(f, "manual '{}' track", code),
            Step::Generated(LanguageMatch::Any) => write!(f, "first generated track"),
            Step::Generated(LanguageMatch::Code(code)) => write!(f, "generated '{}' track", code),
            Step::FirstListed => write!(f, "first listed track"),
        }
    }
}

/// Track selection policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Policy {
    /// English captions first, then anything else
    EnglishFirst,

    /// Captions in the video's own language first
    OriginalFirst,

    /// Explicit language preference list, no fallback beyond it
    Languages(Vec<String>),
}

impl Policy {
    /// The ordered steps this policy tries
    pub fn steps(&self) -> Vec<Step> {
        use LanguageMatch::{Any, Code};

        match self {
            Policy::EnglishFirst => vec![
                Step::Manual(Code(ENGLISH.to_string())),
                Step::Generated(Code(ENGLISH.to_string())),
                Step::Manual(Any),
                Step::Generated(Any),
                Step::FirstListed,
            ],
            // The original-language lookup asks for uploaded captions with an
            // empty language list, which never matches, so the listing order
            // (uploads first) decides.
            Policy::OriginalFirst => vec![
                Step::FirstListed,
                Step::Generated(Any),
                Step::Manual(Code(ENGLISH.to_string())),
                Step::Generated(Code(ENGLISH.to_string())),
            ],
            Policy::Languages(codes) => codes
                .iter()
                .flat_map(|code| {
                    [
                        Step::Manual(Code(code.clone())),
                        Step::Generated(Code(code.clone())),
                    ]
                })
                .collect(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Policy::EnglishFirst => "english-first",
            Policy::OriginalFirst => "original-first",
            Policy::Languages(_) => "languages",
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Policy::Languages(codes) => write!(f, "languages [{}]", codes.join(", ")),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// The chosen track and the step that chose it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub track: TranscriptTrack,
    pub step: Step,
}

impl Selection {
    /// Language of the selected transcript
    pub fn language_code(&self) -> &str {
        &self.track.language_code
    }
}

/// Pick at most one track from the collection
pub fn select(tracks: TrackCollection, policy: &Policy) -> Option<Selection> {
    let (index, step) = policy
        .steps()
        .into_iter()
        .find_map(|step| step.find(tracks.tracks()).map(|index| (index, step)))?;

    tracing::debug!("Policy {} matched {} at position {}", policy, step, index);

    tracks.into_track(index).map(|track| Selection { track, step })
}
