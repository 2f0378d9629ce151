use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

use crate::select::Policy;

/// Save a video's transcript as plain text lines
#[derive(Parser, Debug)]
#[command(
    name = "transcript-file",
    about = "Fetch a YouTube transcript and write it to a text file, one segment per line",
    version,
    long_about = "Fetches the caption tracks of a YouTube video, picks one with a language fallback policy and writes its text to OUTPUT_FILE. Failures never abort: an empty file is written and the reason is printed."
)]
pub struct FileCli {
    /// Video id or YouTube URL
    #[arg(value_name = "VIDEO_ID")]
    pub video_id: String,

    /// File that receives the transcript
    #[arg(value_name = "OUTPUT_FILE")]
    pub output_file: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long)]
    pub quiet: bool,
}

/// Print a video's transcript as a JSON envelope
#[derive(Parser, Debug)]
#[command(
    name = "transcript-json",
    about = "Fetch a YouTube transcript and print it as a single JSON line",
    version
)]
pub struct JsonCli {
    /// Video id or YouTube URL (defaults to the configured video)
    #[arg(value_name = "VIDEO_ID")]
    pub video_id: Option<String>,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Track selection flags shared by both binaries
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Fallback policy used to pick a caption track
    #[arg(short, long, value_enum, env = "YT_TRANSCRIPT_POLICY")]
    pub policy: Option<PolicyArg>,

    /// Preferred language codes in order; overrides --policy
    #[arg(short, long = "lang", value_name = "LANG")]
    pub languages: Vec<String>,
}

impl SelectionArgs {
    /// Resolve the flags against the configured default policy
    pub fn policy(&self, default: &Policy) -> Policy {
        if !self.languages.is_empty() {
            return Policy::Languages(self.languages.clone());
        }

        match self.policy {
            Some(arg) => arg.into(),
            None => default.clone(),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyArg {
    /// English captions first, then any uploaded, then any generated
    EnglishFirst,
    /// Captions in the video's own language first
    OriginalFirst,
}

impl From<PolicyArg> for Policy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::EnglishFirst => Policy::EnglishFirst,
            PolicyArg::OriginalFirst => Policy::OriginalFirst,
        }
    }
}

impl std::fmt::Display for PolicyArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyArg::EnglishFirst => write!(f, "english-first"),
            PolicyArg::OriginalFirst => write!(f, "original-first"),
        }
    }
}
