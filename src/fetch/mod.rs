use crate::config::HttpConfig;
use crate::select::{self, Policy, Step};
use crate::tracks::youtube::YoutubeSource;
use crate::tracks::{TranscriptContent, TranscriptSource, TranscriptTrack};
use crate::utils;
use crate::TranscriptError;

/// Result of one invocation: a transcript, nothing to select, or a failure
pub type Outcome = Result<Option<FetchedTranscript>, TranscriptError>;

/// A fetched transcript and how it was chosen
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedTranscript {
    pub video_id: String,

    /// Language code of the selected track
    pub language: String,

    /// The selected track
    pub track: TranscriptTrack,

    /// Selection step that matched
    pub step: Step,

    pub content: TranscriptContent,
}

/// List, select, fetch
pub struct TranscriptPipeline<S> {
    source: S,
}

impl<S: TranscriptSource> TranscriptPipeline<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch the transcript the policy prefers.
    ///
    /// `Ok(None)` means the video has no track the policy accepts. An explicit
    /// language list that matches nothing is reported as
    /// [`TranscriptError::NoTranscriptFound`] instead.
    pub async fn run(&self, video_id: &str, policy: &Policy) -> Outcome {
        tracing::info!(
            "Listing transcripts for {} on {} (policy: {})",
            video_id,
            self.source.service_name(),
            policy
        );
        let tracks = self.source.list_tracks(video_id).await?;
        let available: Vec<String> = tracks.tracks().iter().map(ToString::to_string).collect();
        tracing::debug!("Available tracks: {:?}", available);

        let Some(selection) = select::select(tracks, policy) else {
            if let Policy::Languages(requested) = policy {
                return Err(TranscriptError::NoTranscriptFound {
                    requested: requested.clone(),
                });
            }
            tracing::warn!("No transcript track available for {}", video_id);
            return Ok(None);
        };

        tracing::info!("Selected {} via {}", selection.track, selection.step);
        let content = self.source.fetch(&selection.track).await?;
        tracing::info!("Fetched {} segment(s)", content.len());

        Ok(Some(FetchedTranscript {
            video_id: video_id.to_string(),
            language: selection.language_code().to_string(),
            track: selection.track,
            step: selection.step,
            content,
        }))
    }
}

/// Fetch from YouTube, accepting a bare video id or a video URL
pub async fn fetch_from_youtube(http: &HttpConfig, input: &str, policy: &Policy) -> Outcome {
    let video_id = utils::extract_video_id(input)?;
    let source = YoutubeSource::new(http).map_err(|err| TranscriptError::Other(format!("{:#}", err)))?;

    TranscriptPipeline::new(source).run(&video_id, policy).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::LanguageMatch;
    use crate::tracks::{MockTranscriptSource, TrackCollection, TranscriptSegment};

    fn source_with(tracks: Vec<TranscriptTrack>) -> MockTranscriptSource {
        let mut source = MockTranscriptSource::new();
        source.expect_service_name().return_const("test");
        source
            .expect_list_tracks()
            .withf(|id| id.to_string() == "abcdefghijk")
            .times(1)
            .returning(move |id| Ok(TrackCollection::new(id, tracks.clone())));
        source
    }

    fn hello_world() -> TranscriptContent {
        TranscriptContent::new(vec![
            TranscriptSegment::new("Hello", 0.0, 1.0),
            TranscriptSegment::new("world", 1.0, 1.0),
        ])
    }

    #[tokio::test]
    async fn test_run_fetches_selected_track() {
        let mut source = source_with(vec![TranscriptTrack::new("es", true), TranscriptTrack::new("en", false)]);
        source
            .expect_fetch()
            .withf(|track| track.language_code == "en" && !track.is_generated)
            .times(1)
            .returning(|_| Ok(hello_world()));

        let pipeline = TranscriptPipeline::new(source);
        let fetched = pipeline
            .run("abcdefghijk", &Policy::EnglishFirst)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(fetched.video_id, "abcdefghijk");
        assert_eq!(fetched.language, "en");
        assert_eq!(fetched.step, Step::Manual(LanguageMatch::Code("en".to_string())));
        assert_eq!(fetched.content, hello_world());
    }

    #[tokio::test]
    async fn test_run_with_original_first() {
        let mut source = source_with(vec![TranscriptTrack::new("es", true), TranscriptTrack::new("en", false)]);
        source
            .expect_fetch()
            .withf(|track| track.language_code == "es")
            .times(1)
            .returning(|_| Ok(hello_world()));

        let pipeline = TranscriptPipeline::new(source);
        let fetched = pipeline
            .run("abcdefghijk", &Policy::OriginalFirst)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(fetched.language, "es");
        assert_eq!(fetched.step, Step::FirstListed);
    }

    #[tokio::test]
    async fn test_run_without_tracks_returns_none() {
        let mut source = source_with(vec![]);
        source.expect_fetch().never();

        let pipeline = TranscriptPipeline::new(source);
        assert_eq!(pipeline.run("abcdefghijk", &Policy::EnglishFirst).await, Ok(None));
    }

    #[tokio::test]
    async fn test_run_reports_unmatched_language_list() {
        let mut source = source_with(vec![TranscriptTrack::new("fr", false)]);
        source.expect_fetch().never();

        let pipeline = TranscriptPipeline::new(source);
        let policy = Policy::Languages(vec!["de".to_string()]);
        assert_eq!(
            pipeline.run("abcdefghijk", &policy).await,
            Err(TranscriptError::NoTranscriptFound {
                requested: vec!["de".to_string()]
            })
        );
    }

    #[tokio::test]
    async fn test_run_propagates_listing_errors() {
        let mut source = MockTranscriptSource::new();
        source.expect_service_name().return_const("test");
        source
            .expect_list_tracks()
            .returning(|_| Err(TranscriptError::TranscriptsDisabled));
        source.expect_fetch().never();

        let pipeline = TranscriptPipeline::new(source);
        assert_eq!(
            pipeline.run("abcdefghijk", &Policy::OriginalFirst).await,
            Err(TranscriptError::TranscriptsDisabled)
        );
    }

    #[tokio::test]
    async fn test_invalid_input_fails_before_any_request() {
        let outcome = fetch_from_youtube(&HttpConfig::default(), "not a video", &Policy::EnglishFirst).await;
        assert!(matches!(outcome, Err(TranscriptError::Other(msg)) if msg.contains("invalid video id")));
    }

    #[tokio::test]
    async fn test_run_propagates_fetch_errors() {
        let mut source = source_with(vec![TranscriptTrack::new("en", true)]);
        source
            .expect_fetch()
            .returning(|_| Err(TranscriptError::Other("timed out".to_string())));

        let pipeline = TranscriptPipeline::new(source);
        assert_eq!(
            pipeline.run("abcdefghijk", &Policy::EnglishFirst).await,
            Err(TranscriptError::Other("timed out".to_string()))
        );
    }
}
