use anyhow::Context;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::{timedtext, TrackCollection, TranscriptContent, TranscriptSource, TranscriptTrack};
use crate::config::HttpConfig;
use crate::TranscriptError;

const WATCH_URL: &str = "https://www.youtube.com/watch";
const PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player";
const CONSENT_ACTION: &str = "action=\"https://consent.youtube.com/s\"";

// Innertube client identity used for the player request
const CLIENT_NAME: &str = "ANDROID";
const CLIENT_VERSION: &str = "20.10.38";

static API_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).expect("valid api key regex")
});

static CONSENT_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"name="v" value="(.*?)""#).expect("valid consent regex"));

/// Player response returned by the innertube API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    playability_status: Option<PlayabilityStatus>,
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    status: Option<String>,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Captions {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    tracklist: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    caption_tracks: Option<Vec<CaptionTrack>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    name: Option<TrackName>,
    language_code: String,
    kind: Option<String>,
    #[serde(default)]
    is_translatable: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackName {
    simple_text: Option<String>,
    runs: Option<Vec<TextRun>>,
}

#[derive(Debug, Deserialize)]
struct TextRun {
    text: String,
}

impl CaptionTrack {
    fn into_track(self) -> TranscriptTrack {
        let language = self
            .name
            .and_then(|name| {
                name.runs
                    .and_then(|runs| runs.into_iter().next().map(|run| run.text))
                    .or(name.simple_text)
            })
            .unwrap_or_else(|| self.language_code.clone());

        TranscriptTrack {
            base_url: self.base_url.replace("&fmt=srv3", ""),
            is_generated: self.kind.as_deref() == Some("asr"),
            is_translatable: self.is_translatable,
            language,
            language_code: self.language_code,
        }
    }
}

/// Caption tracks served by YouTube's watch page and innertube API
pub struct YoutubeSource {
    client: Client,
    cookies: Arc<Jar>,
}

impl YoutubeSource {
    pub fn new(http: &HttpConfig) -> crate::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&http.accept_language).context("Invalid Accept-Language header")?,
        );

        let cookies = Arc::new(Jar::default());
        let client = Client::builder()
            .user_agent(&http.user_agent)
            .default_headers(headers)
            .cookie_provider(cookies.clone())
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, cookies })
    }

    /// Fetch the watch page, accepting the EU consent interstitial once if shown
    async fn fetch_watch_page(&self, video_id: &str) -> Result<String, TranscriptError> {
        let url = watch_url(video_id);
        let html = self.get_text(&url).await?;

        if !html.contains(CONSENT_ACTION) {
            return Ok(html);
        }

        tracing::debug!("Consent page shown for {}, accepting cookie", video_id);
        let value = CONSENT_VALUE
            .captures(&html)
            .map(|caps| caps[1].to_string())
            .ok_or_else(|| TranscriptError::Other("failed to accept the consent cookie".to_string()))?;

        let youtube = Url::parse("https://www.youtube.com")
            .map_err(|e| TranscriptError::Other(e.to_string()))?;
        self.cookies
            .add_cookie_str(&format!("CONSENT=YES+{}; Domain=.youtube.com", value), &youtube);

        let html = self.get_text(&url).await?;
        if html.contains(CONSENT_ACTION) {
            return Err(TranscriptError::Other("failed to accept the consent cookie".to_string()));
        }
        Ok(html)
    }

    async fn fetch_player_response(&self, video_id: &str, api_key: &str) -> Result<PlayerResponse, TranscriptError> {
        let body = json!({
            "context": {
                "client": {
                    "clientName": CLIENT_NAME,
                    "clientVersion": CLIENT_VERSION,
                }
            },
            "videoId": video_id,
        });

        let response = self
            .client
            .post(format!("{}?key={}", PLAYER_URL, urlencoding::encode(api_key)))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let raw = response.text().await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn get_text(&self, url: &str) -> Result<String, TranscriptError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl TranscriptSource for YoutubeSource {
    async fn list_tracks(&self, video_id: &str) -> Result<TrackCollection, TranscriptError> {
        tracing::debug!("Listing caption tracks for: {}", video_id);

        let html = self.fetch_watch_page(video_id).await?;
        let api_key = extract_api_key(&html)?;
        let player = self.fetch_player_response(video_id, &api_key).await?;

        tracks_from_player(video_id, player)
    }

    async fn fetch(&self, track: &TranscriptTrack) -> Result<TranscriptContent, TranscriptError> {
        if track.base_url.contains("&exp=xpe") {
            return Err(TranscriptError::Other(
                "this track requires a proof-of-origin token and cannot be fetched".to_string(),
            ));
        }

        tracing::debug!("Fetching timed text for track: {}", track);
        let xml = self.get_text(&track.base_url).await?;
        Ok(timedtext::parse(&xml))
    }

    fn service_name(&self) -> &'static str {
        "YouTube"
    }
}

impl std::fmt::Debug for YoutubeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoutubeSource").finish_non_exhaustive()
    }
}

fn watch_url(video_id: &str) -> String {
    format!("{}?v={}", WATCH_URL, urlencoding::encode(video_id))
}

/// Pull the innertube API key out of a watch page
fn extract_api_key(html: &str) -> Result<String, TranscriptError> {
    if let Some(caps) = API_KEY.captures(html) {
        return Ok(caps[1].to_string());
    }

    if html.contains("class=\"g-recaptcha\"") {
        return Err(TranscriptError::Other(
            "YouTube is blocking requests from this IP (reCAPTCHA shown)".to_string(),
        ));
    }
    Err(TranscriptError::Other("unable to parse the YouTube watch page".to_string()))
}

fn check_playability(status: Option<&PlayabilityStatus>) -> Result<(), TranscriptError> {
    let Some(playability) = status else {
        return Ok(());
    };

    let state = playability.status.as_deref().unwrap_or("OK");
    let reason = playability.reason.as_deref().unwrap_or_default();

    match state {
        "OK" => Ok(()),
        "ERROR" if reason.contains("unavailable") => Err(TranscriptError::VideoUnavailable),
        _ if reason.to_lowercase().contains("private") => Err(TranscriptError::VideoUnavailable),
        "LOGIN_REQUIRED" if reason.contains("not a bot") => Err(TranscriptError::Other(
            "request blocked by YouTube bot detection".to_string(),
        )),
        "LOGIN_REQUIRED" if reason.contains("inappropriate") || reason.contains("age") => Err(
            TranscriptError::Other("video is age restricted and requires sign-in".to_string()),
        ),
        _ => Err(TranscriptError::Other(format!(
            "video is unplayable: {}",
            if reason.is_empty() { state } else { reason }
        ))),
    }
}

/// Turn a player response into tracks, uploaded captions first
fn tracks_from_player(video_id: &str, player: PlayerResponse) -> Result<TrackCollection, TranscriptError> {
    check_playability(player.playability_status.as_ref())?;

    let caption_tracks = player
        .captions
        .and_then(|captions| captions.tracklist)
        .and_then(|tracklist| tracklist.caption_tracks)
        .ok_or(TranscriptError::TranscriptsDisabled)?;

    let (manual, generated): (Vec<_>, Vec<_>) = caption_tracks
        .into_iter()
        .map(CaptionTrack::into_track)
        .partition(TranscriptTrack::is_manual);

    let tracks: Vec<_> = manual.into_iter().chain(generated).collect();
    tracing::info!("Found {} caption track(s) for {}", tracks.len(), video_id);

    Ok(TrackCollection::new(video_id, tracks))
}
