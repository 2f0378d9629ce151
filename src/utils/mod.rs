use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url::Url;

use crate::TranscriptError;

const VIDEO_ID_LEN: usize = 11;

/// Initialize tracing on stderr, leaving stdout to the program's output
pub fn init_tracing(default_filter: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("yt_transcript=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Check that a string looks like a YouTube video id
pub fn validate_video_id(id: &str) -> Result<(), TranscriptError> {
    let valid = id.len() == VIDEO_ID_LEN
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if !valid {
        return Err(TranscriptError::Other(format!("invalid video id: {}", id)));
    }
    Ok(())
}

/// Accept either a bare video id or a YouTube URL and return the id
pub fn extract_video_id(input: &str) -> Result<String, TranscriptError> {
    let input = input.trim();

    if validate_video_id(input).is_ok() {
        return Ok(input.to_string());
    }

    let id = parse_video_url(input)
        .ok_or_else(|| TranscriptError::Other(format!("invalid video id: {}", input)))?;

    validate_video_id(&id)?;
    Ok(id)
}

fn parse_video_url(input: &str) -> Option<String> {
    let with_scheme = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    let url = Url::parse(&with_scheme).ok()?;
    let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");

    match host {
        "youtu.be" => url.path_segments()?.next().map(str::to_string),
        "youtube.com" | "music.youtube.com" | "youtube-nocookie.com" => {
            if let Some((_, id)) = url.query_pairs().find(|(key, _)| key == "v") {
                return Some(id.into_owned());
            }

            let mut segments = url.path_segments()?;
            match segments.next()? {
                "embed" | "shorts" | "v" | "live" => segments.next().map(str::to_string),
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_video_id() {
        assert!(validate_video_id("dQw4w9WgXcQ").is_ok());
        assert!(validate_video_id("YxKALSesXiE").is_ok());
        assert!(validate_video_id("a-b_c-d_e-f").is_ok());
        assert!(validate_video_id("short").is_err());
        assert!(validate_video_id("dQw4w9WgXcQ1").is_err());
        assert!(validate_video_id("dQw4w9WgX!Q").is_err());
        assert!(validate_video_id("").is_err());
    }

    #[test]
    fn test_extract_video_id_from_urls() {
        let expected = Ok("dQw4w9WgXcQ".to_string());
        assert_eq!(extract_video_id("dQw4w9WgXcQ"), expected);
        assert_eq!(extract_video_id(" dQw4w9WgXcQ\n"), expected);
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), expected);
        assert_eq!(extract_video_id("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=30"), expected);
        assert_eq!(extract_video_id("https://m.youtube.com/watch?v=dQw4w9WgXcQ"), expected);
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ?t=30"), expected);
        assert_eq!(extract_video_id("youtube.com/shorts/dQw4w9WgXcQ"), expected);
        assert_eq!(extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"), expected);
        assert_eq!(extract_video_id("https://www.youtube.com/live/dQw4w9WgXcQ"), expected);
    }

    #[test]
    fn test_extract_video_id_rejects_other_input() {
        assert!(extract_video_id("https://vimeo.com/123456789").is_err());
        assert!(extract_video_id("https://www.youtube.com/playlist?list=PLrAXtmRdnEQy").is_err());
        assert!(extract_video_id("https://youtu.be/short").is_err());
        assert!(extract_video_id("not a video").is_err());
    }
}
