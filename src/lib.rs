pub mod composer;
pub mod config;
pub mod error;
pub mod extractor;
pub mod server;
pub mod youtube;

use serde::Serialize;

/// A single timed transcript cue
#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    pub start: f64,
    pub text: String,
}

/// What the transcript resolver produced.
///
/// The primary provider yields the full cue list; the fallback only yields a
/// URL pointing at a caption resource, so callers must treat the two
/// differently rather than collapsing both into one string early.
#[derive(Debug, Clone)]
pub enum TranscriptPayload {
    Segments(Vec<Segment>),
    CaptionUrl(String),
}

/// Extract the video identifier from a watch URL.
///
/// The identifier is whatever follows the last `v=` marker, truncated at the
/// next `&`, so parameter names that merely end in `v` never shadow the real
/// one. Inputs without a `v=` marker are used whole; short-form links still
/// resolve through yt-dlp downstream.
pub fn parse_video_id(url: &str) -> String {
    match url.rsplit_once("v=") {
        Some((_, rest)) => rest.split('&').next().unwrap_or(rest).to_string(),
        None => url.to_string(),
    }
}

/// Render segments as one `start: text` line per cue, offsets to two decimals
pub fn render_transcript(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| format!("{:.2}: {}", s.start, s.text))
        .collect::<Vec<_>>()
        .join("\n")
}
