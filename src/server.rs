use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{info, warn};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::composer::{self, CodeOutcome};
use crate::config::Config;
use crate::error::Error;
use crate::{TranscriptPayload, extractor, parse_video_id, render_transcript, youtube};

#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub config: Arc<Config>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/get_transcript", get(get_transcript))
        .route("/get_tactic_code", get(get_tactic_code))
        .route("/analyze", post(analyze))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct UrlQuery {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    url: Option<String>,
}

type JsonReply = (StatusCode, Json<Value>);

/// Reject absent and empty `url` values before any parsing happens
fn require_url(url: Option<String>) -> Result<String, Error> {
    match url {
        Some(u) if !u.trim().is_empty() => Ok(u.trim().to_string()),
        _ => Err(Error::MissingParameter),
    }
}

fn missing_url() -> JsonReply {
    (StatusCode::BAD_REQUEST, Json(json!({"error": "No URL provided"})))
}

fn bad_gateway(err: &Error) -> JsonReply {
    (StatusCode::BAD_GATEWAY, Json(json!({"error": err.to_string()})))
}

async fn get_transcript(State(state): State<AppState>, Query(q): Query<UrlQuery>) -> JsonReply {
    let Ok(url) = require_url(q.url) else {
        return missing_url();
    };
    let video_id = parse_video_id(&url);

    let transcript = match youtube::resolve_transcript(&state.client, &video_id, &url, &state.config.lang).await {
        Ok(TranscriptPayload::Segments(segments)) => Some(render_transcript(&segments)),
        Ok(TranscriptPayload::CaptionUrl(track_url)) => Some(track_url),
        Err(e) => {
            warn!("Transcript unavailable for {video_id}: {e}");
            None
        }
    };

    (StatusCode::OK, Json(json!({"transcript": transcript})))
}

async fn get_tactic_code(State(state): State<AppState>, Query(q): Query<UrlQuery>) -> JsonReply {
    let Ok(url) = require_url(q.url) else {
        return missing_url();
    };
    let video_id = parse_video_id(&url);

    // Classification needs the title; without it nothing downstream can run
    let title = match youtube::fetch_title(&state.client, &url).await {
        Ok(t) => t,
        Err(e) => {
            let err = Error::UpstreamMetadata(e.to_string());
            warn!("Title lookup failed for {video_id}: {e}");
            return bad_gateway(&err);
        }
    };

    if !composer::is_tactics_video(&title, &state.config.tactic_keywords) {
        info!("Not a tactics video, skipping extraction: {title}");
        return (
            StatusCode::OK,
            Json(json!({"message": "This video does not contain a tactic code."})),
        );
    }

    match extractor::extract_code(&url, &video_id, &state.config).await {
        Ok(Some(code)) => (StatusCode::OK, Json(json!({"tactic_code": code}))),
        Ok(None) => {
            info!("No code matched in OCR output for {video_id}");
            code_not_found()
        }
        Err(e) => {
            warn!("Code extraction failed for {video_id}: {e}");
            code_not_found()
        }
    }
}

fn code_not_found() -> JsonReply {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": "Tactic code not found in video"})),
    )
}

// A malformed or absent body must still get a JSON reply, so the extractor
// rejection collapses into the missing-parameter case instead of axum's
// plain-text 400/415
async fn analyze(State(state): State<AppState>, body: Option<Json<AnalyzeRequest>>) -> JsonReply {
    let Ok(url) = require_url(body.and_then(|Json(req)| req.url)) else {
        return missing_url();
    };
    let video_id = parse_video_id(&url);

    let title = match youtube::fetch_title(&state.client, &url).await {
        Ok(t) => t,
        Err(e) => {
            let err = Error::UpstreamMetadata(e.to_string());
            warn!("Title lookup failed for {video_id}: {e}");
            return bad_gateway(&err);
        }
    };

    let payload = match youtube::resolve_transcript(&state.client, &video_id, &url, &state.config.lang).await {
        Ok(p) => Some(p),
        Err(e) => {
            warn!("Transcript unavailable for {video_id}: {e}");
            None
        }
    };

    let outcome = if composer::is_tactics_video(&title, &state.config.tactic_keywords) {
        match extractor::extract_code(&url, &video_id, &state.config).await {
            Ok(Some(code)) => CodeOutcome::Found(code),
            Ok(None) => {
                info!("No code matched in OCR output for {video_id}");
                CodeOutcome::NotFound
            }
            Err(e) => {
                warn!("Code extraction failed for {video_id}: {e}");
                CodeOutcome::NotFound
            }
        }
    } else {
        CodeOutcome::NotTacticsVideo
    };

    // Only full cue lists feed the excerpt; a caption pointer is still
    // surfaced as the transcript string but gives the composer nothing
    let (transcript, segments) = match &payload {
        Some(TranscriptPayload::Segments(segs)) => (Some(render_transcript(segs)), Some(segs.as_slice())),
        Some(TranscriptPayload::CaptionUrl(track_url)) => (Some(track_url.clone()), None),
        None => (None, None),
    };

    let tweet = composer::compose_tweet(&title, segments, &outcome);
    let tactic_code = match &outcome {
        CodeOutcome::Found(code) => Some(code.clone()),
        _ => None,
    };

    (
        StatusCode::OK,
        Json(json!({
            "title": title,
            "transcript": transcript,
            "tactic_code": tactic_code,
            "tweet": tweet,
        })),
    )
}
