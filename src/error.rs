use thiserror::Error;

/// Domain failures, one variant per pipeline stage.
///
/// The original service collapsed all of these into nulls; keeping them
/// distinct lets handlers log the real cause while still presenting the
/// lenient HTTP shapes.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no URL provided")]
    MissingParameter,

    #[error("transcript unavailable (captions: {primary}; fallback: {fallback})")]
    TranscriptUnavailable { primary: String, fallback: String },

    #[error("video download failed: {0}")]
    MediaDownload(String),

    #[error("frame capture failed: {0}")]
    FrameDecode(String),

    #[error("ocr failed: {0}")]
    Ocr(String),

    #[error("title lookup failed: {0}")]
    UpstreamMetadata(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
