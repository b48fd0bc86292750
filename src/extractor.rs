use std::path::Path;
use std::process::Stdio;

use log::debug;
use regex::Regex;
use tokio::process::Command;

use crate::config::{Config, CropRegion};
use crate::error::Error;

/// Download the video, grab one cropped frame, OCR it, and scan for a tactic
/// code. `Ok(None)` means the pipeline ran but nothing matched; `Err` means a
/// stage failed.
///
/// All artifacts live in a per-request temp directory keyed by video id, so
/// concurrent requests never collide and everything is removed when the guard
/// drops, on every exit path.
pub async fn extract_code(url: &str, video_id: &str, config: &Config) -> Result<Option<String>, Error> {
    let workdir = tempfile::Builder::new()
        .prefix(&format!("tacticode-{video_id}-"))
        .tempdir()?;
    let video_path = workdir.path().join("video.mp4");
    let frame_path = workdir.path().join("frame.png");

    download_video(url, &video_path).await?;
    capture_frame(&video_path, &frame_path, config.frame_timestamp, &config.crop).await?;
    let text = run_ocr(&frame_path).await?;

    Ok(scan_code(&text))
}

async fn download_video(url: &str, dest: &Path) -> Result<(), Error> {
    debug!("Downloading video via yt-dlp: {url}");

    let output = Command::new("yt-dlp")
        .args(["-f", "best[ext=mp4]/best", "--no-playlist", "-o"])
        .arg(dest)
        .arg(url)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await;

    let output = match output {
        Ok(o) => o,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::MediaDownload(
                "yt-dlp not found. Install it to enable code extraction:\n  pip install yt-dlp".to_string(),
            ));
        }
        Err(e) => return Err(Error::MediaDownload(format!("failed to run yt-dlp: {e}"))),
    };

    if !output.status.success() {
        return Err(Error::MediaDownload(format!(
            "yt-dlp exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    if !dest.exists() {
        return Err(Error::MediaDownload(format!(
            "yt-dlp did not produce expected output file: {}",
            dest.display()
        )));
    }

    Ok(())
}

/// Decode one frame at `timestamp`, crop the code region, and grayscale it
/// for OCR contrast, all in a single ffmpeg pass
async fn capture_frame(video: &Path, frame: &Path, timestamp: f64, crop: &CropRegion) -> Result<(), Error> {
    let filter = format!("crop={}:{}:{}:{},format=gray", crop.width, crop.height, crop.x, crop.y);
    debug!("Capturing frame at {timestamp}s with filter {filter}");

    let output = Command::new("ffmpeg")
        .args(["-y", "-ss", &timestamp.to_string(), "-i"])
        .arg(video)
        .args(["-frames:v", "1", "-vf", &filter])
        .arg(frame)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await;

    let output = match output {
        Ok(o) => o,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::FrameDecode("ffmpeg not found on PATH".to_string()));
        }
        Err(e) => return Err(Error::FrameDecode(format!("failed to run ffmpeg: {e}"))),
    };

    if !output.status.success() {
        return Err(Error::FrameDecode(format!(
            "ffmpeg exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    // ffmpeg exits 0 with no output when the timestamp is past the end
    if !frame.exists() {
        return Err(Error::FrameDecode(format!("no frame decoded at {timestamp}s")));
    }

    Ok(())
}

async fn run_ocr(frame: &Path) -> Result<String, Error> {
    let output = Command::new("tesseract")
        .arg(frame)
        .args(["stdout", "--psm", "7"])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await;

    let output = match output {
        Ok(o) => o,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::Ocr("tesseract not found on PATH".to_string()));
        }
        Err(e) => return Err(Error::Ocr(format!("failed to run tesseract: {e}"))),
    };

    if !output.status.success() {
        return Err(Error::Ocr(format!(
            "tesseract exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// First whole-word 8-12 character alphanumeric token in the recognized text.
/// Shape is the only validation; there is no checksum to verify against.
pub fn scan_code(text: &str) -> Option<String> {
    let re = Regex::new(r"\b[A-Za-z0-9]{8,12}\b").unwrap();
    re.find(text).map(|m| m.as_str().to_string())
}
