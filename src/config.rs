use std::path::{Path, PathBuf};

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Preferred caption language for both providers
    pub lang: String,
    /// Titles containing any of these (case-insensitive substring) are
    /// treated as tactics videos and go through code extraction
    pub tactic_keywords: Vec<String>,
    /// Playback offset of the frame the code is read from, in seconds
    pub frame_timestamp: f64,
    pub crop: CropRegion,
}

/// Where the on-screen code is expected to render, in pixels.
///
/// This is a layout policy, not something derived from image content. The
/// defaults assume a 1280x720 stream with the code overlay in the lower right;
/// other resolutions or overlay layouts need recalibration via the config file.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            lang: "en".to_string(),
            tactic_keywords: vec!["tactic".to_string(), "formation".to_string()],
            frame_timestamp: 4.0,
            crop: CropRegion::default(),
        }
    }
}

impl Default for CropRegion {
    fn default() -> Self {
        Self { x: 840, y: 560, width: 360, height: 100 }
    }
}

impl Config {
    /// Load config from an explicit path (must parse), or from
    /// ~/.config/tacticode/config.toml if it exists, or defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = config_path();
                if !p.exists() {
                    debug!("No config file found at {}", p.display());
                    return Ok(Config::default());
                }
                p
            }
        };
        debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("tacticode")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
host = "127.0.0.1"
port = 8080
lang = "es"
tactic_keywords = ["tactic", "formation", "meta"]
frame_timestamp = 238.0

[crop]
x = 100
y = 200
width = 300
height = 80
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.lang, "es");
        assert_eq!(config.tactic_keywords.len(), 3);
        assert!((config.frame_timestamp - 238.0).abs() < f64::EPSILON);
        assert_eq!(config.crop.x, 100);
        assert_eq!(config.crop.height, 80);
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.lang, "en");
        assert_eq!(config.tactic_keywords, vec!["tactic", "formation"]);
        assert!((config.frame_timestamp - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(r#"port = 9000"#).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.crop.width, CropRegion::default().width);
    }
}
