//! Optional on-disk configuration. A missing file means defaults; a file
//! that exists but does not parse is a startup error.

use serde::Deserialize;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Socket address the server binds to.
    pub listen: String,
    /// Number of spheres in the decorative scene.
    pub sphere_count: usize,
    /// Render tick interval in milliseconds.
    pub frame_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen: "127.0.0.1:3000".to_string(),
            sphere_count: 12,
            frame_interval_ms: 16,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.listen, "127.0.0.1:3000");
        assert_eq!(config.sphere_count, 12);
        assert_eq!(config.frame_interval_ms, 16);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{"sphere_count": 5}"#).unwrap();
        assert_eq!(config.sphere_count, 5);
        assert_eq!(config.listen, "127.0.0.1:3000");
        assert_eq!(config.frame_interval_ms, 16);
    }

    #[test]
    fn test_missing_file_means_defaults() {
        let config = Config::load(Path::new("definitely-not-here.json")).unwrap();
        assert_eq!(config.sphere_count, 12);
    }

    #[test]
    fn test_garbage_file_is_a_parse_error() {
        assert!(serde_json::from_str::<Config>("not json").is_err());
    }
}
