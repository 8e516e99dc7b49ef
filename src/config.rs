use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::mesh::{DEFAULT_RADIUS, DEFAULT_SUBDIVISIONS};
use crate::palette::Palette;
use crate::scroll::ScrollTrigger;

pub const INITIAL_WINDOW_WIDTH: u32 = 1280;
pub const INITIAL_WINDOW_HEIGHT: u32 = 720;
/// Seconds the scrubbed progress takes to catch up to the scroll offset.
pub const DEFAULT_SCRUB_SECONDS: f32 = 2.0;

/// Everything tunable without recompiling. Defaults reproduce the
/// shipped scene; a JSON file passed via `--config` overrides fields
/// selectively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub radius: f32,
    pub subdivisions: u32,
    pub scrub: f32,
    pub trigger: ScrollTrigger,
    pub palette: Palette,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: INITIAL_WINDOW_WIDTH,
            window_height: INITIAL_WINDOW_HEIGHT,
            radius: DEFAULT_RADIUS,
            subdivisions: DEFAULT_SUBDIVISIONS,
            scrub: DEFAULT_SCRUB_SECONDS,
            trigger: ScrollTrigger::default(),
            palette: Palette::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_the_shipped_scene() {
        let config = AppConfig::default();
        assert_eq!(config.radius, 2.0);
        assert_eq!(config.subdivisions, DEFAULT_SUBDIVISIONS);
        assert_eq!(config.scrub, 2.0);
        assert_eq!(config.trigger.start, 0.0);
        assert_eq!(config.trigger.end, 800.0);
    }

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let config: AppConfig = serde_json::from_str(r#"{"subdivisions": 3}"#).unwrap();
        assert_eq!(config.subdivisions, 3);
        assert_eq!(config.window_width, INITIAL_WINDOW_WIDTH);
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn config_round_trips_through_json() {
        let mut config = AppConfig::default();
        config.scrub = 0.5;
        config.trigger.end = 1200.0;
        let text = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back.scrub, 0.5);
        assert_eq!(back.trigger.end, 1200.0);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(AppConfig::load(Path::new("/nonexistent/orb.json")).is_err());
    }
}
