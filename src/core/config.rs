//! Tunables for the point field and cursor trail
//!
//! Every field has a default, so a partial JSON object only overrides
//! what it names. Loaded from `window.__starfield_config` on the web and
//! from the file in `STARFIELD_CONFIG` on native.

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Malformed JSON or wrong field types
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file could not be read
    #[error("Config file error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsed fine, but a value is out of range
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Point field parameters
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of points generated per surface (N)
    pub num_points: usize,
    /// Edge threshold distance (D)
    pub max_distance: f32,
    /// Edge opacity at distance zero (k)
    pub edge_opacity: f32,
    /// Velocity range per axis is [-speed/2, speed/2)
    pub speed: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    pub initial_opacity_min: f32,
    pub initial_opacity_max: f32,
    /// Opacity band enforced after every frame
    pub opacity_min: f32,
    pub opacity_max: f32,
    /// Per-frame opacity perturbation range is [-jitter/2, jitter/2)
    pub opacity_jitter: f32,
    pub line_width: f32,
    /// Glow blur radius around each point
    pub glow: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            num_points: 250,
            max_distance: 120.0,
            edge_opacity: 0.5,
            speed: 0.3,
            radius_min: 1.0,
            radius_max: 3.5,
            initial_opacity_min: 0.4,
            initial_opacity_max: 1.0,
            opacity_min: 0.3,
            opacity_max: 1.0,
            opacity_jitter: 0.015,
            line_width: 0.8,
            glow: 10.0,
        }
    }
}

/// Cursor trail parameters
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Chance that a single pointer-move spawns a marker
    pub spawn_probability: f64,
    /// Delay after spawn before the marker starts fading
    pub fade_delay_ms: f64,
    /// Delay after spawn before the marker is removed
    pub remove_delay_ms: f64,
    pub size_px: f32,
    pub opacity: f32,
    /// Fade offset range per axis is [-drift/2, drift/2)
    pub drift_px: f32,
    pub fade_scale: f32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            spawn_probability: 0.1,
            fade_delay_ms: 50.0,
            remove_delay_ms: 1050.0,
            size_px: 2.0,
            opacity: 0.8,
            drift_px: 100.0,
            fade_scale: 0.5,
        }
    }
}

/// Top-level configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub field: FieldConfig,
    pub trail: TrailConfig,
}

impl StarfieldConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse `json` if present, falling back to defaults on any error
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        let Some(json) = json else {
            debug!("No starfield config provided, using defaults");
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Ignoring starfield config");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let f = &self.field;
        if f.max_distance <= 0.0 {
            return Err(invalid("field.max_distance must be positive"));
        }
        if f.radius_min > f.radius_max {
            return Err(invalid("field.radius_min exceeds field.radius_max"));
        }
        if f.initial_opacity_min > f.initial_opacity_max {
            return Err(invalid("field.initial_opacity_min exceeds field.initial_opacity_max"));
        }
        if !(0.0..=1.0).contains(&f.opacity_min)
            || !(0.0..=1.0).contains(&f.opacity_max)
            || f.opacity_min > f.opacity_max
        {
            return Err(invalid("field opacity band must be an ordered range within [0, 1]"));
        }
        if f.speed < 0.0 || f.opacity_jitter < 0.0 {
            return Err(invalid("field.speed and field.opacity_jitter must not be negative"));
        }
        if f.radius_min < 0.0 || f.line_width < 0.0 || f.glow < 0.0 {
            return Err(invalid("field radius, line_width and glow must not be negative"));
        }
        if !(0.0..=1.0).contains(&f.edge_opacity) {
            return Err(invalid("field.edge_opacity must be within [0, 1]"));
        }

        let t = &self.trail;
        if !(0.0..=1.0).contains(&t.spawn_probability) {
            return Err(invalid("trail.spawn_probability must be within [0, 1]"));
        }
        if t.fade_delay_ms < 0.0 || t.remove_delay_ms <= t.fade_delay_ms {
            return Err(invalid("trail.remove_delay_ms must come after trail.fade_delay_ms"));
        }
        if t.size_px < 0.0 {
            return Err(invalid("trail.size_px must not be negative"));
        }
        if !(0.0..=1.0).contains(&t.opacity) {
            return Err(invalid("trail.opacity must be within [0, 1]"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> ConfigError {
    ConfigError::Invalid(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = StarfieldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.field.num_points, 250);
        assert_eq!(config.field.max_distance, 120.0);
        assert_eq!(config.trail.remove_delay_ms, 1050.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            StarfieldConfig::from_json(r#"{"field": {"num_points": 40}}"#).unwrap();
        assert_eq!(config.field.num_points, 40);
        assert_eq!(config.field.max_distance, 120.0);
        assert_eq!(config.trail, TrailConfig::default());
    }

    #[test]
    fn test_rejects_inverted_opacity_band() {
        let json = r#"{"field": {"opacity_min": 0.9, "opacity_max": 0.2}}"#;
        assert!(matches!(
            StarfieldConfig::from_json(json),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_negative_radius() {
        let json = r#"{"field": {"radius_min": -5.0, "radius_max": -1.0}}"#;
        assert!(matches!(
            StarfieldConfig::from_json(json),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_negative_sizes_and_opacity_out_of_range() {
        for json in [
            r#"{"field": {"line_width": -2.0}}"#,
            r#"{"field": {"glow": -3.0}}"#,
            r#"{"field": {"edge_opacity": 7.0}}"#,
            r#"{"trail": {"size_px": -4.0}}"#,
            r#"{"trail": {"opacity": 1.5}}"#,
        ] {
            assert!(
                matches!(StarfieldConfig::from_json(json), Err(ConfigError::Invalid(_))),
                "accepted {}",
                json
            );
        }
    }

    #[test]
    fn test_rejected_config_never_yields_negative_radii() {
        let json = r#"{
            "field": {"radius_min": -5.0, "radius_max": -1.0, "line_width": -2.0,
                      "glow": -3.0, "edge_opacity": 7.0},
            "trail": {"size_px": -4.0}
        }"#;
        let config = StarfieldConfig::from_json_or_default(Some(json));
        assert_eq!(config, StarfieldConfig::default());

        let field = crate::core::PointField::new(config.field, 400, 300);
        assert!(field.points().iter().all(|p| p.radius >= 0.0));
    }

    #[test]
    fn test_rejects_remove_before_fade() {
        let json = r#"{"trail": {"fade_delay_ms": 500, "remove_delay_ms": 100}}"#;
        assert!(matches!(
            StarfieldConfig::from_json(json),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert!(matches!(
            StarfieldConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
        let config = StarfieldConfig::from_json_or_default(Some("{not json"));
        assert_eq!(config, StarfieldConfig::default());
        assert_eq!(
            StarfieldConfig::from_json_or_default(None),
            StarfieldConfig::default()
        );
    }
}
