//! Tuning configuration
//!
//! Every physics and gameplay constant the simulation reads at runtime. Loaded
//! from an optional JSON document; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::TokenKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Token physics ===
    pub token_radius: f32,
    /// Downward acceleration added every tick
    pub gravity: f32,
    /// Velocity damping applied every tick (not just on contact)
    pub friction: f32,
    pub floor_restitution: f32,
    pub wall_restitution: f32,
    pub push_factor: f32,
    pub snap_threshold: f32,

    // === Selection ===
    pub link_distance: f32,
    pub min_chain: usize,
    pub points_per_token: u64,
    /// Size of the kind palette drawn from at spawn (1..=5)
    pub kind_count: usize,

    // === Spawning ===
    pub initial_tokens: usize,
    pub spawn_stagger_ms: f32,
    pub spawn_height: f32,
    /// Max horizontal speed given to a fresh token (uniform in ±drift)
    pub spawn_drift: f32,
    /// Drop spawns still queued from the previous session on reset/resize
    pub cancel_pending_on_reset: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            token_radius: TOKEN_RADIUS,
            gravity: TOKEN_GRAVITY,
            friction: TOKEN_FRICTION,
            floor_restitution: FLOOR_RESTITUTION,
            wall_restitution: WALL_RESTITUTION,
            push_factor: PUSH_FACTOR,
            snap_threshold: SNAP_THRESHOLD,

            link_distance: LINK_DISTANCE,
            min_chain: MIN_CHAIN,
            points_per_token: POINTS_PER_TOKEN,
            kind_count: TokenKind::ALL.len(),

            initial_tokens: INITIAL_TOKENS,
            spawn_stagger_ms: SPAWN_STAGGER_MS,
            spawn_height: SPAWN_HEIGHT,
            spawn_drift: 0.0,
            cancel_pending_on_reset: true,
        }
    }
}

impl GameConfig {
    /// DOM element holding an optional JSON override (wasm only)
    pub const ELEMENT_ID: &'static str = "tsum-config";

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        }

        let reals = [
            ("token_radius", self.token_radius),
            ("gravity", self.gravity),
            ("friction", self.friction),
            ("floor_restitution", self.floor_restitution),
            ("wall_restitution", self.wall_restitution),
            ("push_factor", self.push_factor),
            ("snap_threshold", self.snap_threshold),
            ("link_distance", self.link_distance),
            ("spawn_stagger_ms", self.spawn_stagger_ms),
            ("spawn_height", self.spawn_height),
            ("spawn_drift", self.spawn_drift),
        ];
        if let Some((field, _)) = reals.into_iter().find(|(_, v)| !v.is_finite()) {
            return invalid(field, "must be finite");
        }

        if !(self.token_radius > 0.0) {
            return invalid("token_radius", "must be positive");
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return invalid("friction", "must be within 0..=1");
        }
        if !(0.0..=1.0).contains(&self.floor_restitution) {
            return invalid("floor_restitution", "must be within 0..=1");
        }
        if !(0.0..=1.0).contains(&self.wall_restitution) {
            return invalid("wall_restitution", "must be within 0..=1");
        }
        if self.push_factor < 0.0 {
            return invalid("push_factor", "must not be negative");
        }
        if self.snap_threshold < 0.0 {
            return invalid("snap_threshold", "must not be negative");
        }
        if self.min_chain == 0 {
            return invalid("min_chain", "must be at least 1");
        }
        if self.kind_count == 0 || self.kind_count > TokenKind::ALL.len() {
            return invalid("kind_count", "must be within 1..=5");
        }
        if self.spawn_stagger_ms < 0.0 {
            return invalid("spawn_stagger_ms", "must not be negative");
        }
        if self.spawn_drift < 0.0 {
            return invalid("spawn_drift", "must not be negative");
        }
        Ok(())
    }

    /// Load the config override from the page, falling back to defaults (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => Self::from_json_or_default(&json),
            None => {
                log::info!("Using default config");
                Self::default()
            }
        }
    }

    /// Load the config from a JSON file path, falling back to defaults (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: Option<&str>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read config {}: {}", path, e);
                Self::default()
            }
        }
    }

    fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => {
                log::info!("Loaded config override");
                config
            }
            Err(e) => {
                log::warn!("Rejected config ({}), using defaults", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "initial_tokens": 12, "spawn_drift": 1.0 }"#)
            .expect("valid config");
        assert_eq!(config.initial_tokens, 12);
        assert_eq!(config.spawn_drift, 1.0);
        assert_eq!(config.token_radius, TOKEN_RADIUS);
        assert!(config.cancel_pending_on_reset);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = GameConfig::from_json(r#"{ "token_radius": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "token_radius",
                ..
            }
        ));

        let err = GameConfig::from_json(r#"{ "kind_count": 9 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "kind_count", .. }));
    }

    #[test]
    fn test_rejects_non_finite() {
        // 1e39 overflows f32 to infinity
        let err = GameConfig::from_json(r#"{ "spawn_drift": 1e39 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "spawn_drift",
                reason: "must be finite"
            }
        ));

        let err = GameConfig::from_json(r#"{ "token_radius": 1e39 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "token_radius", .. }));

        let config = GameConfig {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "gravity", .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = GameConfig {
            min_chain: 4,
            ..Default::default()
        };
        let json = config.to_json().expect("serializes");
        assert_eq!(GameConfig::from_json(&json).expect("parses"), config);
    }
}
