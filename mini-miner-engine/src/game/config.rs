//! Board Configuration
//!
//! Everything a caller tunes at init time: the screen container, the token
//! palette, animation speeds and the cascade cap. Loaded from JSON or built
//! in code, and always validated before a board is created.

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::rect::Rect;
use crate::game::grid::TokenType;

/// Default swap animation speed (screen units per second).
pub const DEFAULT_ANIMATION_SPEED: f32 = 70.0;

/// Default drop speed (screen units per second).
pub const DEFAULT_DROP_SPEED: f32 = 90.0;

/// Default maximum chain reactions resolved before the board is reset.
pub const DEFAULT_MAX_CASCADE_DEPTH: u32 = 32;

/// Configuration errors. All are fatal at init.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Palette has no token types.
    #[error("token palette is empty")]
    EmptyPalette,

    /// A speed is not a positive finite number.
    #[error("{name} must be positive and finite, got {value}")]
    InvalidSpeed {
        /// Which speed field
        name: &'static str,
        /// Rejected value
        value: f32,
    },

    /// Container has no usable area.
    #[error("grid container must have positive finite size, got {width}x{height}")]
    InvalidContainer {
        /// Container width
        width: f32,
        /// Container height
        height: f32,
    },

    /// Cascade cap of zero would reset on every clear.
    #[error("max_cascade_depth must be at least 1")]
    InvalidCascadeLimit,

    /// Malformed JSON.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Screen rectangle subdivided into the 8x8 cell rest positions
    pub container: Rect,
    /// Unique token types new cells are drawn from
    pub palette: Vec<TokenType>,
    /// Speed of the visual swap animation
    pub animation_speed: f32,
    /// Speed of falling tokens
    pub drop_speed: f32,
    /// Chain reactions resolved before the round is force-reset
    pub max_cascade_depth: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            container: Rect::default(),
            palette: (0..5).map(TokenType).collect(),
            animation_speed: DEFAULT_ANIMATION_SPEED,
            drop_speed: DEFAULT_DROP_SPEED,
            max_cascade_depth: DEFAULT_MAX_CASCADE_DEPTH,
        }
    }
}

impl BoardConfig {
    /// Default config with the given palette.
    pub fn with_palette(palette: Vec<TokenType>) -> Self {
        Self {
            palette,
            ..Self::default()
        }
    }

    /// Parse from JSON. Missing fields take their defaults.
    ///
    /// The result is not validated; call [`BoardConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }

        for (name, value) in [
            ("animation_speed", self.animation_speed),
            ("drop_speed", self.drop_speed),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidSpeed { name, value });
            }
        }

        let (width, height) = (self.container.width(), self.container.height());
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0
            || !self.container.pos.is_finite()
        {
            return Err(ConfigError::InvalidContainer { width, height });
        }

        if self.max_cascade_depth == 0 {
            return Err(ConfigError::InvalidCascadeLimit);
        }

        Ok(())
    }

    /// Remove duplicate palette entries, keeping first occurrence order.
    pub fn dedup_palette(&mut self) {
        let mut seen = Vec::with_capacity(self.palette.len());
        self.palette.retain(|t| {
            if seen.contains(t) {
                false
            } else {
                seen.push(*t);
                true
            }
        });
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BoardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.animation_speed, 70.0);
        assert_eq!(config.drop_speed, 90.0);
        assert_eq!(config.container, Rect::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn test_empty_palette_rejected() {
        let config = BoardConfig::with_palette(Vec::new());
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPalette)));
    }

    #[test]
    fn test_bad_speeds_rejected() {
        let config = BoardConfig {
            drop_speed: 0.0,
            ..BoardConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSpeed { name: "drop_speed", .. })
        ));

        let config = BoardConfig {
            animation_speed: f32::NAN,
            ..BoardConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSpeed { name: "animation_speed", .. })
        ));
    }

    #[test]
    fn test_bad_container_rejected() {
        let config = BoardConfig {
            container: Rect::new(0.0, 0.0, 800.0, -1.0),
            ..BoardConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidContainer { .. })));
    }

    #[test]
    fn test_zero_cascade_limit_rejected() {
        let config = BoardConfig {
            max_cascade_depth: 0,
            ..BoardConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidCascadeLimit)));
    }

    #[test]
    fn test_from_json_partial() {
        let config = BoardConfig::from_json_str(r#"{ "palette": [1, 2, 3], "drop_speed": 120.0 }"#)
            .unwrap();

        assert_eq!(config.palette, vec![TokenType(1), TokenType(2), TokenType(3)]);
        assert_eq!(config.drop_speed, 120.0);
        assert_eq!(config.animation_speed, DEFAULT_ANIMATION_SPEED);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            BoardConfig::from_json_str("{ palette: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_dedup_palette_keeps_order() {
        let mut config = BoardConfig::with_palette(
            [3, 1, 3, 2, 1].into_iter().map(TokenType).collect(),
        );
        config.dedup_palette();
        assert_eq!(config.palette, vec![TokenType(3), TokenType(1), TokenType(2)]);
    }
}
