//! Data-driven game balance
//!
//! Every number the simulation reads lives here so a match can be tuned from
//! JSON without recompiling. `Tuning::default()` reproduces the classic feel.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a tuning document is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("field must have positive size, got {width}x{height}")]
    FieldSize { width: f32, height: f32 },
    #[error("paddle {width}x{height} does not fit a field {field_height} high")]
    PaddleSize {
        width: f32,
        height: f32,
        field_height: f32,
    },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("first hit boost must be at least 1.0, got {0}")]
    Boost(f32),
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    /// X of the bot (left) paddle's left side
    pub bot_paddle_x: f32,
    /// Inset of the human (right) paddle from the right edge
    pub human_paddle_inset: f32,

    pub ball_radius: f32,
    /// Per-axis speed of the idle ball before the first serve
    pub ball_idle_speed: f32,
    /// Per-axis serve speed, scaled by the speed tier
    pub ball_serve_speed: f32,
    pub first_hit_boost: f32,
    pub paddle_jitter: f32,

    /// Bot paddle step per frame
    pub bot_speed: f32,
    /// Milliseconds between bot decisions
    pub bot_reaction_ms: f64,
    /// Maximum aiming error in either direction
    pub bot_aim_offset: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            bot_paddle_x: BOT_PADDLE_X,
            human_paddle_inset: HUMAN_PADDLE_INSET,
            ball_radius: BALL_RADIUS,
            ball_idle_speed: BALL_IDLE_SPEED,
            ball_serve_speed: BALL_SERVE_SPEED,
            first_hit_boost: FIRST_HIT_BOOST,
            paddle_jitter: PADDLE_JITTER,
            bot_speed: BOT_SPEED,
            bot_reaction_ms: BOT_REACTION_MS,
            bot_aim_offset: BOT_AIM_OFFSET,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject parameter sets the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.field_width > 0.0 && self.field_height > 0.0) {
            return Err(TuningError::FieldSize {
                width: self.field_width,
                height: self.field_height,
            });
        }
        if !(self.paddle_width > 0.0
            && self.paddle_height > 0.0
            && self.paddle_height <= self.field_height)
        {
            return Err(TuningError::PaddleSize {
                width: self.paddle_width,
                height: self.paddle_height,
                field_height: self.field_height,
            });
        }

        let positive = [
            ("ball_radius", self.ball_radius),
            ("ball_serve_speed", self.ball_serve_speed),
            ("bot_speed", self.bot_speed),
            ("bot_reaction_ms", self.bot_reaction_ms as f32),
        ];
        for (name, value) in positive {
            // Negated so NaN is rejected too
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { name, value });
            }
        }

        let non_negative = [
            ("paddle_jitter", self.paddle_jitter),
            ("bot_aim_offset", self.bot_aim_offset),
            ("ball_idle_speed", self.ball_idle_speed),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(TuningError::Negative { name, value });
            }
        }

        if !(self.first_hit_boost >= 1.0) {
            return Err(TuningError::Boost(self.first_hit_boost));
        }
        Ok(())
    }

    /// X of the human (right) paddle's left side
    #[inline]
    pub fn human_paddle_x(&self) -> f32 {
        self.field_width - self.human_paddle_inset
    }

    /// Top edge of a paddle centred vertically in the field
    #[inline]
    pub fn centered_paddle_y(&self) -> f32 {
        self.field_height / 2.0 - self.paddle_height / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.human_paddle_x(), 980.0);
        assert_eq!(tuning.centered_paddle_y(), 300.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "bot_speed": 4.5, "bot_reaction_ms": 120 }"#).unwrap();
        assert_eq!(tuning.bot_speed, 4.5);
        assert_eq!(tuning.bot_reaction_ms, 120.0);
        assert_eq!(tuning.field_width, FIELD_WIDTH);
    }

    #[test]
    fn test_json_round_trip() {
        let mut tuning = Tuning::default();
        tuning.first_hit_boost = 1.25;
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_bad_documents() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "field_height": 0 }"#),
            Err(TuningError::FieldSize { .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "paddle_height": 800 }"#),
            Err(TuningError::PaddleSize { .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "bot_speed": -1 }"#),
            Err(TuningError::NotPositive { name: "bot_speed", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "bot_aim_offset": -2 }"#),
            Err(TuningError::Negative { name: "bot_aim_offset", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "first_hit_boost": 0.5 }"#),
            Err(TuningError::Boost(_))
        ));
    }
}
