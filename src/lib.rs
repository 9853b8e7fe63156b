//! Canvas Pong - classic two-paddle Pong against a predictive bot
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, bot, match state)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Player preferences (speed tier)
//! - `tuning`: Data-driven game balance

pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{Settings, SpeedTier};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Nominal frame interval for headless runs (60 Hz display refresh)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Field dimensions (origin top-left, y grows downward)
    pub const FIELD_WIDTH: f32 = 1000.0;
    pub const FIELD_HEIGHT: f32 = 700.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Gap between the field's left edge and the bot paddle
    pub const BOT_PADDLE_X: f32 = 10.0;
    /// Distance from the field's right edge to the human paddle's left side
    pub const HUMAN_PADDLE_INSET: f32 = 20.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 7.0;
    /// Velocity the ball idles with before the first serve
    pub const BALL_IDLE_SPEED: f32 = 5.0;
    /// Per-axis speed of a fresh serve, before the tier multiplier
    pub const BALL_SERVE_SPEED: f32 = 2.0;
    /// One-time multiplier applied on the first paddle hit of a rally
    pub const FIRST_HIT_BOOST: f32 = 1.5;
    /// Total width of the uniform jitter added to vertical speed on paddle hits
    pub const PADDLE_JITTER: f32 = 0.1;

    /// Bot defaults
    pub const BOT_SPEED: f32 = 3.0;
    pub const BOT_REACTION_MS: f64 = 200.0;
    pub const BOT_AIM_OFFSET: f32 = 30.0;
}

/// Clamp a paddle's top edge into the field
#[inline]
pub fn clamp_paddle_y(y: f32, paddle_height: f32, field_height: f32) -> f32 {
    y.min(field_height - paddle_height).max(0.0)
}
