//! Match state and core simulation types
//!
//! Owns the score, the ball and both paddles, the rally flags, and the reset
//! protocol. Everything is created once and mutated in place.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bot::BotController;
use crate::settings::SpeedTier;
use crate::tuning::{Tuning, TuningError};

/// Which end of the field a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Who moves a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controller {
    /// Follows the pointer
    Human,
    /// Follows the predictive bot
    Bot,
}

/// Something that happened during the most recent tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    PaddleHit { side: Side },
    FirstHitBoost,
    WallBounce,
    Scored { side: Side },
    BallReset,
    BotDecision { target_y: f32 },
}

/// A paddle. `x` is fixed for the life of the match, `y` is the top edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub controller: Controller,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub score: u32,
}

impl Paddle {
    pub fn new(side: Side, controller: Controller, tuning: &Tuning) -> Self {
        let x = match side {
            Side::Left => tuning.bot_paddle_x,
            Side::Right => tuning.human_paddle_x(),
        };
        Self {
            side,
            controller,
            x,
            y: tuning.centered_paddle_y(),
            width: tuning.paddle_width,
            height: tuning.paddle_height,
            score: 0,
        }
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Move the top edge, clamped into the field
    pub fn set_y(&mut self, y: f32, field_height: f32) {
        self.y = crate::clamp_paddle_y(y, self.height, field_height);
    }

    /// X of the face the ball bounces off
    pub fn leading_edge(&self) -> f32 {
        match self.side {
            Side::Left => self.x + self.width,
            Side::Right => self.x,
        }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball resting at the field centre with its pre-serve velocity
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.field_width / 2.0, tuning.field_height / 2.0),
            vel: Vec2::splat(tuning.ball_idle_speed),
            radius: tuning.ball_radius,
        }
    }
}

/// Complete match state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    /// Bot paddle
    pub left: Paddle,
    /// Human paddle
    pub right: Paddle,
    pub ball: Ball,
    /// False until the first serve; the ball sits idle meanwhile
    pub started: bool,
    /// Armed by every reset, cleared by the first paddle hit of a rally
    pub first_hit_pending: bool,
    pub speed_tier: SpeedTier,
    pub bot: BotController,
    /// Ticks simulated so far
    pub frame: u64,
    /// Events since the start of the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new match with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a new match with custom tuning, rejecting values the
    /// simulation cannot run with (negative jitter or aim offset, etc.)
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            left: Paddle::new(Side::Left, Controller::Bot, &tuning),
            right: Paddle::new(Side::Right, Controller::Human, &tuning),
            ball: Ball::new(&tuning),
            started: false,
            first_hit_pending: true,
            speed_tier: SpeedTier::default(),
            bot: BotController::new(&tuning),
            frame: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Score as (left, right)
    pub fn score(&self) -> (u32, u32) {
        (self.left.score, self.right.score)
    }

    pub fn field_center(&self) -> Vec2 {
        Vec2::new(self.tuning.field_width / 2.0, self.tuning.field_height / 2.0)
    }

    /// Re-centre the ball and serve it in a random diagonal at the current tier
    pub fn reset_ball(&mut self) {
        let speed = self.tuning.ball_serve_speed * self.speed_tier.multiplier();
        let sx = if self.rng.random_bool(0.5) { speed } else { -speed };
        let sy = if self.rng.random_bool(0.5) { speed } else { -speed };

        self.first_hit_pending = true;
        self.started = true;
        self.ball.pos = self.field_center();
        self.ball.vel = Vec2::new(sx, sy);

        log::debug!("Ball served with velocity ({sx}, {sy})");
        self.events.push(GameEvent::BallReset);
    }

    /// Switch the speed tier; takes effect immediately with a fresh serve
    pub fn set_ball_speed(&mut self, tier: SpeedTier) {
        log::info!("Speed tier set to {}", tier.as_str());
        self.speed_tier = tier;
        self.reset_ball();
    }

    /// Start the match if it has not started yet
    pub fn serve(&mut self) {
        if !self.started {
            self.reset_ball();
        }
    }

    /// Centre the human paddle on a pointer y given in field space
    pub fn move_human_paddle(&mut self, pointer_y: f32) {
        let field_height = self.tuning.field_height;
        let pointer_y = pointer_y.clamp(0.0, field_height);
        let paddle = &mut self.right;
        paddle.set_y(pointer_y - paddle.height / 2.0, field_height);
    }

    /// Award a point if the ball has left the field, then serve again
    pub fn check_scoring(&mut self) -> Option<Side> {
        let ball = &self.ball;
        let exit = if ball.pos.x - ball.radius < 0.0 {
            Side::Left
        } else if ball.pos.x + ball.radius > self.tuning.field_width {
            Side::Right
        } else {
            return None;
        };
        let scorer = exit.opposite();

        let paddle = self.paddle_mut(scorer);
        paddle.score += 1;
        log::info!(
            "{:?} scores ({} - {})",
            scorer,
            self.left.score,
            self.right.score
        );
        self.events.push(GameEvent::Scored { side: scorer });
        self.reset_ball();
        Some(scorer)
    }
}
