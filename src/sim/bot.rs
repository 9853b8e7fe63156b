//! Predictive bot for the left paddle
//!
//! The bot re-aims on a fixed reaction cycle driven by host timestamps and
//! steps toward its latest aim every frame in between. Aiming is a noisy
//! straight-line projection of the ball that ignores wall bounces, which
//! keeps the bot beatable.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle};
use crate::tuning::Tuning;

/// A scheduled bot decision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingDecision {
    /// Host time (ms) at which the decision becomes due
    pub due_ms: f64,
    /// Increments on every schedule; only the newest decision can fire
    pub generation: u64,
}

/// Single-slot deferred decision timer
///
/// Scheduling always cancels whatever was pending first, so at most one
/// decision is outstanding at any instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionTimer {
    pub delay_ms: f64,
    pending: Option<PendingDecision>,
    generation: u64,
}

impl ReactionTimer {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            pending: None,
            generation: 0,
        }
    }

    pub fn pending(&self) -> Option<PendingDecision> {
        self.pending
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending decision, returning it if there was one
    pub fn cancel(&mut self) -> Option<PendingDecision> {
        self.pending.take()
    }

    /// Replace any pending decision with one due `delay_ms` from now
    pub fn schedule(&mut self, now_ms: f64) -> PendingDecision {
        self.cancel();
        self.generation += 1;
        let decision = PendingDecision {
            due_ms: now_ms + self.delay_ms,
            generation: self.generation,
        };
        self.pending = Some(decision);
        decision
    }

    /// Fire the pending decision if it is due. Each decision fires once.
    pub fn poll(&mut self, now_ms: f64) -> Option<PendingDecision> {
        match self.pending {
            Some(decision) if now_ms >= decision.due_ms => self.pending.take(),
            _ => None,
        }
    }
}

/// Where the bot is in its reaction cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotPhase {
    /// Nothing scheduled and no aim yet
    Idle,
    /// Waiting for the first decision to land
    Armed,
    /// Stepping toward an aim while the next decision is pending
    Moving,
}

/// Delayed-reaction tracker driving the bot paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotController {
    pub timer: ReactionTimer,
    /// Paddle step per frame
    pub speed: f32,
    /// Maximum aiming error either way
    pub aim_offset: f32,
    /// Latest aim, held until the next decision replaces it
    pub target_y: Option<f32>,
}

impl BotController {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            timer: ReactionTimer::new(tuning.bot_reaction_ms),
            speed: tuning.bot_speed,
            aim_offset: tuning.bot_aim_offset,
            target_y: None,
        }
    }

    pub fn phase(&self) -> BotPhase {
        match (self.target_y, self.timer.is_armed()) {
            (Some(_), _) => BotPhase::Moving,
            (None, true) => BotPhase::Armed,
            (None, false) => BotPhase::Idle,
        }
    }

    /// Straight-line y of the ball when it reaches `paddle_x`
    ///
    /// Returns `None` when the ball has no horizontal speed.
    pub fn predict_intercept(ball: &Ball, paddle_x: f32) -> Option<f32> {
        if ball.vel.x == 0.0 {
            return None;
        }
        Some(ball.pos.y + ball.vel.y / ball.vel.x * (paddle_x - ball.pos.x))
    }

    /// Re-aim from the ball's current state plus noise. Keeps the old aim if
    /// no prediction is possible and returns the new aim otherwise.
    pub fn decide<R: Rng + ?Sized>(
        &mut self,
        ball: &Ball,
        paddle: &Paddle,
        rng: &mut R,
    ) -> Option<f32> {
        let predicted = Self::predict_intercept(ball, paddle.x)?;
        let noise = self.aim_offset * rng.random_range(-1.0f32..=1.0);
        let target = predicted + noise;
        self.target_y = Some(target);
        Some(target)
    }

    /// Move the paddle centre one step toward the aim, then clamp
    ///
    /// There is no dead band: a paddle parked near its aim keeps stepping
    /// across it by `speed` each frame, like the browser game's bot.
    pub fn step_paddle(&self, paddle: &mut Paddle, field_height: f32) {
        let Some(target) = self.target_y else {
            return;
        };
        let center = paddle.center_y();
        let y = if center < target {
            paddle.y + self.speed
        } else if center > target {
            paddle.y - self.speed
        } else {
            paddle.y
        };
        paddle.set_y(y, field_height);
    }

    /// Run one frame of the bot
    ///
    /// Fires a due decision, keeps exactly one decision scheduled, and steps
    /// the paddle. Returns the new aim when a decision landed this frame.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        ball: &Ball,
        paddle: &mut Paddle,
        field_height: f32,
        rng: &mut R,
    ) -> Option<f32> {
        let mut decided = None;
        if self.timer.poll(now_ms).is_some() {
            decided = self.decide(ball, paddle, rng);
            if decided.is_none() {
                log::trace!("Ball has no horizontal speed, bot holds its aim");
            }
        }
        if !self.timer.is_armed() {
            self.timer.schedule(now_ms);
        }

        self.step_paddle(paddle, field_height);
        decided
    }
}
