//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-frame velocities, host timestamps only pace the bot
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod bot;
pub mod collision;
pub mod physics;
pub mod state;
pub mod tick;

pub use bot::{BotController, BotPhase, PendingDecision, ReactionTimer};
pub use collision::{
    apply_first_hit_boost, apply_paddle_response, overlaps, resolve_paddle_collisions,
};
pub use physics::{advance_ball, bounce_off_walls};
pub use state::{Ball, Controller, GameEvent, GameState, Paddle, Side};
pub use tick::{TickInput, tick, update};
