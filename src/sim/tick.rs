//! Per-frame simulation tick
//!
//! Runs once per display refresh. Ordering within a frame is fixed:
//! inputs, ball motion, wall bounce, paddle collisions, scoring, bot.

use super::collision::resolve_paddle_collisions;
use super::physics::{advance_ball, bounce_off_walls};
use super::state::{GameEvent, GameState};
use crate::settings::SpeedTier;

/// Input gathered by the host since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer y in field space
    pub pointer_y: Option<f32>,
    /// Speed tier button pressed
    pub speed_tier: Option<SpeedTier>,
    /// Click on the field (starts the match if idle)
    pub serve: bool,
}

/// Apply input and advance the match by one frame
///
/// `now_ms` is the host's frame timestamp; it only paces the bot's reaction
/// cycle. Ball motion is per frame.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    state.events.clear();

    if let Some(y) = input.pointer_y {
        state.move_human_paddle(y);
    }
    if let Some(tier) = input.speed_tier {
        state.set_ball_speed(tier);
    }
    if input.serve {
        state.serve();
    }

    step(state, now_ms);
}

/// Advance physics, collisions, scoring and the bot by one frame
///
/// For hosts without per-frame input. `events` afterwards holds only this
/// frame's events.
pub fn update(state: &mut GameState, now_ms: f64) {
    state.events.clear();
    step(state, now_ms);
}

/// Frame body shared by `tick` and `update`; events from input handling
/// earlier in the same frame are kept
fn step(state: &mut GameState, now_ms: f64) {
    state.frame += 1;
    advance_ball(&mut state.ball, state.started);

    if bounce_off_walls(&mut state.ball, state.tuning.field_height) {
        state.events.push(GameEvent::WallBounce);
    }

    resolve_paddle_collisions(state);
    state.check_scoring();

    let field_height = state.tuning.field_height;
    let decision = state.bot.update(
        now_ms,
        &state.ball,
        &mut state.left,
        field_height,
        &mut state.rng,
    );
    if let Some(target_y) = decision {
        state.events.push(GameEvent::BotDecision { target_y });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::sim::state::Side;
    use glam::Vec2;
    use proptest::prelude::*;

    #[test]
    fn test_ball_idles_until_served() {
        let mut state = GameState::new(12345);
        let input = TickInput::default();
        for frame in 0..10 {
            tick(&mut state, &input, frame as f64 * FRAME_MS);
        }
        assert!(!state.started);
        assert_eq!(state.ball.pos, Vec2::new(500.0, 350.0));

        let serve = TickInput {
            serve: true,
            ..Default::default()
        };
        tick(&mut state, &serve, 10.0 * FRAME_MS);
        assert!(state.started);
        assert!(state.events.contains(&GameEvent::BallReset));
        // Served this frame and already moved one step
        assert_eq!((state.ball.pos - state.field_center()).abs(), Vec2::splat(2.0));
    }

    #[test]
    fn test_right_exit_scores_for_left_end_to_end() {
        let mut state = GameState::new(2468);
        state.started = true;
        state.move_human_paddle(0.0);
        assert_eq!(state.ball.vel, Vec2::new(5.0, 5.0));
        assert_eq!(state.speed_tier.multiplier(), 1.0);

        let input = TickInput::default();
        let mut frames = 0;
        while state.score() == (0, 0) && frames < 500 {
            tick(&mut state, &input, frames as f64 * FRAME_MS);
            frames += 1;
        }

        assert_eq!(state.score(), (1, 0));
        assert!(state.events.contains(&GameEvent::Scored { side: Side::Left }));
        assert_eq!(state.ball.pos, Vec2::new(500.0, 350.0));
        assert_eq!(state.ball.vel.abs(), Vec2::splat(2.0));
        assert!(state.first_hit_pending);
        assert!(state.started);
    }

    #[test]
    fn test_left_exit_scores_for_right() {
        let mut state = GameState::new(99);
        state.started = true;
        state.left.y = 600.0;
        state.ball.pos = Vec2::new(9.0, 100.0);
        state.ball.vel = Vec2::new(-3.0, 0.0);
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.score(), (0, 1));
        assert_eq!(state.ball.pos, Vec2::new(500.0, 350.0));
    }

    #[test]
    fn test_wall_bounce_during_tick() {
        let mut state = GameState::new(3);
        state.started = true;
        state.ball.pos = Vec2::new(500.0, 9.0);
        state.ball.vel = Vec2::new(2.0, -4.0);
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.ball.pos, Vec2::new(502.0, 5.0));
        assert_eq!(state.ball.vel, Vec2::new(2.0, 4.0));
        assert!(state.events.contains(&GameEvent::WallBounce));
    }

    #[test]
    fn test_tier_change_mid_rally_resets_immediately() {
        let mut state = GameState::new(4);
        state.serve();
        state.ball.pos = Vec2::new(300.0, 200.0);

        let input = TickInput {
            speed_tier: Some(SpeedTier::Fast),
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        assert_eq!(state.speed_tier, SpeedTier::Fast);
        assert!(state.first_hit_pending);
        assert_eq!(state.ball.vel.abs(), Vec2::splat(4.0));
        assert_eq!((state.ball.pos - state.field_center()).abs(), Vec2::splat(4.0));
    }

    #[test]
    fn test_paddle_hit_inside_tick_boosts_once() {
        let mut state = GameState::new(5);
        state.tuning.paddle_jitter = 0.0;
        state.started = true;
        state.ball.pos = Vec2::new(972.0, 350.0);
        state.ball.vel = Vec2::new(2.0, 0.0);

        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.ball.vel, Vec2::new(-3.0, 0.0));
        assert_eq!(state.ball.pos.x, 973.0);
        assert!(state.events.contains(&GameEvent::PaddleHit { side: Side::Right }));

        // Moving away: no further contact, no further boost
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.ball.vel, Vec2::new(-3.0, 0.0));
    }

    #[test]
    fn test_bot_tracks_ball_over_time() {
        let mut state = GameState::new(6);
        state.tuning.paddle_jitter = 0.0;
        state.bot.aim_offset = 0.0;
        state.started = true;
        state.ball.pos = Vec2::new(600.0, 100.0);
        state.ball.vel = Vec2::new(-1.0, 0.0);
        let start = state.left.y;

        for frame in 0..60 {
            tick(&mut state, &TickInput::default(), frame as f64 * FRAME_MS);
        }
        // Aim landed after 200 ms, then the paddle climbed toward y=100
        assert!(state.left.y < start);
        assert!(state.bot.target_y.is_some());
    }

    #[test]
    fn test_update_keeps_only_latest_frame_events() {
        let mut state = GameState::new(31);
        state.serve();
        for frame in 0..10_000u64 {
            update(&mut state, frame as f64 * FRAME_MS);
            // Wall, two paddle hits, boost, score, reset, bot decision
            assert!(state.events.len() <= 7, "events piled up: {}", state.events.len());
        }
        assert_eq!(state.frame, 10_000);
    }

    #[test]
    fn test_tick_keeps_input_events_for_the_frame() {
        let mut state = GameState::new(32);
        let input = TickInput {
            serve: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        assert!(state.events.contains(&GameEvent::BallReset));
        assert_eq!(state.frame, 1);

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert!(!state.events.contains(&GameEvent::BallReset));
        assert_eq!(state.frame, 2);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        for frame in 0..2000usize {
            let input = match frame {
                0 => TickInput {
                    serve: true,
                    ..Default::default()
                },
                1 => TickInput {
                    speed_tier: Some(SpeedTier::Medium),
                    ..Default::default()
                },
                _ => TickInput {
                    pointer_y: Some((frame % 700) as f32),
                    ..Default::default()
                },
            };
            let input = &input;
            let now = frame as f64 * FRAME_MS;
            tick(&mut state1, input, now);
            tick(&mut state2, input, now);
        }

        assert_eq!(state1.frame, state2.frame);
        assert_eq!(state1.ball.pos, state2.ball.pos);
        assert_eq!(state1.ball.vel, state2.ball.vel);
        assert_eq!(state1.left.y, state2.left.y);
        assert_eq!(state1.score(), state2.score());
    }

    proptest! {
        /// Paddles never leave the field whatever the pointer does
        #[test]
        fn prop_paddles_stay_in_field(
            seed in any::<u64>(),
            pointers in proptest::collection::vec(-2000.0f32..3000.0f32, 1..300),
        ) {
            let mut state = GameState::new(seed);
            state.serve();
            let max_y = state.tuning.field_height - state.tuning.paddle_height;
            for (frame, y) in pointers.iter().enumerate() {
                let input = TickInput {
                    pointer_y: Some(*y),
                    ..Default::default()
                };
                tick(&mut state, &input, frame as f64 * FRAME_MS);
                prop_assert!(state.left.y >= 0.0 && state.left.y <= max_y);
                prop_assert!(state.right.y >= 0.0 && state.right.y <= max_y);
            }
        }

        /// Every reset serves at exactly base speed times the tier multiplier
        #[test]
        fn prop_reset_speed_matches_tier(seed in any::<u64>(), tier_index in 0usize..3) {
            let mut state = GameState::new(seed);
            let tier = SpeedTier::ALL[tier_index];
            state.set_ball_speed(tier);
            let expected = state.tuning.ball_serve_speed * tier.multiplier();
            prop_assert!(state.started && state.first_hit_pending);
            prop_assert_eq!(state.ball.vel.x.abs(), expected);
            prop_assert_eq!(state.ball.vel.y.abs(), expected);
            prop_assert_eq!(state.ball.pos, state.field_center());
        }
    }
}
