//! Ball-paddle collision detection and response
//!
//! Detection is a pure overlap query. Response is a separate command so the
//! frame driver decides when to mutate, and tests can probe either half.

use rand::Rng;

use super::state::{Ball, GameEvent, GameState, Paddle, Side};

/// Check whether the ball's bounding square overlaps a paddle rectangle
///
/// Edges that merely touch do not count, so a ball placed flush against the
/// leading edge by [`apply_paddle_response`] is clear of the paddle.
pub fn overlaps(ball: &Ball, paddle: &Paddle) -> bool {
    ball.pos.x - ball.radius < paddle.x + paddle.width
        && ball.pos.x + ball.radius > paddle.x
        && ball.pos.y - ball.radius < paddle.y + paddle.height
        && ball.pos.y + ball.radius > paddle.y
}

/// Bounce the ball off a paddle it overlaps
///
/// Places the ball flush with the paddle's leading edge, reverses horizontal
/// speed and nudges vertical speed by up to `jitter / 2` either way.
pub fn apply_paddle_response<R: Rng + ?Sized>(
    ball: &mut Ball,
    paddle: &Paddle,
    jitter: f32,
    rng: &mut R,
) {
    ball.pos.x = match paddle.side {
        Side::Left => paddle.leading_edge() + ball.radius,
        Side::Right => paddle.leading_edge() - ball.radius,
    };
    ball.vel.x = -ball.vel.x;

    // Scaled unit sample: the range is never empty whatever `jitter` holds
    ball.vel.y += jitter / 2.0 * rng.random_range(-1.0f32..=1.0);
}

/// Speed the ball up on the first hit of a rally
///
/// Returns true if the boost fired. The flag is only re-armed by a reset.
pub fn apply_first_hit_boost(ball: &mut Ball, first_hit_pending: &mut bool, boost: f32) -> bool {
    if !*first_hit_pending {
        return false;
    }
    ball.vel *= boost;
    *first_hit_pending = false;
    true
}

/// Resolve collisions with both paddles for this tick
///
/// Both paddles are always tested. Their results share one flag so the
/// first-hit boost fires at most once even if both report a hit.
pub fn resolve_paddle_collisions(state: &mut GameState) -> bool {
    let jitter = state.tuning.paddle_jitter;
    let mut hit = false;

    for side in [Side::Right, Side::Left] {
        if !overlaps(&state.ball, state.paddle(side)) {
            continue;
        }
        let paddle = match side {
            Side::Left => &state.left,
            Side::Right => &state.right,
        };
        apply_paddle_response(&mut state.ball, paddle, jitter, &mut state.rng);
        state.events.push(GameEvent::PaddleHit { side });
        hit = true;
    }

    if hit {
        let boost = state.tuning.first_hit_boost;
        if apply_first_hit_boost(&mut state.ball, &mut state.first_hit_pending, boost) {
            log::debug!("First hit of the rally, ball boosted x{boost}");
            state.events.push(GameEvent::FirstHitBoost);
        }
    }

    hit
}
