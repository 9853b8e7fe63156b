//! Ball kinematics and wall bounces
//!
//! Velocities are in field units per frame.

use super::state::Ball;

/// Move the ball by one frame of velocity. The ball idles until the match starts.
#[inline]
pub fn advance_ball(ball: &mut Ball, started: bool) {
    if started {
        ball.pos += ball.vel;
    }
}

/// Reflect vertical velocity when the ball's edge is past the top or bottom wall
///
/// No position correction is applied, so an overshooting ball may sit past the
/// wall for a frame. Returns true if the ball bounced.
pub fn bounce_off_walls(ball: &mut Ball, field_height: f32) -> bool {
    if ball.pos.y + ball.radius > field_height || ball.pos.y - ball.radius < 0.0 {
        ball.vel.y = -ball.vel.y;
        return true;
    }
    false
}
