//! Shape generation for 2D primitives
//!
//! All shapes are emitted in field coordinates (origin top-left, y down);
//! the pipeline maps them to clip space.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::{Vertex, colors};
use crate::sim::{GameState, Paddle};

/// Segments used to approximate the ball
pub const BALL_SEGMENTS: u32 = 24;

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    let (x1, y1) = (x + width, y + height);
    vec![
        Vertex::new(x, y, color),
        Vertex::new(x1, y, color),
        Vertex::new(x, y1, color),
        Vertex::new(x, y1, color),
        Vertex::new(x1, y, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

fn paddle(paddle: &Paddle) -> Vec<Vertex> {
    rect(paddle.x, paddle.y, paddle.width, paddle.height, colors::PADDLE)
}

/// Everything drawn in one frame: both paddles and the ball
pub fn frame_vertices(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(12 + (BALL_SEGMENTS * 3) as usize);
    vertices.extend(paddle(&state.right));
    vertices.extend(paddle(&state.left));
    vertices.extend(circle(
        state.ball.pos,
        state.ball.radius,
        colors::BALL,
        BALL_SEGMENTS,
    ));
    vertices
}
