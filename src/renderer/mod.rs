//! WebGPU rendering module
//!
//! Draws the paddles and ball as flat-colored triangles.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::frame_vertices;
pub use vertex::Vertex;
