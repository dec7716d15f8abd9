//! Rendering adapter: renderer-agnostic read interface.
//!
//! # Invariants
//! - Renderers cannot mutate the world.
//! - Draw data comes from each chunk's current buffer and its world coordinate.

mod renderer;

pub use renderer::{ChunkDraw, DebugTextRenderer, RenderView, Renderer, draw_batches};

pub fn crate_info() -> &'static str {
    "automata-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
