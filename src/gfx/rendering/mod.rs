// src/gfx/rendering/mod.rs
//! Frame rendering
//!
//! Converts the scene and camera into per-frame drawable geometry and tracks
//! when the render surface needs to be redrawn.

pub mod scene_renderer;

// Re-export main types
pub use scene_renderer::{DrawItem, Frame, SceneRenderer};
