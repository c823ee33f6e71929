// src/lib.rs
//! Voxel Playground
//!
//! The core of an interactive editor for scenes built from seven
//! primitives: the scene store, a free-flying camera, flat-shaded
//! primitive meshes and the `.vox` scene file format.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod io;
pub mod prelude;

// Re-export main types for convenience
pub use app::{Editor, EditorEvent};
pub use error::{Result, SceneError};

/// Creates an editor session with the stock configuration
pub fn default() -> Editor {
    Editor::default()
}
