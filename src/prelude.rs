//! # Voxel Playground Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use voxel_playground::prelude::*;
//!
//! let mut editor = voxel_playground::default();
//! let cube = editor.create_object(PrimitiveKind::Cube);
//! editor.set_color(Some(cube), Vector3::new(1.0, 0.0, 0.0)).unwrap();
//! editor.drag(0.0, 0.1, DragButtons::BOTH);
//!
//! for event in editor.drain_events() {
//!     if let EditorEvent::SceneChanged(change) = event {
//!         println!("{:?}", change);
//!     }
//! }
//! ```

// Re-export the editor session
pub use crate::app::{Editor, EditorEvent};
pub use crate::config::{CameraConfig, EditorConfig, RenderSettings};
pub use crate::default;
pub use crate::error::{Result, SceneError};

// Re-export scene and camera types
pub use crate::gfx::camera::{DragButtons, DragMode, DragStep, FreeCamera};
pub use crate::gfx::geometry::GeometryData;
pub use crate::gfx::rendering::{DrawItem, Frame, SceneRenderer};
pub use crate::gfx::scene::{Attribute, PrimitiveKind, Scene, SceneChange, SceneObject};

// Re-export persistence
pub use crate::io::vox::{DecodeReport, FILE_EXTENSION};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Vector3, Zero};
