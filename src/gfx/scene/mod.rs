//! # Scene Management Module
//!
//! The scene store: the ordered list of placed primitives and their
//! transforms and colours.
//!
//! ## Key Components
//!
//! - [`Scene`] - Owns the objects; create/remove/update/query by index
//! - [`SceneObject`] - One primitive with translate, rotate, scale and colour
//! - [`PrimitiveKind`] - The seven placeable solids and their file codes
//! - [`SceneChange`] - Notifications queued by every mutation
//! - [`Vertex3D`] - Vertex format used by the primitive meshes
//!
//! ## Usage
//!
//! ```rust
//! use voxel_playground::gfx::scene::{PrimitiveKind, Scene};
//! use cgmath::Vector3;
//!
//! let mut scene = Scene::new();
//! let cube = scene.create(PrimitiveKind::Cube);
//! scene.set_translate(cube, Vector3::new(1.0, 2.0, 3.0)).unwrap();
//! assert_eq!(scene.get(cube).unwrap().translate.y, 2.0);
//! ```

pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use object::{Attribute, PrimitiveKind, SceneObject};
pub use scene::{Scene, SceneChange};
pub use vertex::Vertex3D;
