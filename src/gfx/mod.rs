//! # Graphics Module
//!
//! Everything between the scene data and the render surface.
//!
//! - **Camera System** ([`camera`]) - Free-fly camera and drag controller
//! - **Geometry** ([`geometry`]) - Flat-shaded meshes for the seven primitives
//! - **Scene Management** ([`scene`]) - The ordered store of placed objects
//! - **Rendering** ([`rendering`]) - Per-frame drawable geometry and redraw tracking
//!
//! ## Usage
//!
//! ```rust
//! use voxel_playground::gfx::{FreeCamera, SceneRenderer, scene::{PrimitiveKind, Scene}};
//!
//! let mut scene = Scene::new();
//! scene.create(PrimitiveKind::Sphere);
//!
//! let renderer = SceneRenderer::default();
//! let frame = renderer.render_frame(&scene, &FreeCamera::default());
//! assert_eq!(frame.items.len(), 1);
//! ```

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod scene;

// Re-export commonly used types
pub use camera::free_camera::FreeCamera;
pub use rendering::scene_renderer::SceneRenderer;
