pub mod camera_controller;
pub mod camera_utils;
pub mod free_camera;

// Re-export main types
pub use camera_controller::{CameraController, DragButtons, DragMode, DragStep, PointerRequest};
pub use camera_utils::{Camera, CameraManager, CameraUniform};
pub use free_camera::{wrap_angle, CameraBasis, FreeCamera};
