//! # Editor Configuration
//!
//! Start-up values for the editor session. Everything here is plain data
//! with a [`Default`] that reproduces the stock editor: a camera hovering at
//! (8, 5, 8) looking back toward the origin, a light grey background and a
//! 10×10 floor grid.
//!
//! ```rust
//! use voxel_playground::config::EditorConfig;
//!
//! let config = EditorConfig::default().with_move_speed(20.0);
//! assert_eq!(config.camera.move_speed, 20.0);
//! ```

use std::f64::consts::PI;

use cgmath::Vector3;

/// Initial pose and sensitivity of the free camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Eye position in world space.
    pub position: Vector3<f64>,
    /// Horizontal angle in radians.
    pub yaw: f64,
    /// Vertical angle in radians (wrapped into [0, 2π) when applied).
    pub pitch: f64,
    /// World units per full-viewport drag.
    pub move_speed: f64,
    /// Degrees per full-viewport drag.
    pub rotate_speed: f64,
    /// Vertical field of view in degrees.
    pub fovy_degrees: f64,
    pub znear: f64,
    pub zfar: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vector3::new(8.0, 5.0, 8.0),
            // 45° around, 30° down: looking back at the origin
            yaw: PI + PI / 4.0,
            pitch: -PI / 6.0,
            move_speed: 50.0,
            rotate_speed: 50.0,
            fovy_degrees: 45.0,
            znear: 0.01,
            zfar: 100.0,
        }
    }
}

/// Fixed rendering parameters used by the frame step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub clear_color: [f32; 3],
    /// The grid spans `-grid_half_extent..=grid_half_extent` on X and Z.
    pub grid_half_extent: i32,
    pub grid_color: [f32; 3],
    pub ambient: f32,
    pub light_position: [f32; 3],
    pub light_diffuse: f32,
    /// Longitude segments of the sphere.
    pub sphere_slices: u32,
    /// Latitude segments of the sphere.
    pub sphere_stacks: u32,
    /// Angular segments of cones and cylinders.
    pub circle_segments: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_color: [0.8, 0.8, 0.8],
            grid_half_extent: 5,
            grid_color: [0.4, 0.4, 0.4],
            ambient: 0.2,
            light_position: [25.0, 50.0, 25.0],
            light_diffuse: 0.8,
            sphere_slices: 16,
            sphere_stacks: 16,
            circle_segments: 16,
        }
    }
}

/// Everything an [`Editor`](crate::app::Editor) needs to start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    pub camera: CameraConfig,
    pub render: RenderSettings,
    /// Colour given to newly created objects.
    pub default_color: Vector3<f64>,
    /// Initial viewport size in physical pixels.
    pub viewport: (u32, u32),
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            render: RenderSettings::default(),
            default_color: Vector3::new(0.8, 0.8, 0.8),
            viewport: (1200, 800),
        }
    }
}

impl EditorConfig {
    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_render_settings(mut self, render: RenderSettings) -> Self {
        self.render = render;
        self
    }

    pub fn with_move_speed(mut self, move_speed: f64) -> Self {
        self.camera.move_speed = move_speed;
        self
    }

    pub fn with_rotate_speed(mut self, rotate_speed: f64) -> Self {
        self.camera.rotate_speed = rotate_speed;
        self
    }

    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = (width, height);
        self
    }
}
