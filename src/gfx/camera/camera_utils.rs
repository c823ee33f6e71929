use cgmath::{Matrix4, SquareMatrix};
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton},
};

use super::{
    camera_controller::{CameraController, DragButtons, DragStep, PointerRequest},
    free_camera::FreeCamera,
};
use crate::config::CameraConfig;

/// The camera together with the controller that drives it.
pub struct CameraManager {
    pub camera: FreeCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: FreeCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    /// Builds a camera at the configured pose for a viewport of `size`.
    pub fn from_config(config: &CameraConfig, size: PhysicalSize<u32>) -> Self {
        let mut camera = FreeCamera::new(config, 1.0);
        camera.resize_projection(size.width, size.height);
        Self::new(camera, CameraController::new(size))
    }

    pub fn process_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
    ) -> Option<PointerRequest> {
        self.controller.process_mouse_button(button, state)
    }

    pub fn process_cursor_moved(&mut self, position: PhysicalPosition<f64>) -> DragStep {
        self.controller
            .process_cursor_moved(position, &mut self.camera)
    }

    /// Applies an already-normalised drag delta.
    pub fn drag(&mut self, dx: f64, dy: f64, buttons: DragButtons) -> DragStep {
        self.controller
            .apply_drag(&mut self.camera, dx, dy, buttons)
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.controller.resize(size);
        self.camera.resize_projection(size.width, size.height);
    }
}

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f64>;
}

#[repr(C)]
#[derive(Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    /// Creates a default [CameraUniform].
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

/// Narrows a double-precision matrix to the column-major `f32` layout the
/// GPU expects.
pub fn convert_matrix4_to_array(matrix4: Matrix4<f64>) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            result[i][j] = matrix4[i][j] as f32;
        }
    }

    result
}
