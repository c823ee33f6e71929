use std::f64::consts::{FRAC_PI_2, TAU};

use cgmath::*;

use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use crate::config::CameraConfig;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f64> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Wraps an angle into `[0, 2π)`.
///
/// Wrapping, not clamping: a sustained drag keeps spinning the camera.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Orthonormal camera frame derived from yaw and pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub forward: Vector3<f64>,
    pub right: Vector3<f64>,
    pub up: Vector3<f64>,
}

impl CameraBasis {
    /// Spherical-to-Cartesian forward, right from yaw rotated by −90°, and
    /// `up = right × forward`.
    pub fn from_angles(yaw: f64, pitch: f64) -> Self {
        let forward = Vector3::new(pitch.cos() * yaw.sin(), pitch.sin(), pitch.cos() * yaw.cos());
        let right = Vector3::new((yaw - FRAC_PI_2).sin(), 0.0, (yaw - FRAC_PI_2).cos());
        let up = right.cross(forward);
        Self { forward, right, up }
    }
}

/// First-person "drone" camera: a free position plus yaw/pitch.
///
/// The view basis is never stored; it is recomputed from the angles every
/// time it is needed so it cannot drift out of sync with them.
#[derive(Debug, Clone, Copy)]
pub struct FreeCamera {
    pub position: Vector3<f64>,
    yaw: f64,
    pitch: f64,
    pub move_speed: f64,
    pub rotate_speed: f64,
    pub aspect: f64,
    pub fovy: Rad<f64>,
    pub znear: f64,
    pub zfar: f64,
    pub uniform: CameraUniform,
}

impl Camera for FreeCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f64> {
        let basis = self.basis();
        let eye = Point3::from_vec(self.position);
        let target = Point3::from_vec(self.position + basis.forward);
        let view = Matrix4::look_at_rh(eye, target, basis.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl FreeCamera {
    pub fn new(config: &CameraConfig, aspect: f64) -> Self {
        let mut camera = Self {
            position: config.position,
            yaw: 0.0,
            pitch: 0.0,
            move_speed: config.move_speed,
            rotate_speed: config.rotate_speed,
            aspect,
            fovy: Deg(config.fovy_degrees).into(),
            znear: config.znear,
            zfar: config.zfar,
            uniform: CameraUniform::default(),
        };
        camera.set_orientation(config.yaw, config.pitch);
        camera
    }

    /// Restores the configured pose and speeds, keeping the aspect ratio.
    pub fn reset_to(&mut self, config: &CameraConfig) {
        *self = Self::new(config, self.aspect);
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Sets both angles, wrapping each into `[0, 2π)`.
    pub fn set_orientation(&mut self, yaw: f64, pitch: f64) {
        self.yaw = wrap_angle(yaw);
        self.pitch = wrap_angle(pitch);
    }

    pub fn add_yaw(&mut self, delta: f64) {
        self.set_orientation(self.yaw + delta, self.pitch);
    }

    pub fn add_pitch(&mut self, delta: f64) {
        self.set_orientation(self.yaw, self.pitch + delta);
    }

    pub fn basis(&self) -> CameraBasis {
        CameraBasis::from_angles(self.yaw, self.pitch)
    }

    pub fn forward(&self) -> Vector3<f64> {
        self.basis().forward
    }

    pub fn right(&self) -> Vector3<f64> {
        self.basis().right
    }

    pub fn up(&self) -> Vector3<f64> {
        self.basis().up
    }

    /// Moves back along the view direction by `amount` (forward when negative).
    pub fn dolly(&mut self, amount: f64) {
        self.position -= self.forward() * amount;
    }

    /// Strafes right by `horizontal` and drops by `vertical`.
    pub fn pan(&mut self, horizontal: f64, vertical: f64) {
        let basis = self.basis();
        self.position += basis.right * horizontal;
        self.position -= basis.up * vertical;
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f64 / height.max(1) as f64;
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [
            self.position.x as f32,
            self.position.y as f32,
            self.position.z as f32,
            1.0,
        ];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

impl Default for FreeCamera {
    fn default() -> Self {
        Self::new(&CameraConfig::default(), 1.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_orthonormal(basis: &CameraBasis) {
        assert!((basis.forward.magnitude() - 1.0).abs() < EPS);
        assert!((basis.right.magnitude() - 1.0).abs() < EPS);
        assert!((basis.up.magnitude() - 1.0).abs() < EPS);
        assert!(basis.forward.dot(basis.right).abs() < EPS);
        assert!(basis.forward.dot(basis.up).abs() < EPS);
        assert!(basis.right.dot(basis.up).abs() < EPS);
    }

    #[test]
    fn test_wrap_angle() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!((wrap_angle(-0.5) - (TAU - 0.5)).abs() < EPS);
        assert!((wrap_angle(TAU + 0.25) - 0.25).abs() < EPS);
        assert!((wrap_angle(-3.0 * TAU - 1.0) - (TAU - 1.0)).abs() < 1e-12);
        assert_eq!(wrap_angle(TAU), 0.0);
        let tiny = wrap_angle(-1e-18);
        assert!((0.0..TAU).contains(&tiny));
    }

    #[test]
    fn test_identity_orientation_looks_down_z() {
        let basis = CameraBasis::from_angles(0.0, 0.0);
        assert!((basis.forward - Vector3::unit_z()).magnitude() < EPS);
        assert!((basis.right + Vector3::unit_x()).magnitude() < EPS);
        assert!((basis.up - Vector3::unit_y()).magnitude() < EPS);
    }

    #[test]
    fn test_default_pose_is_wrapped() {
        let camera = FreeCamera::default();
        assert!((0.0..TAU).contains(&camera.yaw()));
        assert!((0.0..TAU).contains(&camera.pitch()));
        assert!((camera.pitch() - (TAU - std::f64::consts::PI / 6.0)).abs() < EPS);
        // Looking down and back toward the origin from (8, 5, 8)
        let forward = camera.forward();
        assert!(forward.x < 0.0 && forward.y < 0.0 && forward.z < 0.0);
        assert_orthonormal(&camera.basis());
    }

    #[test]
    fn test_basis_orthonormal_everywhere() {
        for i in 0..64 {
            for j in 0..64 {
                let yaw = i as f64 * TAU / 64.0;
                let pitch = j as f64 * TAU / 64.0;
                assert_orthonormal(&CameraBasis::from_angles(yaw, pitch));
            }
        }
    }

    #[test]
    fn test_dolly_and_pan() {
        let mut camera = FreeCamera::default();
        camera.position = Vector3::new(0.0, 0.0, 0.0);
        camera.set_orientation(0.0, 0.0);

        camera.dolly(5.0);
        assert_eq!(camera.position, Vector3::new(0.0, 0.0, -5.0));

        camera.pan(2.0, 1.0);
        assert!((camera.position - Vector3::new(-2.0, -1.0, -5.0)).magnitude() < EPS);
    }

    #[test]
    fn test_view_projection_centres_forward_point() {
        let mut camera = FreeCamera::default();
        camera.update_view_proj();
        let ahead = camera.position + camera.forward() * 10.0;
        let clip = camera.build_view_projection_matrix() * ahead.extend(1.0);
        assert!((clip.x / clip.w).abs() < 1e-9);
        assert!((clip.y / clip.w).abs() < 1e-9);
        let depth = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&depth));
        assert_eq!(camera.uniform.view_position[3], 1.0);
    }
}
