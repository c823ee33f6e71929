use std::f64::consts::PI;

use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton},
};

use super::free_camera::FreeCamera;

/// Which pointer buttons are held during a drag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragButtons {
    pub primary: bool,
    pub secondary: bool,
}

impl DragButtons {
    pub const NONE: Self = Self::new(false, false);
    pub const PRIMARY: Self = Self::new(true, false);
    pub const SECONDARY: Self = Self::new(false, true);
    pub const BOTH: Self = Self::new(true, true);

    pub const fn new(primary: bool, secondary: bool) -> Self {
        Self { primary, secondary }
    }

    /// Bit 0 is the primary button, bit 1 the secondary one.
    pub fn from_mask(mask: u8) -> Self {
        Self::new(mask & 0b01 != 0, mask & 0b10 != 0)
    }

    pub fn any(self) -> bool {
        self.primary || self.secondary
    }

    /// The drag interpretation selected by this combination.
    pub fn mode(self) -> Option<DragMode> {
        match (self.primary, self.secondary) {
            (true, true) => Some(DragMode::Dolly),
            (false, true) => Some(DragMode::Look),
            (true, false) => Some(DragMode::Pan),
            (false, false) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Both buttons: move along the view direction.
    Dolly,
    /// Secondary button: change yaw and pitch.
    Look,
    /// Primary button: strafe and rise/fall.
    Pan,
}

/// Something the input layer must do with the OS cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerRequest {
    /// Hide the cursor and warp it to `recenter`.
    Grab { recenter: PhysicalPosition<f64> },
    /// Show the cursor again.
    Release,
}

/// Result of consuming one pointer movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStep {
    /// Movement since the previous step, as a fraction of the viewport.
    pub delta: (f64, f64),
    /// Mode that was applied; `None` if the camera did not move.
    pub mode: Option<DragMode>,
    /// Where the input layer must warp the cursor, if it must.
    pub recenter: Option<PhysicalPosition<f64>>,
}

impl DragStep {
    pub fn moved_camera(&self) -> bool {
        self.mode.is_some()
    }
}

/// Turns pointer drags into free-camera motion.
///
/// Deltas are always measured from the previous step. After every step that
/// moves the camera the reference point is reset to the viewport centre and
/// the input layer is asked to warp the cursor there, so a drag never runs
/// into the screen edge.
pub struct CameraController {
    buttons: DragButtons,
    anchor: Option<PhysicalPosition<f64>>,
    viewport: PhysicalSize<u32>,
}

impl CameraController {
    pub fn new(viewport: PhysicalSize<u32>) -> Self {
        Self {
            buttons: DragButtons::NONE,
            anchor: None,
            viewport,
        }
    }

    pub fn resize(&mut self, viewport: PhysicalSize<u32>) {
        self.viewport = viewport;
    }

    pub fn viewport_center(&self) -> PhysicalPosition<f64> {
        PhysicalPosition::new(
            self.viewport.width as f64 / 2.0,
            self.viewport.height as f64 / 2.0,
        )
    }

    pub fn buttons(&self) -> DragButtons {
        self.buttons
    }

    /// Returns the mode a drag would use right now
    pub fn active_mode(&self) -> Option<DragMode> {
        self.buttons.mode()
    }

    pub fn process_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
    ) -> Option<PointerRequest> {
        let pressed = state == ElementState::Pressed;
        match button {
            MouseButton::Left => self.buttons.primary = pressed,
            MouseButton::Right => self.buttons.secondary = pressed,
            _ => return None,
        }

        if pressed {
            let center = self.viewport_center();
            self.anchor = Some(center);
            Some(PointerRequest::Grab { recenter: center })
        } else if !self.buttons.any() {
            Some(PointerRequest::Release)
        } else {
            None
        }
    }

    /// Consumes an absolute cursor position using the buttons currently held.
    pub fn process_cursor_moved(
        &mut self,
        position: PhysicalPosition<f64>,
        camera: &mut FreeCamera,
    ) -> DragStep {
        let anchor = self.anchor.unwrap_or(position);
        let dx = (position.x - anchor.x) / self.viewport.width.max(1) as f64;
        let dy = (position.y - anchor.y) / self.viewport.height.max(1) as f64;

        let step = self.apply_drag(camera, dx, dy, self.buttons);
        if step.recenter.is_none() {
            self.anchor = Some(position);
        }
        step
    }

    /// Applies a viewport-normalised delta for the given button combination.
    pub fn apply_drag(
        &mut self,
        camera: &mut FreeCamera,
        dx: f64,
        dy: f64,
        buttons: DragButtons,
    ) -> DragStep {
        // A zero delta is the echo of our own recentre warp, not a drag
        let mode = if dx == 0.0 && dy == 0.0 {
            None
        } else {
            buttons.mode()
        };
        match mode {
            Some(DragMode::Dolly) => {
                camera.dolly(camera.move_speed * dy);
            }
            Some(DragMode::Look) => {
                camera.add_yaw(-camera.rotate_speed * (dx * PI / 180.0));
                camera.add_pitch(-camera.rotate_speed * (dy * PI / 180.0));
            }
            Some(DragMode::Pan) => {
                camera.pan(camera.move_speed * dx, camera.move_speed * dy);
            }
            None => {}
        }

        let recenter = mode.map(|_| {
            let center = self.viewport_center();
            self.anchor = Some(center);
            center
        });

        DragStep {
            delta: (dx, dy),
            mode,
            recenter,
        }
    }
}
