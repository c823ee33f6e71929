use std::collections::VecDeque;
use std::path::Path;

use cgmath::Vector3;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton},
};

use crate::{
    config::EditorConfig,
    error::Result,
    gfx::{
        camera::{CameraManager, DragButtons, DragStep, FreeCamera, PointerRequest},
        rendering::{Frame, SceneRenderer},
        scene::{Attribute, PrimitiveKind, Scene, SceneChange, SceneObject},
    },
    io::vox::{self, DecodeReport},
};

/// Notifications for the shell hosting the editor, drained with
/// [`Editor::drain_events`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorEvent {
    /// The scene was mutated. Fired once per mutation.
    SceneChanged(SceneChange),
    /// A drag moved or turned the camera.
    CameraMoved,
    /// Pointer position for the status bar, fired on every move.
    PointerMoved { x: f64, y: f64 },
    /// The input layer should warp the cursor here.
    RecenterPointer(PhysicalPosition<f64>),
    /// The cursor should be hidden (`true`) or shown again (`false`).
    CursorHidden(bool),
}

/// One editing session: the scene, the camera looking at it and the
/// renderer drawing it.
///
/// Commands take the selection as `Option<usize>`; `None` means nothing is
/// selected and the command does nothing. Every command that changes what
/// is on screen latches a redraw request.
pub struct Editor {
    config: EditorConfig,
    scene: Scene,
    camera: CameraManager,
    renderer: SceneRenderer,
    events: VecDeque<EditorEvent>,
    cursor_hidden: bool,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        let (width, height) = config.viewport;
        log::info!("Starting editor with a {}x{} viewport", width, height);

        Self {
            scene: Scene::with_default_color(config.default_color),
            camera: CameraManager::from_config(&config.camera, PhysicalSize::new(width, height)),
            renderer: SceneRenderer::new(config.render),
            events: VecDeque::new(),
            cursor_hidden: false,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &FreeCamera {
        &self.camera.camera
    }

    pub fn renderer(&self) -> &SceneRenderer {
        &self.renderer
    }

    /// Maps a list-widget row to a selection; negative rows mean none.
    pub fn selection_from_row(row: i32) -> Option<usize> {
        usize::try_from(row).ok()
    }

    /// Places a new default object of `kind` and returns its index.
    pub fn create_object(&mut self, kind: PrimitiveKind) -> usize {
        let index = self.scene.create(kind);
        self.scene_changed();
        index
    }

    /// Deletes the selected object. Later objects shift down by one.
    pub fn remove_object(&mut self, selection: Option<usize>) -> Result<Option<SceneObject>> {
        let Some(index) = selection else {
            return Ok(None);
        };
        let removed = self.scene.remove(index)?;
        self.scene_changed();
        Ok(Some(removed))
    }

    pub fn set_translate(&mut self, selection: Option<usize>, value: Vector3<f64>) -> Result<()> {
        self.set_attribute(selection, Attribute::Translate, value)
    }

    /// Rotation in degrees about X, Y then Z.
    pub fn set_rotate(&mut self, selection: Option<usize>, value: Vector3<f64>) -> Result<()> {
        self.set_attribute(selection, Attribute::Rotate, value)
    }

    pub fn set_scale(&mut self, selection: Option<usize>, value: Vector3<f64>) -> Result<()> {
        self.set_attribute(selection, Attribute::Scale, value)
    }

    pub fn set_color(&mut self, selection: Option<usize>, value: Vector3<f64>) -> Result<()> {
        self.set_attribute(selection, Attribute::Color, value)
    }

    pub fn set_attribute(
        &mut self,
        selection: Option<usize>,
        attribute: Attribute,
        value: Vector3<f64>,
    ) -> Result<()> {
        let Some(index) = selection else {
            return Ok(());
        };
        self.scene.set_attribute(index, attribute, value)?;
        self.scene_changed();
        Ok(())
    }

    /// The selected object's kind and attribute vectors.
    pub fn query_object(&self, selection: Option<usize>) -> Result<Option<SceneObject>> {
        selection.map(|index| self.scene.get(index)).transpose()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        vox::save(&self.scene, path)
    }

    /// Appends the objects stored at `path` to the scene.
    ///
    /// Call [`Editor::new_project`] first to replace the scene instead.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<DecodeReport> {
        let report = vox::load(&mut self.scene, path)?;
        self.scene_changed();
        Ok(report)
    }

    /// Empties the scene and puts the camera back at its start pose.
    pub fn new_project(&mut self) {
        self.scene.clear();
        self.camera.camera.reset_to(&self.config.camera);
        self.events.push_back(EditorEvent::CameraMoved);
        self.scene_changed();
        log::info!("Started a new project");
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.viewport = (width, height);
        self.camera.resize(PhysicalSize::new(width, height));
        self.renderer.request_redraw();
    }

    /// Handles a pointer button press or release.
    pub fn mouse_input(&mut self, button: MouseButton, state: ElementState) {
        match self.camera.process_mouse_button(button, state) {
            Some(PointerRequest::Grab { recenter }) => {
                if !self.cursor_hidden {
                    self.cursor_hidden = true;
                    self.events.push_back(EditorEvent::CursorHidden(true));
                }
                self.events.push_back(EditorEvent::RecenterPointer(recenter));
            }
            Some(PointerRequest::Release) => {
                if self.cursor_hidden {
                    self.cursor_hidden = false;
                    self.events.push_back(EditorEvent::CursorHidden(false));
                }
            }
            None => {}
        }
    }

    /// Handles an absolute cursor position in physical pixels.
    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) -> DragStep {
        self.events.push_back(EditorEvent::PointerMoved {
            x: position.x,
            y: position.y,
        });
        let step = self.camera.process_cursor_moved(position);
        self.camera_stepped(&step);
        step
    }

    /// Applies a drag delta already normalised by the viewport size.
    ///
    /// With no buttons held the camera stays put; the returned step still
    /// carries the delta.
    pub fn drag(&mut self, dx: f64, dy: f64, buttons: DragButtons) -> DragStep {
        let step = self.camera.drag(dx, dy, buttons);
        self.camera_stepped(&step);
        step
    }

    /// Hands over every queued notification, oldest first.
    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        self.events.drain(..).collect()
    }

    /// Returns whether the surface needs repainting and clears the request.
    pub fn take_redraw_request(&mut self) -> bool {
        self.renderer.take_redraw_request()
    }

    /// Builds the current frame. Does not change any state.
    pub fn render_frame(&self) -> Frame {
        self.renderer.render_frame(&self.scene, &self.camera.camera)
    }

    fn scene_changed(&mut self) {
        let changes = self.scene.take_changes();
        if changes.is_empty() {
            return;
        }
        self.events
            .extend(changes.into_iter().map(EditorEvent::SceneChanged));
        self.renderer.request_redraw();
    }

    fn camera_stepped(&mut self, step: &DragStep) {
        if !step.moved_camera() {
            return;
        }
        self.events.push_back(EditorEvent::CameraMoved);
        if let Some(center) = step.recenter {
            self.events.push_back(EditorEvent::RecenterPointer(center));
        }
        self.renderer.request_redraw();
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SceneError;
    use cgmath::InnerSpace;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn editor() -> Editor {
        init_logger();
        let mut editor = Editor::default();
        editor.take_redraw_request();
        editor
    }

    #[test]
    fn test_first_frame_is_requested() {
        let mut editor = Editor::default();
        assert!(editor.take_redraw_request());
        assert!(!editor.take_redraw_request());
    }

    #[test]
    fn test_each_mutation_fires_one_change_and_a_redraw() {
        let mut editor = editor();

        let index = editor.create_object(PrimitiveKind::Cube);
        assert_eq!(index, 0);
        assert!(editor.take_redraw_request());
        assert_eq!(
            editor.drain_events(),
            vec![EditorEvent::SceneChanged(SceneChange::ObjectAdded {
                index: 0,
                kind: PrimitiveKind::Cube
            })]
        );

        editor
            .set_color(Some(0), Vector3::new(1.0, 0.0, 0.0))
            .unwrap();
        assert!(editor.take_redraw_request());
        assert_eq!(
            editor.drain_events(),
            vec![EditorEvent::SceneChanged(SceneChange::AttributeChanged {
                index: 0,
                attribute: Attribute::Color
            })]
        );

        let removed = editor.remove_object(Some(0)).unwrap();
        assert_eq!(removed.map(|o| o.kind), Some(PrimitiveKind::Cube));
        assert!(editor.take_redraw_request());
        assert_eq!(editor.drain_events().len(), 1);
        // The editor leaves nothing queued on its scene
        assert!(!editor.scene().has_pending_changes());
    }

    #[test]
    fn test_no_selection_is_ignored() {
        let mut editor = editor();
        editor.create_object(PrimitiveKind::Plane);
        editor.drain_events();
        editor.take_redraw_request();

        let none = Editor::selection_from_row(-1);
        assert_eq!(none, None);
        assert_eq!(editor.remove_object(none).unwrap(), None);
        editor.set_scale(none, Vector3::new(3.0, 3.0, 3.0)).unwrap();
        assert_eq!(editor.query_object(none).unwrap(), None);

        assert_eq!(editor.scene().len(), 1);
        assert_eq!(editor.scene().get(0).unwrap().scale, Vector3::new(1.0, 1.0, 1.0));
        assert!(editor.drain_events().is_empty());
        assert!(!editor.take_redraw_request());
    }

    #[test]
    fn test_out_of_range_is_rejected_without_side_effects() {
        let mut editor = editor();
        for _ in 0..3 {
            editor.create_object(PrimitiveKind::Sphere);
        }
        editor.drain_events();
        editor.take_redraw_request();
        let before = editor.scene().objects().to_vec();

        let err = editor
            .set_translate(Some(5), Vector3::new(1.0, 1.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, SceneError::IndexOutOfRange { index: 5, len: 3 }));
        assert!(editor.query_object(Some(3)).is_err());
        assert!(editor.remove_object(Some(3)).is_err());

        assert_eq!(editor.scene().objects(), before.as_slice());
        assert!(editor.drain_events().is_empty());
        assert!(!editor.take_redraw_request());
    }

    #[test]
    fn test_query_returns_all_attributes() {
        let mut editor = editor();
        editor.create_object(PrimitiveKind::Wedge);
        editor
            .set_translate(Some(0), Vector3::new(1.0, 2.0, 3.0))
            .unwrap();
        editor.set_rotate(Some(0), Vector3::new(0.0, 90.0, 0.0)).unwrap();

        let info = editor.query_object(Some(0)).unwrap().unwrap();
        assert_eq!(info.kind, PrimitiveKind::Wedge);
        assert_eq!(info.translate, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(info.rotate, Vector3::new(0.0, 90.0, 0.0));
        assert_eq!(info.scale, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(info.color, editor.config().default_color);
    }

    #[test]
    fn test_drag_moves_camera_and_requests_recenter() {
        let mut editor = editor();
        let start = editor.camera().position;
        let forward = editor.camera().forward();

        let step = editor.drag(0.0, 0.1, DragButtons::BOTH);
        assert!(step.moved_camera());

        let moved = editor.camera().position - start;
        let expected = -forward * editor.config().camera.move_speed * 0.1;
        assert!((moved - expected).magnitude() < 1e-9);
        assert!(editor.take_redraw_request());
        assert_eq!(
            editor.drain_events(),
            vec![
                EditorEvent::CameraMoved,
                EditorEvent::RecenterPointer(PhysicalPosition::new(600.0, 400.0)),
            ]
        );
    }

    #[test]
    fn test_drag_without_buttons_leaves_camera() {
        let mut editor = editor();
        let before = *editor.camera();

        let step = editor.drag(0.3, -0.2, DragButtons::NONE);
        assert_eq!(step.delta, (0.3, -0.2));
        assert!(!step.moved_camera());
        assert_eq!(editor.camera().position, before.position);
        assert_eq!(editor.camera().yaw(), before.yaw());
        assert!(editor.drain_events().is_empty());
        assert!(!editor.take_redraw_request());
    }

    #[test]
    fn test_pointer_grab_cycle() {
        let mut editor = editor();

        editor.mouse_input(MouseButton::Right, ElementState::Pressed);
        assert_eq!(
            editor.drain_events(),
            vec![
                EditorEvent::CursorHidden(true),
                EditorEvent::RecenterPointer(PhysicalPosition::new(600.0, 400.0)),
            ]
        );

        let yaw = editor.camera().yaw();
        editor.cursor_moved(PhysicalPosition::new(660.0, 400.0));
        assert_ne!(editor.camera().yaw(), yaw);
        let events = editor.drain_events();
        assert_eq!(events[0], EditorEvent::PointerMoved { x: 660.0, y: 400.0 });
        assert!(events.contains(&EditorEvent::CameraMoved));

        // A second button keeps the cursor hidden
        editor.mouse_input(MouseButton::Left, ElementState::Pressed);
        editor.mouse_input(MouseButton::Left, ElementState::Released);
        assert!(!editor
            .drain_events()
            .contains(&EditorEvent::CursorHidden(false)));

        editor.mouse_input(MouseButton::Right, ElementState::Released);
        assert_eq!(editor.drain_events(), vec![EditorEvent::CursorHidden(false)]);

        // Moving with no buttons only reports the position
        editor.cursor_moved(PhysicalPosition::new(10.0, 20.0));
        assert_eq!(
            editor.drain_events(),
            vec![EditorEvent::PointerMoved { x: 10.0, y: 20.0 }]
        );
    }

    #[test]
    fn test_recentre_echo_does_not_redraw() {
        let mut editor = editor();
        editor.mouse_input(MouseButton::Right, ElementState::Pressed);
        editor.drain_events();
        let before = *editor.camera();

        // The shell's warp to the centre comes back as a move
        let step = editor.cursor_moved(PhysicalPosition::new(600.0, 400.0));
        assert!(!step.moved_camera());
        assert_eq!(
            editor.drain_events(),
            vec![EditorEvent::PointerMoved { x: 600.0, y: 400.0 }]
        );
        assert!(!editor.take_redraw_request());
        assert_eq!(editor.camera().yaw(), before.yaw());
        assert_eq!(editor.camera().pitch(), before.pitch());
    }

    #[test]
    fn test_resize_changes_drag_normalisation() {
        let mut editor = editor();
        editor.resize(400, 200);
        assert!(editor.take_redraw_request());
        assert!((editor.camera().aspect - 2.0).abs() < 1e-12);

        editor.mouse_input(MouseButton::Left, ElementState::Pressed);
        assert!(editor
            .drain_events()
            .contains(&EditorEvent::RecenterPointer(PhysicalPosition::new(200.0, 100.0))));

        // A zero-sized viewport (minimised window) is ignored
        editor.resize(0, 0);
        assert_eq!(editor.config().viewport, (400, 200));
    }

    #[test]
    fn test_new_project_resets_scene_and_camera() {
        let mut editor = editor();
        editor.create_object(PrimitiveKind::Cone);
        editor.drag(0.2, 0.2, DragButtons::PRIMARY);
        editor.drain_events();

        editor.new_project();
        assert!(editor.scene().is_empty());
        assert_eq!(editor.camera().position, editor.config().camera.position);
        let events = editor.drain_events();
        assert!(events.contains(&EditorEvent::SceneChanged(SceneChange::Cleared)));
        assert!(events.contains(&EditorEvent::CameraMoved));
    }

    #[test]
    fn test_save_and_load_session() {
        let path = std::env::temp_dir().join(format!(
            "voxel_playground_{}_editor.{}",
            std::process::id(),
            vox::FILE_EXTENSION
        ));

        let mut editor = editor();
        editor.create_object(PrimitiveKind::Pyramid);
        editor.create_object(PrimitiveKind::Cylinder);
        editor
            .set_scale(Some(1), Vector3::new(0.5, 2.0, 0.5))
            .unwrap();
        editor.save(&path).unwrap();
        let saved = editor.scene().objects().to_vec();

        editor.new_project();
        editor.drain_events();
        editor.take_redraw_request();

        let report = editor.load(&path).unwrap();
        assert!(report.is_clean());
        assert_eq!(editor.scene().objects(), saved.as_slice());
        assert!(editor.take_redraw_request());
        assert_eq!(
            editor.drain_events(),
            vec![EditorEvent::SceneChanged(SceneChange::ObjectsLoaded {
                first: 0,
                count: 2
            })]
        );

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_failed_load_changes_nothing() {
        let mut editor = editor();
        editor.create_object(PrimitiveKind::Cube);
        editor.drain_events();
        editor.take_redraw_request();
        let camera = *editor.camera();

        let path = std::env::temp_dir().join("voxel_playground_missing_dir/none.vox");
        assert!(matches!(
            editor.load(&path),
            Err(SceneError::FileUnavailable { .. })
        ));
        assert_eq!(editor.scene().len(), 1);
        assert_eq!(editor.camera().position, camera.position);
        assert!(editor.drain_events().is_empty());
        assert!(!editor.take_redraw_request());
    }

    #[test]
    fn test_render_frame_reflects_scene() {
        let mut editor = editor();
        editor.create_object(PrimitiveKind::Cube);
        editor.create_object(PrimitiveKind::Sphere);

        let frame = editor.render_frame();
        assert_eq!(frame.items.len(), 2);
        assert_eq!(frame.items[1].kind, PrimitiveKind::Sphere);
        assert_eq!(frame, editor.render_frame());
    }
}
