use cgmath::{InnerSpace, Matrix, Matrix3, Matrix4, SquareMatrix, Vector3, Zero};

use crate::config::RenderSettings;
use crate::gfx::{
    camera::{Camera, CameraUniform, FreeCamera},
    geometry::{generate_floor_grid, generate_primitive, GeometryData},
    scene::{PrimitiveKind, Scene, SceneObject, Vertex3D},
};

/// One object ready to rasterize.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    /// Position of the object in the scene.
    pub index: usize,
    pub kind: PrimitiveKind,
    pub model: Matrix4<f64>,
    /// Unlit object colour.
    pub color: [f32; 3],
    /// World-space vertices with world-space face normals.
    pub vertices: Vec<Vertex3D>,
    pub indices: Vec<u32>,
    /// Lit colour of each triangle; constant across a face.
    pub triangle_colors: Vec<[f32; 3]>,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub clear_color: [f32; 3],
    pub view_proj: Matrix4<f64>,
    pub camera_uniform: CameraUniform,
    pub grid_lines: Vec<[[f32; 3]; 2]>,
    pub grid_color: [f32; 3],
    pub items: Vec<DrawItem>,
}

impl Frame {
    pub fn triangle_count(&self) -> usize {
        self.items.iter().map(|item| item.indices.len() / 3).sum()
    }
}

/// Turns the scene and camera into drawable geometry.
///
/// Primitive meshes are generated once and reused every frame. Rendering is
/// read-only over the scene and camera, so calling [`SceneRenderer::render_frame`]
/// repeatedly without mutations yields identical frames.
pub struct SceneRenderer {
    settings: RenderSettings,
    meshes: Vec<GeometryData>,
    grid: Vec<[[f32; 3]; 2]>,
    redraw_requested: bool,
}

impl SceneRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        let meshes = PrimitiveKind::ALL
            .iter()
            .map(|&kind| generate_primitive(kind, &settings))
            .collect();

        Self {
            settings,
            meshes,
            grid: generate_floor_grid(settings.grid_half_extent),
            // The first frame always has to be drawn
            redraw_requested: true,
        }
    }

    /// Local-space mesh shared by every object of `kind`.
    pub fn mesh(&self, kind: PrimitiveKind) -> &GeometryData {
        &self.meshes[kind as usize]
    }

    /// Marks the surface as stale. Repeated requests before the next
    /// [`SceneRenderer::take_redraw_request`] collapse into one.
    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    pub fn is_redraw_requested(&self) -> bool {
        self.redraw_requested
    }

    /// Returns whether a redraw was pending and clears the latch.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::replace(&mut self.redraw_requested, false)
    }

    pub fn render_frame(&self, scene: &Scene, camera: &FreeCamera) -> Frame {
        let view_proj = camera.build_view_projection_matrix();
        let mut camera = *camera;
        camera.update_view_proj();

        let items = scene
            .objects()
            .iter()
            .enumerate()
            .map(|(index, object)| self.draw_item(index, object))
            .collect();

        Frame {
            clear_color: self.settings.clear_color,
            view_proj,
            camera_uniform: camera.uniform,
            grid_lines: self.grid.clone(),
            grid_color: self.settings.grid_color,
            items,
        }
    }

    fn draw_item(&self, index: usize, object: &SceneObject) -> DrawItem {
        let mesh = self.mesh(object.kind);
        let model = object.model_matrix();
        let normal_matrix = normal_matrix(&model);
        let color = [
            object.color.x as f32,
            object.color.y as f32,
            object.color.z as f32,
        ];

        let vertices: Vec<Vertex3D> = mesh
            .vertices
            .iter()
            .zip(&mesh.normals)
            .map(|(position, normal)| {
                let p = Vector3::new(position[0] as f64, position[1] as f64, position[2] as f64);
                let world = (model * p.extend(1.0)).truncate();
                let n = Vector3::new(normal[0] as f64, normal[1] as f64, normal[2] as f64);
                let mut world_normal = normal_matrix * n;
                if world_normal.is_zero() {
                    world_normal = n;
                }
                let world_normal = world_normal.normalize();
                Vertex3D {
                    position: [world.x as f32, world.y as f32, world.z as f32],
                    normal: [
                        world_normal.x as f32,
                        world_normal.y as f32,
                        world_normal.z as f32,
                    ],
                }
            })
            .collect();

        let light = self.light_direction(object.translate);
        let triangle_colors = mesh
            .indices
            .chunks(3)
            .map(|tri| {
                let normal = vertices[tri[0] as usize].normal;
                self.shade(color, normal, light)
            })
            .collect();

        DrawItem {
            index,
            kind: object.kind,
            model,
            color,
            vertices,
            indices: mesh.indices.clone(),
            triangle_colors,
        }
    }

    /// Direction from the object's origin toward the positional light.
    ///
    /// Using one direction per object keeps every face a single colour.
    fn light_direction(&self, origin: Vector3<f64>) -> Vector3<f64> {
        let [x, y, z] = self.settings.light_position;
        let to_light = Vector3::new(x as f64, y as f64, z as f64) - origin;
        if to_light.is_zero() {
            Vector3::unit_y()
        } else {
            to_light.normalize()
        }
    }

    /// Ambient plus Lambert diffuse, clamped to [0, 1].
    fn shade(&self, color: [f32; 3], normal: [f32; 3], light: Vector3<f64>) -> [f32; 3] {
        let n = Vector3::new(normal[0] as f64, normal[1] as f64, normal[2] as f64);
        let lambert = n.dot(light).max(0.0) as f32;
        let intensity = (self.settings.ambient + self.settings.light_diffuse * lambert).min(1.0);
        color.map(|c| (c * intensity).clamp(0.0, 1.0))
    }
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new(RenderSettings::default())
    }
}

/// Inverse-transpose of the linear part of `model`.
///
/// A zero scale makes the model singular; the linear part is used as is in
/// that case and degenerate normals fall back to the local ones.
fn normal_matrix(model: &Matrix4<f64>) -> Matrix3<f64> {
    let linear = Matrix3::from_cols(model.x.truncate(), model.y.truncate(), model.z.truncate());
    match linear.invert() {
        Some(inverse) => inverse.transpose(),
        None => linear,
    }
}
