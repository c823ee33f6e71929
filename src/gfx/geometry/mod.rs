//! # Procedural Geometry Generation
//!
//! Meshes for the seven placeable primitives, generated in a local frame
//! where each solid fills roughly the unit cube centred at the origin
//! (−0.5..0.5 on every axis). The scene object's model matrix moves them into
//! the world.
//!
//! Every face owns its vertices and all of them carry the face normal, so
//! the meshes shade flat: one uniform colour per face, no interpolation.
//!
//! ## Usage
//!
//! ```rust
//! use voxel_playground::gfx::geometry::{generate_cube, generate_sphere};
//!
//! let cube = generate_cube();
//! assert_eq!(cube.face_count(), 6);
//!
//! let sphere = generate_sphere(16, 16);
//! assert_eq!(sphere.face_count(), 16 * 16);
//! ```

pub mod primitives;

pub use primitives::*;

use cgmath::{InnerSpace, Vector3, Zero};

use crate::gfx::scene::vertex::Vertex3D;

/// A flat-shaded triangle mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Unit face normal repeated for every vertex of the face
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise seen from outside)
    pub indices: Vec<u32>,
    faces: usize,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
            faces: 0,
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of planar faces pushed with [`GeometryData::push_face`].
    pub fn face_count(&self) -> usize {
        self.faces
    }

    /// Adds a convex planar polygon with the given outward normal.
    ///
    /// The polygon is fan-triangulated. If its winding disagrees with
    /// `normal` the triangles are flipped so they stay counter-clockwise
    /// when viewed from the side the normal points to.
    pub fn push_face(&mut self, polygon: &[[f32; 3]], normal: [f32; 3]) {
        if polygon.len() < 3 {
            return;
        }

        let normal = Vector3::from(normal);
        let normal = if normal.is_zero() {
            newell_normal(polygon)
        } else {
            normal.normalize()
        };
        let flip = newell_normal(polygon).dot(normal) < 0.0;

        let base = self.vertices.len() as u32;
        for position in polygon {
            self.vertices.push(*position);
            self.normals.push(normal.into());
        }

        for i in 1..polygon.len() as u32 - 1 {
            if flip {
                self.indices.extend_from_slice(&[base, base + i + 1, base + i]);
            } else {
                self.indices.extend_from_slice(&[base, base + i, base + i + 1]);
            }
        }
        self.faces += 1;
    }

    /// Adds a polygon whose normal is computed from its vertices and turned
    /// to point away from `interior`.
    pub fn push_face_facing_away(&mut self, polygon: &[[f32; 3]], interior: [f32; 3]) {
        let mut normal = newell_normal(polygon);
        let center = polygon_center(polygon);
        if normal.dot(center - Vector3::from(interior)) < 0.0 {
            normal = -normal;
        }
        self.push_face(polygon, normal.into());
    }

    /// Interleaves positions and normals into the GPU vertex format.
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .zip(&self.normals)
            .map(|(position, normal)| Vertex3D {
                position: *position,
                normal: *normal,
            })
            .collect()
    }

    /// Axis-aligned bounds as `(min, max)`.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = *self.vertices.first()?;
        let mut min = first;
        let mut max = first;
        for v in &self.vertices {
            for axis in 0..3 {
                min[axis] = min[axis].min(v[axis]);
                max[axis] = max[axis].max(v[axis]);
            }
        }
        Some((min, max))
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}

/// Unit normal of a planar polygon from its winding (right-hand rule).
fn newell_normal(polygon: &[[f32; 3]]) -> Vector3<f32> {
    let mut normal = Vector3::zero();
    for (i, current) in polygon.iter().enumerate() {
        let next = polygon[(i + 1) % polygon.len()];
        normal.x += (current[1] - next[1]) * (current[2] + next[2]);
        normal.y += (current[2] - next[2]) * (current[0] + next[0]);
        normal.z += (current[0] - next[0]) * (current[1] + next[1]);
    }
    if normal.is_zero() {
        normal
    } else {
        normal.normalize()
    }
}

fn polygon_center(polygon: &[[f32; 3]]) -> Vector3<f32> {
    let sum = polygon
        .iter()
        .fold(Vector3::zero(), |acc, p| acc + Vector3::from(*p));
    sum / polygon.len() as f32
}
