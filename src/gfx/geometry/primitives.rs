//! # Primitive Shape Generation
//!
//! One generator per [`PrimitiveKind`]. All shapes fit the unit cube centred
//! at the origin and come with outward-facing flat normals.

use std::f32::consts::PI;

use super::GeometryData;
use crate::config::RenderSettings;
use crate::gfx::scene::object::PrimitiveKind;

const H: f32 = 0.5;

/// Generate the mesh for `kind` using the resolutions in `settings`.
pub fn generate_primitive(kind: PrimitiveKind, settings: &RenderSettings) -> GeometryData {
    match kind {
        PrimitiveKind::Plane => generate_plane(),
        PrimitiveKind::Cube => generate_cube(),
        PrimitiveKind::Sphere => generate_sphere(settings.sphere_slices, settings.sphere_stacks),
        PrimitiveKind::Cone => generate_cone(settings.circle_segments),
        PrimitiveKind::Cylinder => generate_cylinder(settings.circle_segments),
        PrimitiveKind::Pyramid => generate_pyramid(),
        PrimitiveKind::Wedge => generate_wedge(),
    }
}

/// Single quad at y = 0 spanning X and Z, normal +Y.
pub fn generate_plane() -> GeometryData {
    let mut data = GeometryData::new();
    data.push_face(
        &[[H, 0.0, -H], [H, 0.0, H], [-H, 0.0, H], [-H, 0.0, -H]],
        [0.0, 1.0, 0.0],
    );
    data
}

/// Unit cube centred at the origin: six axis-aligned quads.
pub fn generate_cube() -> GeometryData {
    let mut data = GeometryData::new();

    // Front
    data.push_face(
        &[[H, -H, -H], [H, H, -H], [-H, H, -H], [-H, -H, -H]],
        [0.0, 0.0, -1.0],
    );
    // Back
    data.push_face(
        &[[H, -H, H], [H, H, H], [-H, H, H], [-H, -H, H]],
        [0.0, 0.0, 1.0],
    );
    // Right
    data.push_face(
        &[[H, -H, -H], [H, H, -H], [H, H, H], [H, -H, H]],
        [1.0, 0.0, 0.0],
    );
    // Left
    data.push_face(
        &[[-H, -H, H], [-H, H, H], [-H, H, -H], [-H, -H, -H]],
        [-1.0, 0.0, 0.0],
    );
    // Top
    data.push_face(
        &[[H, H, H], [H, H, -H], [-H, H, -H], [-H, H, H]],
        [0.0, 1.0, 0.0],
    );
    push_square_base(&mut data);

    data
}

/// Generate a UV sphere of radius 0.5 with its poles on the Z axis
///
/// # Arguments
/// * `longitude_segments` - Number of slices around the axis
/// * `latitude_segments` - Number of stacks from pole to pole
///
/// Bands touching a pole are triangles, every other facet is a quad.
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    let point = |lat: u32, long: u32| -> [f32; 3] {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
        [
            H * theta.sin() * phi.cos(),
            H * theta.sin() * phi.sin(),
            H * theta.cos(),
        ]
    };

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let a = point(lat, long);
            let b = point(lat, long + 1);
            let c = point(lat + 1, long + 1);
            let d = point(lat + 1, long);

            if lat == 0 {
                data.push_face_facing_away(&[a, c, d], [0.0; 3]);
            } else if lat == lat_segs - 1 {
                data.push_face_facing_away(&[a, b, d], [0.0; 3]);
            } else {
                data.push_face_facing_away(&[a, b, c, d], [0.0; 3]);
            }
        }
    }

    data
}

/// Cone with its apex at z = 0.5 and a base circle of radius 0.5 at z = −0.5.
pub fn generate_cone(segments: u32) -> GeometryData {
    let mut data = GeometryData::new();
    let ring = circle(segments, -H);
    let apex = [0.0, 0.0, H];

    for (i, current) in ring.iter().enumerate() {
        let next = ring[(i + 1) % ring.len()];
        data.push_face_facing_away(&[*current, next, apex], [0.0; 3]);
    }
    push_cap(&mut data, &ring, [0.0, 0.0, -1.0]);

    data
}

/// Cylinder of radius 0.5 from z = −0.5 to z = 0.5 with both caps.
pub fn generate_cylinder(segments: u32) -> GeometryData {
    let mut data = GeometryData::new();
    let bottom = circle(segments, -H);
    let top = circle(segments, H);

    for i in 0..bottom.len() {
        let next = (i + 1) % bottom.len();
        data.push_face_facing_away(&[bottom[i], bottom[next], top[next], top[i]], [0.0; 3]);
    }
    push_cap(&mut data, &top, [0.0, 0.0, 1.0]);
    push_cap(&mut data, &bottom, [0.0, 0.0, -1.0]);

    data
}

/// Square base (the cube's bottom) with four sides meeting at (0, 0.5, 0).
pub fn generate_pyramid() -> GeometryData {
    let mut data = GeometryData::new();
    push_square_base(&mut data);

    let apex = [0.0, H, 0.0];
    let corners = [[H, -H, -H], [H, -H, H], [-H, -H, H], [-H, -H, -H]];
    for i in 0..corners.len() {
        let next = corners[(i + 1) % corners.len()];
        data.push_face_facing_away(&[corners[i], next, apex], [0.0; 3]);
    }

    data
}

/// Right-triangular prism: bottom, a vertical face at x = 0.5, a slant from
/// the top of that face down to the bottom-left edge, and two end caps.
pub fn generate_wedge() -> GeometryData {
    let mut data = GeometryData::new();
    push_square_base(&mut data);

    // Right
    data.push_face(
        &[[H, -H, -H], [H, H, -H], [H, H, H], [H, -H, H]],
        [1.0, 0.0, 0.0],
    );
    // Slant
    data.push_face(
        &[[H, H, -H], [H, H, H], [-H, -H, H], [-H, -H, -H]],
        [-1.0, 1.0, 0.0],
    );
    // End caps
    data.push_face(&[[H, -H, H], [H, H, H], [-H, -H, H]], [0.0, 0.0, 1.0]);
    data.push_face(&[[H, -H, -H], [H, H, -H], [-H, -H, -H]], [0.0, 0.0, -1.0]);

    data
}

/// Floor grid lines on y = 0, one unit apart, covering
/// `-half_extent..=half_extent` on both X and Z.
pub fn generate_floor_grid(half_extent: i32) -> Vec<[[f32; 3]; 2]> {
    let half_extent = half_extent.max(0);
    let reach = half_extent as f32;

    (-half_extent..=half_extent)
        .flat_map(|i| {
            let i = i as f32;
            [
                [[i, 0.0, reach], [i, 0.0, -reach]],
                [[reach, 0.0, i], [-reach, 0.0, i]],
            ]
        })
        .collect()
}

fn push_square_base(data: &mut GeometryData) {
    data.push_face(
        &[[H, -H, -H], [H, -H, H], [-H, -H, H], [-H, -H, -H]],
        [0.0, -1.0, 0.0],
    );
}

fn push_cap(data: &mut GeometryData, ring: &[[f32; 3]], normal: [f32; 3]) {
    data.push_face(ring, normal);
}

/// Points on a circle of radius 0.5 in the plane z = `z`.
fn circle(segments: u32, z: f32) -> Vec<[f32; 3]> {
    let segs = segments.max(3);
    (0..segs)
        .map(|j| {
            let angle = j as f32 * 2.0 * PI / segs as f32;
            [H * angle.cos(), H * angle.sin(), z]
        })
        .collect()
}
