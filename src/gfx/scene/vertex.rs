//! # Vertex Data Structures
//!
//! GPU-compatible vertex format for the primitive meshes. Normals are stored
//! per vertex but every vertex of a face carries that face's normal, so the
//! meshes shade flat.

/// A 3D vertex with position and normal data.
///
/// `#[repr(C)]` keeps the layout stable for vertex buffer uploads.
///
/// ```
/// use voxel_playground::gfx::scene::vertex::Vertex3D;
///
/// let vertex = Vertex3D {
///     position: [0.0, 0.5, 0.0],
///     normal: [0.0, 1.0, 0.0],
/// };
/// assert_eq!(bytemuck::bytes_of(&vertex).len(), 24);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// Outward face normal [nx, ny, nz]
    pub normal: [f32; 3],
}

impl Vertex3D {
    /// Vertex buffer layout for a wgpu render pipeline.
    ///
    /// - Attribute 0: Position (Float32x3) at shader location 0
    /// - Attribute 1: Normal (Float32x3) at shader location 1
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}
