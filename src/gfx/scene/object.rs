use std::fmt;

use cgmath::{Deg, Matrix4, Vector3};

use crate::error::SceneError;

/// The seven solids the editor can place.
///
/// The discriminants are the codes written to `.vox` files and must never
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Plane = 0,
    Cube = 1,
    Sphere = 2,
    Cone = 3,
    Cylinder = 4,
    Pyramid = 5,
    Wedge = 6,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 7] = [
        PrimitiveKind::Plane,
        PrimitiveKind::Cube,
        PrimitiveKind::Sphere,
        PrimitiveKind::Cone,
        PrimitiveKind::Cylinder,
        PrimitiveKind::Pyramid,
        PrimitiveKind::Wedge,
    ];

    /// Stable serialization code (0–6).
    pub fn code(self) -> i64 {
        self as i64
    }

    /// Name shown in the object list.
    pub fn label(self) -> &'static str {
        match self {
            PrimitiveKind::Plane => "Plane",
            PrimitiveKind::Cube => "Cube",
            PrimitiveKind::Sphere => "Sphere",
            PrimitiveKind::Cone => "Cone",
            PrimitiveKind::Cylinder => "Cylinder",
            PrimitiveKind::Pyramid => "Pyramid",
            PrimitiveKind::Wedge => "Wedge",
        }
    }
}

impl TryFrom<i64> for PrimitiveKind {
    type Error = SceneError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(SceneError::UnknownPrimitive(code))
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The four editable per-object vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Translate,
    Rotate,
    Scale,
    Color,
}

/// One placed primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    pub kind: PrimitiveKind,
    /// World-space offset.
    pub translate: Vector3<f64>,
    /// Euler angles in degrees, applied X then Y then Z.
    pub rotate: Vector3<f64>,
    pub scale: Vector3<f64>,
    /// RGB in [0, 1].
    pub color: Vector3<f64>,
}

impl SceneObject {
    pub const DEFAULT_COLOR: Vector3<f64> = Vector3::new(0.8, 0.8, 0.8);

    /// Create an object at the origin with unit scale and the default grey.
    pub fn new(kind: PrimitiveKind) -> Self {
        Self {
            kind,
            translate: Vector3::new(0.0, 0.0, 0.0),
            rotate: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            color: Self::DEFAULT_COLOR,
        }
    }

    pub fn attribute(&self, attribute: Attribute) -> Vector3<f64> {
        match attribute {
            Attribute::Translate => self.translate,
            Attribute::Rotate => self.rotate,
            Attribute::Scale => self.scale,
            Attribute::Color => self.color,
        }
    }

    pub fn set_attribute(&mut self, attribute: Attribute, value: Vector3<f64>) {
        match attribute {
            Attribute::Translate => self.translate = value,
            Attribute::Rotate => self.rotate = value,
            Attribute::Scale => self.scale = value,
            Attribute::Color => self.color = value,
        }
    }

    /// Local-to-world transform: translate, then rotate about X, Y and Z,
    /// then scale.
    pub fn model_matrix(&self) -> Matrix4<f64> {
        let t = Matrix4::from_translation(self.translate);
        let rx = Matrix4::from_angle_x(Deg(self.rotate.x));
        let ry = Matrix4::from_angle_y(Deg(self.rotate.y));
        let rz = Matrix4::from_angle_z(Deg(self.rotate.z));
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * rx * ry * rz * s // Order matters: T * Rx * Ry * Rz * S
    }
}
