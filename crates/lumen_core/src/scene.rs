//! Scene description types for Lumen.
//!
//! This is the flattened form a scene-file front end hands to the renderer:
//! every primitive already carries its cumulative object-to-world matrix, and
//! lights are already in world space. Nothing here knows how to render.

use lumen_math::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Shape tag of a flattened scene entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Cube,
    Cone,
    Cylinder,
    Sphere,
    /// Triangle meshes are not renderable; entries are dropped at scene build.
    Mesh,
}

/// A texture referenced by a material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextureMap {
    /// Image path as written in the scene file
    pub filename: String,

    /// Number of tiles along U (0 = clamp instead of tiling)
    #[serde(default)]
    pub repeat_u: f32,

    /// Number of tiles along V (0 = clamp instead of tiling)
    #[serde(default)]
    pub repeat_v: f32,
}

impl TextureMap {
    /// Create a texture map reference.
    pub fn new(filename: impl Into<String>, repeat_u: f32, repeat_v: f32) -> Self {
        Self {
            filename: filename.into(),
            repeat_u,
            repeat_v,
        }
    }
}

/// Phong material coefficients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Ambient color (RGB, 0-1)
    pub ambient: Vec3,

    /// Diffuse color (RGB, 0-1)
    pub diffuse: Vec3,

    /// Specular color (RGB, 0-1)
    pub specular: Vec3,

    /// Mirror reflectivity per channel (RGB, 0-1)
    pub reflective: Vec3,

    /// Phong exponent
    pub shininess: f32,

    /// Diffuse texture, if any
    pub texture_map: Option<TextureMap>,

    /// Weight of the texture color against the diffuse term (0-1)
    pub blend: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vec3::ZERO,
            diffuse: Vec3::splat(0.5),
            specular: Vec3::ZERO,
            reflective: Vec3::ZERO,
            shininess: 1.0,
            texture_map: None,
            blend: 0.0,
        }
    }
}

impl Material {
    /// True if any reflective channel is positive.
    pub fn is_reflective(&self) -> bool {
        self.reflective.cmpgt(Vec3::ZERO).any()
    }
}

/// Scene-wide scaling factors of the illumination equation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalData {
    /// Ambient coefficient
    pub ka: f32,
    /// Diffuse coefficient
    pub kd: f32,
    /// Specular coefficient
    pub ks: f32,
}

impl Default for GlobalData {
    fn default() -> Self {
        Self {
            ka: 1.0,
            kd: 1.0,
            ks: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightKind {
    Point,
    Directional,
    Spot,
}

/// A light in world space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightData {
    pub kind: LightKind,

    /// Light color (RGB)
    pub color: Vec3,

    /// Position (point and spot lights)
    #[serde(default)]
    pub position: Vec3,

    /// Direction the light travels in (directional and spot lights)
    #[serde(default)]
    pub direction: Vec3,

    /// Attenuation coefficients (constant, linear, quadratic)
    #[serde(default = "default_attenuation")]
    pub attenuation: Vec3,

    /// Spot cone half-angle in radians
    #[serde(default)]
    pub angle: f32,

    /// Width of the spot falloff band in radians
    #[serde(default)]
    pub penumbra: f32,
}

fn default_attenuation() -> Vec3 {
    Vec3::X
}

impl LightData {
    /// A point light without distance falloff.
    pub fn point(position: Vec3, color: Vec3) -> Self {
        Self {
            kind: LightKind::Point,
            color,
            position,
            direction: Vec3::ZERO,
            attenuation: default_attenuation(),
            angle: 0.0,
            penumbra: 0.0,
        }
    }

    /// A directional light shining along `direction`.
    pub fn directional(direction: Vec3, color: Vec3) -> Self {
        Self {
            kind: LightKind::Directional,
            color,
            position: Vec3::ZERO,
            direction,
            attenuation: default_attenuation(),
            angle: 0.0,
            penumbra: 0.0,
        }
    }

    /// A spot light at `position` aimed along `direction`.
    pub fn spot(position: Vec3, direction: Vec3, color: Vec3, angle: f32, penumbra: f32) -> Self {
        Self {
            kind: LightKind::Spot,
            color,
            position,
            direction,
            attenuation: default_attenuation(),
            angle,
            penumbra,
        }
    }

    /// Set the (constant, linear, quadratic) attenuation coefficients.
    pub fn with_attenuation(mut self, attenuation: Vec3) -> Self {
        self.attenuation = attenuation;
        self
    }
}

/// Camera placement as described by the scene file.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraData {
    pub position: Vec3,
    /// View direction (need not be normalized)
    pub look: Vec3,
    /// Approximate up vector (need not be orthogonal to `look`)
    pub up: Vec3,
    /// Vertical field of view in radians
    pub height_angle: f32,
    /// Lens aperture, only meaningful for depth of field
    pub aperture: f32,
    /// Focal distance, only meaningful for depth of field
    pub focal_length: f32,
}

impl Default for CameraData {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            look: Vec3::NEG_Z,
            up: Vec3::Y,
            height_angle: 30.0_f32.to_radians(),
            aperture: 0.0,
            focal_length: 1.0,
        }
    }
}

impl CameraData {
    /// Camera at `position` looking along `look`.
    pub fn looking(position: Vec3, look: Vec3, up: Vec3, height_angle: f32) -> Self {
        Self {
            position,
            look,
            up,
            height_angle,
            ..Default::default()
        }
    }
}

/// One flattened primitive: shape, cumulative transform, material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeData {
    pub primitive: PrimitiveType,

    /// Object-to-world matrix accumulated from the scene graph
    pub ctm: Mat4,

    #[serde(default)]
    pub material: Material,
}

impl ShapeData {
    /// Create a new shape entry.
    pub fn new(primitive: PrimitiveType, ctm: Mat4, material: Material) -> Self {
        Self {
            primitive,
            ctm,
            material,
        }
    }
}

/// Everything the renderer needs from a parsed scene file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderData {
    pub global: GlobalData,
    pub camera: CameraData,
    pub lights: Vec<LightData>,
    pub shapes: Vec<ShapeData>,
}

impl RenderData {
    /// Create an empty scene description with the given camera.
    pub fn new(camera: CameraData) -> Self {
        Self {
            camera,
            ..Default::default()
        }
    }

    /// Add a shape entry.
    pub fn add_shape(&mut self, shape: ShapeData) {
        self.shapes.push(shape);
    }

    /// Add a light.
    pub fn add_light(&mut self, light: LightData) {
        self.lights.push(light);
    }

    /// Number of entries that will actually be rendered (meshes excluded).
    pub fn renderable_count(&self) -> usize {
        self.shapes
            .iter()
            .filter(|shape| shape.primitive != PrimitiveType::Mesh)
            .count()
    }
}
