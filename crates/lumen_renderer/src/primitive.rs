//! Renderable primitive instances.
//!
//! A [`Primitive`] pairs one of the canonical [`Shape`]s with its material,
//! its cumulative transform and an optional bound texture. Intersection runs
//! in object space; distances are comparable across primitives because the
//! object-space ray keeps the world ray's parameterization.

use crate::shapes::{cone, cube, cylinder, sphere};
use crate::Ray;
use lumen_core::{Material, PrimitiveType, Texture};
use lumen_math::{Mat4, Mat4Ext, Vec2, Vec3};

/// The closed set of canonical shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Sphere,
    Cube,
    Cylinder,
    Cone,
}

impl Shape {
    /// Map a scene primitive tag to a shape; meshes have no analytic form.
    pub fn from_type(primitive: PrimitiveType) -> Option<Self> {
        match primitive {
            PrimitiveType::Sphere => Some(Shape::Sphere),
            PrimitiveType::Cube => Some(Shape::Cube),
            PrimitiveType::Cylinder => Some(Shape::Cylinder),
            PrimitiveType::Cone => Some(Shape::Cone),
            PrimitiveType::Mesh => None,
        }
    }

    /// Nearest positive hit distance of an object-space ray.
    #[inline]
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        match self {
            Shape::Sphere => sphere::intersect(ray),
            Shape::Cube => cube::intersect(ray),
            Shape::Cylinder => cylinder::intersect(ray),
            Shape::Cone => cone::intersect(ray),
        }
    }

    /// Outward object-space unit normal at a surface point.
    #[inline]
    pub fn normal(&self, p: Vec3) -> Vec3 {
        match self {
            Shape::Sphere => sphere::normal(p),
            Shape::Cube => cube::normal(p),
            Shape::Cylinder => cylinder::normal(p),
            Shape::Cone => cone::normal(p),
        }
    }

    #[inline]
    pub fn uv(&self, p: Vec3) -> Vec2 {
        match self {
            Shape::Sphere => sphere::uv(p),
            Shape::Cube => cube::uv(p),
            Shape::Cylinder => cylinder::uv(p),
            Shape::Cone => cone::uv(p),
        }
    }

    /// `(du/dp, dv/dp)` at a surface point.
    #[inline]
    pub fn differentials(&self, p: Vec3) -> (Vec3, Vec3) {
        match self {
            Shape::Sphere => sphere::differentials(p),
            Shape::Cube => cube::differentials(p),
            Shape::Cylinder => cylinder::differentials(p),
            Shape::Cone => cone::differentials(p),
        }
    }

    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        match self {
            Shape::Sphere => sphere::contains(p),
            Shape::Cube => cube::contains(p),
            Shape::Cylinder => cylinder::contains(p),
            Shape::Cone => cone::contains(p),
        }
    }
}

/// A shape placed in the world.
#[derive(Debug, Clone)]
pub struct Primitive {
    shape: Shape,
    material: Material,
    ctm: Mat4,
    inverse_ctm: Mat4,
    texture: Option<Texture>,
}

impl Primitive {
    /// Create a primitive, or `None` if `ctm` cannot be inverted.
    pub fn new(shape: Shape, ctm: Mat4, material: Material) -> Option<Self> {
        let inverse_ctm = ctm.try_inverse()?;
        Some(Self {
            shape,
            material,
            ctm,
            inverse_ctm,
            texture: None,
        })
    }

    /// Bind a texture to this primitive.
    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Intersect a world-space ray.
    ///
    /// Returns the world distance along `ray` and the object-space hit point.
    pub fn intersect(&self, ray: &Ray) -> Option<(f32, Vec3)> {
        let local = ray.transformed(&self.inverse_ctm);
        let t = self.shape.intersect(&local)?;
        Some((t, local.at(t)))
    }

    /// World-space unit normal at an object-space surface point.
    pub fn world_normal(&self, object_point: Vec3) -> Vec3 {
        self.ctm.transform_normal(self.shape.normal(object_point))
    }

    /// Whether a world-space point lies inside the solid.
    pub fn contains_world_point(&self, p: Vec3) -> bool {
        self.shape
            .contains(self.inverse_ctm.transform_point3(p))
    }

    pub fn uv(&self, object_point: Vec3) -> Vec2 {
        self.shape.uv(object_point)
    }

    pub fn differentials(&self, object_point: Vec3) -> (Vec3, Vec3) {
        self.shape.differentials(object_point)
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Object-to-world transform.
    pub fn ctm(&self) -> &Mat4 {
        &self.ctm
    }

    /// World-to-object transform.
    pub fn inverse_ctm(&self) -> &Mat4 {
        &self.inverse_ctm
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }
}
