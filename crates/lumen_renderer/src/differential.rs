//! Ray differentials for texture footprint estimation.
//!
//! A ray carries the rate of change of its origin and unit direction with
//! respect to one sample step along the image x and y axes. At a hit the
//! differentials are transferred onto the surface plane, giving the
//! world-space extent of one sample, which the texture stage projects onto
//! the primitive's UV gradients.

use crate::camera::PixelFootprint;
use crate::{Primitive, Ray};
use lumen_math::{Vec2, Vec3};

/// Offsets of a surface point for one sample step in x and y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceFootprint {
    pub dp_dx: Vec3,
    pub dp_dy: Vec3,
}

/// Origin and direction differentials of a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayDifferentials {
    pub origin_dx: Vec3,
    pub origin_dy: Vec3,
    pub direction_dx: Vec3,
    pub direction_dy: Vec3,
}

impl RayDifferentials {
    /// Differentials of a primary ray.
    ///
    /// `footprint` is the world-space change of the ray's unnormalized
    /// direction per sample step. All primary rays share the eye point, so
    /// the origin differentials are zero.
    pub fn from_camera(ray: &Ray, footprint: &PixelFootprint) -> Self {
        let d = ray.unnormalized_direction;
        Self {
            origin_dx: Vec3::ZERO,
            origin_dy: Vec3::ZERO,
            direction_dx: normalized_differential(d, footprint.dx),
            direction_dy: normalized_differential(d, footprint.dy),
        }
    }

    /// Transfer onto the tangent plane at a hit `t` along the unit `direction`.
    pub fn transfer(&self, direction: Vec3, t: f32, normal: Vec3) -> SurfaceFootprint {
        let transfer = |origin_d: Vec3, direction_d: Vec3| {
            let a = origin_d + direction_d * t;
            let denominator = direction.dot(normal);
            if denominator.abs() < f32::EPSILON {
                return a;
            }
            let dt = -a.dot(normal) / denominator;
            a + direction * dt
        };

        SurfaceFootprint {
            dp_dx: transfer(self.origin_dx, self.direction_dx),
            dp_dy: transfer(self.origin_dy, self.direction_dy),
        }
    }

    /// Differentials of the mirror ray leaving the surface.
    ///
    /// The surface is treated as locally flat, so only the incoming direction
    /// differentials are mirrored.
    pub fn reflect(&self, surface: &SurfaceFootprint, normal: Vec3) -> Self {
        let mirror = |d: Vec3| d - 2.0 * d.dot(normal) * normal;
        Self {
            origin_dx: surface.dp_dx,
            origin_dy: surface.dp_dy,
            direction_dx: mirror(self.direction_dx),
            direction_dy: mirror(self.direction_dy),
        }
    }
}

impl SurfaceFootprint {
    /// UV offsets spanned by one sample step on `primitive` at `object_point`.
    pub fn uv_footprint(&self, primitive: &Primitive, object_point: Vec3) -> (Vec2, Vec2) {
        let (du, dv) = primitive.differentials(object_point);
        let project = |dp: Vec3| {
            let local = primitive.inverse_ctm().transform_vector3(dp);
            Vec2::new(local.dot(du), local.dot(dv))
        };
        (project(self.dp_dx), project(self.dp_dy))
    }
}

/// Change of `normalize(d)` for a change `dd` of `d`.
fn normalized_differential(d: Vec3, dd: Vec3) -> Vec3 {
    let len2 = d.length_squared();
    if len2 == 0.0 {
        return Vec3::ZERO;
    }
    (len2 * dd - d.dot(dd) * d) / (len2 * len2.sqrt())
}
