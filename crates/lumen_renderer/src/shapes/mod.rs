//! Canonical object-space shapes.
//!
//! Every shape is unit sized and centered at the origin: radius 0.5 and/or
//! half-extent 0.5 along each axis. The functions in the submodules work on
//! object-space rays and points only; `Primitive` takes care of transforms.

use lumen_math::{Vec2, Vec3};
use std::f32::consts::PI;

pub mod cone;
pub mod cube;
pub mod cylinder;
pub mod sphere;

/// Radius of the round shapes, and half the side of the cube.
pub const HALF: f32 = 0.5;

/// Tolerance used to decide which surface region a point lies on.
pub const REGION_EPSILON: f32 = 1e-4;

/// Roots of `a t^2 + b t + c = 0`, or `None` for a negative discriminant or
/// a zero leading coefficient.
#[inline]
pub(crate) fn solve_quadratic(a: f32, b: f32, c: f32) -> Option<(f32, f32)> {
    if a == 0.0 {
        return None;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    Some(((-b - root) / (2.0 * a), (-b + root) / (2.0 * a)))
}

/// Whether a leading coefficient `a` built from direction `d` is negligible.
///
/// Object-space directions are not unit length, so `a` is compared against
/// the squared length of `d` rather than an absolute threshold.
#[inline]
pub(crate) fn negligible(a: f32, d: Vec3) -> bool {
    a.abs() <= f32::EPSILON * d.length_squared()
}

/// Smallest positive, finite candidate distance.
#[inline]
pub(crate) fn nearest(candidates: impl IntoIterator<Item = Option<f32>>) -> Option<f32> {
    candidates
        .into_iter()
        .flatten()
        .filter(|t| *t > 0.0 && t.is_finite())
        .min_by(|a, b| a.total_cmp(b))
}

/// Longitude of `p` around the y axis, measured from +x, wrapped into `[0, 1]`.
#[inline]
pub(crate) fn longitude(p: Vec3) -> f32 {
    let u = (-p.z).atan2(p.x) / (2.0 * PI);
    if u < 0.0 {
        u + 1.0
    } else {
        u
    }
}

/// Gradient of [`longitude`] with respect to position.
///
/// Undefined on the y axis; callers check `radial_squared` first.
#[inline]
pub(crate) fn longitude_gradient(p: Vec3) -> Vec3 {
    let r2 = radial_squared(p);
    Vec3::new(p.z, 0.0, -p.x) / (2.0 * PI * r2)
}

/// Squared distance from the y axis.
#[inline]
pub(crate) fn radial_squared(p: Vec3) -> f32 {
    p.x * p.x + p.z * p.z
}

/// Planar cap coordinates `(x + 0.5, z + 0.5)`, v flipped on top caps.
#[inline]
pub(crate) fn cap_uv(p: Vec3, top: bool) -> Vec2 {
    if top {
        Vec2::new(p.x + HALF, -p.z + HALF)
    } else {
        Vec2::new(p.x + HALF, p.z + HALF)
    }
}

/// Gradients matching [`cap_uv`].
#[inline]
pub(crate) fn cap_differentials(top: bool) -> (Vec3, Vec3) {
    if top {
        (Vec3::X, Vec3::NEG_Z)
    } else {
        (Vec3::X, Vec3::Z)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Central-difference gradient of `f` at `p`.
    pub fn numeric_gradient(f: impl Fn(Vec3) -> f32, p: Vec3) -> Vec3 {
        let h = 1e-3;
        let axis = |e: Vec3| (f(p + e * h) - f(p - e * h)) / (2.0 * h);
        Vec3::new(axis(Vec3::X), axis(Vec3::Y), axis(Vec3::Z))
    }

    /// Assert analytic UV gradients match finite differences of `uv` at `p`.
    pub fn check_differentials(uv: impl Fn(Vec3) -> Vec2, analytic: (Vec3, Vec3), p: Vec3) {
        let du = numeric_gradient(|q| uv(q).x, p);
        let dv = numeric_gradient(|q| uv(q).y, p);

        let tolerance = |v: Vec3| 1e-2 * v.length().max(1.0);
        assert!(
            (du - analytic.0).length() < tolerance(du),
            "du/dp at {}: numeric {} analytic {}",
            p,
            du,
            analytic.0
        );
        assert!(
            (dv - analytic.1).length() < tolerance(dv),
            "dv/dp at {}: numeric {} analytic {}",
            p,
            dv,
            analytic.1
        );
    }
}
