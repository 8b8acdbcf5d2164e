//! Cone with its apex at y = 0.5 and a capped base of radius 0.5 at y = -0.5.

use super::{
    cap_differentials, cap_uv, longitude, longitude_gradient, nearest, negligible,
    radial_squared, solve_quadratic, HALF, REGION_EPSILON,
};
use crate::Ray;
use lumen_math::{Vec2, Vec3};
use std::f32::consts::FRAC_1_PI;

/// Radius of the lateral surface at height `y`.
#[inline]
fn radius_at(y: f32) -> f32 {
    (HALF - y) / 2.0
}

/// Roots of the lateral surface `x^2 + z^2 = ((0.5 - y) / 2)^2`.
///
/// Rays parallel to the surface leave a single linear root.
fn lateral_roots(ray: &Ray) -> [Option<f32>; 2] {
    let o = ray.origin;
    let d = ray.direction;

    let a = d.x * d.x + d.z * d.z - 0.25 * d.y * d.y;
    let b = 2.0 * (o.x * d.x + o.z * d.z) - 0.5 * o.y * d.y + 0.25 * d.y;
    let c = o.x * o.x + o.z * o.z - 0.25 * o.y * o.y + 0.25 * o.y - 1.0 / 16.0;

    if negligible(a, d) {
        if b == 0.0 {
            return [None, None];
        }
        return [Some(-c / b), None];
    }

    match solve_quadratic(a, b, c) {
        Some((t1, t2)) => [Some(t1), Some(t2)],
        None => [None, None],
    }
}

pub fn intersect(ray: &Ray) -> Option<f32> {
    let o = ray.origin;
    let d = ray.direction;

    let lateral = lateral_roots(ray).map(|t| t.filter(|t| (o.y + d.y * t).abs() <= HALF));

    let base = (d.y != 0.0)
        .then(|| (-HALF - o.y) / d.y)
        .filter(|t| radial_squared(o + d * *t) <= HALF * HALF);

    nearest(lateral.into_iter().chain([base]))
}

fn on_base(p: Vec3) -> bool {
    (p.y + HALF).abs() < REGION_EPSILON
}

fn at_apex(p: Vec3) -> bool {
    (p.y - HALF).abs() < REGION_EPSILON
}

pub fn normal(p: Vec3) -> Vec3 {
    if on_base(p) {
        return Vec3::NEG_Y;
    }
    if at_apex(p) {
        return Vec3::Y;
    }
    Vec3::new(p.x, (HALF - p.y) / 4.0, p.z)
        .try_normalize()
        .unwrap_or(Vec3::Y)
}

pub fn uv(p: Vec3) -> Vec2 {
    if on_base(p) {
        cap_uv(p, false)
    } else {
        Vec2::new(longitude(p), p.y + HALF)
    }
}

/// Gradients of [`uv`]; the apex has no longitude and uses a fixed frame.
pub fn differentials(p: Vec3) -> (Vec3, Vec3) {
    if on_base(p) {
        return cap_differentials(false);
    }
    if at_apex(p) || radial_squared(p) < REGION_EPSILON * REGION_EPSILON {
        return (Vec3::X * FRAC_1_PI, Vec3::Y);
    }
    (longitude_gradient(p), Vec3::Y)
}

pub fn contains(p: Vec3) -> bool {
    let r = radius_at(p.y);
    p.y.abs() <= HALF && radial_squared(p) <= r * r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::test_support::check_differentials;

    #[test]
    fn test_cone_side_hit() {
        // At y = 0 the radius is 0.25
        let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::NEG_Z);
        let t = intersect(&ray).unwrap();
        let p = ray.at(t);

        assert!((t - 2.75).abs() < 1e-5);
        let n = normal(p);
        assert!(n.z > 0.0 && n.y > 0.0);
        assert!((n.length() - 1.0).abs() < 1e-5);
        // Normal is perpendicular to the slant line through p
        let slant = Vec3::new(0.0, HALF, 0.0) - p;
        assert!(n.dot(slant).abs() < 1e-5);
    }

    #[test]
    fn test_cone_base_hit() {
        let ray = Ray::new(Vec3::new(0.2, -3.0, 0.1), Vec3::Y);
        let t = intersect(&ray).unwrap();
        let p = ray.at(t);

        assert!((t - 2.5).abs() < 1e-5);
        assert_eq!(normal(p), Vec3::NEG_Y);
    }

    #[test]
    fn test_cone_from_above_hits_side() {
        let ray = Ray::new(Vec3::new(0.1, 3.0, 0.0), Vec3::NEG_Y);
        let p = ray.at(intersect(&ray).unwrap());
        // Radius 0.1 is reached at y = 0.3
        assert!((p.y - 0.3).abs() < 1e-4);
        assert!(normal(p).y > 0.0);
    }

    #[test]
    fn test_cone_ray_parallel_to_slant() {
        // Direction along the slant gives a = 0, leaving the linear root
        let ray = Ray::new(Vec3::new(-0.6, 0.5, 0.0), Vec3::new(1.0, -2.0, 0.0));
        let p = ray.at(intersect(&ray).unwrap());
        assert!((p - Vec3::new(-0.3, -0.1, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_cone_miss() {
        let ray = Ray::new(Vec3::new(0.0, 0.45, 3.0), Vec3::new(0.3, 0.0, -1.0));
        assert!(intersect(&ray).is_none());
    }

    #[test]
    fn test_cone_contains() {
        assert!(contains(Vec3::new(0.0, 0.0, 0.2)));
        assert!(!contains(Vec3::new(0.0, 0.0, 0.3)));
        assert!(contains(Vec3::new(0.4, -0.45, 0.0)));
        assert!(!contains(Vec3::new(0.0, 0.6, 0.0)));
    }

    #[test]
    fn test_cone_differentials_match_uv() {
        for p in [
            Vec3::new(0.2, 0.0, -0.1),
            Vec3::new(-0.3, -0.3, 0.2),
            Vec3::new(0.05, 0.3, 0.05),
        ] {
            check_differentials(uv, differentials(p), p);
        }
    }

    #[test]
    fn test_cone_degenerate_points_finite() {
        let (du, dv) = differentials(Vec3::new(0.0, 0.5, 0.0));
        assert!(du.is_finite() && dv.is_finite());
        assert_eq!(differentials(Vec3::new(0.1, -0.5, 0.1)), (Vec3::X, Vec3::Z));
        assert_eq!(normal(Vec3::new(0.0, 0.5, 0.0)), Vec3::Y);
    }
}
