//! Sphere of radius 0.5 centered at the origin.

use super::{longitude, longitude_gradient, nearest, radial_squared, solve_quadratic, HALF, REGION_EPSILON};
use crate::Ray;
use lumen_math::{Vec2, Vec3};
use std::f32::consts::{FRAC_2_PI, FRAC_1_PI, PI};

/// Nearest positive hit distance.
pub fn intersect(ray: &Ray) -> Option<f32> {
    let o = ray.origin;
    let d = ray.direction;

    let a = d.dot(d);
    let b = 2.0 * o.dot(d);
    let c = o.dot(o) - HALF * HALF;

    let (t1, t2) = solve_quadratic(a, b, c)?;
    nearest([Some(t1), Some(t2)])
}

pub fn normal(p: Vec3) -> Vec3 {
    p.try_normalize().unwrap_or(Vec3::Y)
}

/// Longitude from +x for u, latitude for v (v = 0 at the south pole).
pub fn uv(p: Vec3) -> Vec2 {
    let latitude = p.y.atan2(radial_squared(p).sqrt());
    Vec2::new(longitude(p), latitude / PI + 0.5)
}

/// Gradients of [`uv`]; the poles fall back to a fixed tangent frame.
pub fn differentials(p: Vec3) -> (Vec3, Vec3) {
    let r2 = radial_squared(p);
    if r2 < REGION_EPSILON * REGION_EPSILON {
        // Scales of a longitude/latitude step on the radius-0.5 sphere
        return (Vec3::X * FRAC_1_PI, Vec3::Z * FRAC_2_PI);
    }

    let r = r2.sqrt();
    let len2 = r2 + p.y * p.y;
    let dv = Vec3::new(-p.y * p.x / r, r, -p.y * p.z / r) / (PI * len2);
    (longitude_gradient(p), dv)
}

pub fn contains(p: Vec3) -> bool {
    p.length_squared() <= HALF * HALF
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::test_support::check_differentials;

    #[test]
    fn test_sphere_hit_from_front() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let t = intersect(&ray).unwrap();
        let p = ray.at(t);

        assert!((t - 4.5).abs() < 1e-5);
        assert!((p - Vec3::new(0.0, 0.0, 0.5)).length() < 1e-5);
        assert!((normal(p) - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 5.0), Vec3::NEG_Z);
        assert!(intersect(&ray).is_none());

        // Pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(intersect(&ray).is_none());
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = intersect(&ray).unwrap();
        assert!((t - 0.5).abs() < 1e-6);
        assert!(contains(Vec3::ZERO));
        assert!(!contains(Vec3::new(0.4, 0.4, 0.0)));
    }

    #[test]
    fn test_sphere_uv() {
        let equator_front = uv(Vec3::new(0.5, 0.0, 0.0));
        assert!(equator_front.x.abs() < 1e-6);
        assert!((equator_front.y - 0.5).abs() < 1e-6);

        let north = uv(Vec3::new(0.0, 0.5, 0.0));
        assert!((north.y - 1.0).abs() < 1e-6);
        let south = uv(Vec3::new(0.0, -0.5, 0.0));
        assert!(south.y.abs() < 1e-6);
    }

    #[test]
    fn test_sphere_differentials_match_uv() {
        for p in [
            Vec3::new(0.3, 0.2, -0.33),
            Vec3::new(-0.1, -0.4, -0.28),
            Vec3::new(0.35, 0.1, 0.34),
        ] {
            check_differentials(uv, differentials(p), p);
        }
    }

    #[test]
    fn test_sphere_pole_differentials_finite() {
        let (du, dv) = differentials(Vec3::new(0.0, 0.5, 0.0));
        assert!(du.is_finite() && dv.is_finite());
        assert!(du.length() > 0.0 && dv.length() > 0.0);
    }
}
