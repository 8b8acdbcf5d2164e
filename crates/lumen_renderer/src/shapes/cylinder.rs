//! Capped cylinder of radius 0.5 and height 1 around the y axis.

use super::{
    cap_differentials, cap_uv, longitude, longitude_gradient, nearest, negligible,
    radial_squared, solve_quadratic, HALF, REGION_EPSILON,
};
use crate::Ray;
use lumen_math::{Vec2, Vec3};
use std::f32::consts::FRAC_1_PI;

pub fn intersect(ray: &Ray) -> Option<f32> {
    let o = ray.origin;
    let d = ray.direction;

    let a = d.x * d.x + d.z * d.z;
    let b = 2.0 * (o.x * d.x + o.z * d.z);
    let c = o.x * o.x + o.z * o.z - HALF * HALF;

    // Rays parallel to the axis only reach the caps
    let lateral = (!negligible(a, d))
        .then(|| solve_quadratic(a, b, c))
        .flatten()
        .map(|(t1, t2)| [t1, t2])
        .unwrap_or([f32::NAN; 2])
        .map(|t| Some(t).filter(|t| (o.y + d.y * t).abs() <= HALF));

    let caps = [HALF, -HALF].map(|plane| {
        if d.y == 0.0 {
            return None;
        }
        let t = (plane - o.y) / d.y;
        let p = o + d * t;
        (radial_squared(p) <= HALF * HALF).then_some(t)
    });

    nearest(lateral.into_iter().chain(caps))
}

/// Which surface region `p` sits on: `Some(true)` top cap, `Some(false)`
/// bottom cap, `None` the side.
fn cap(p: Vec3) -> Option<bool> {
    if (p.y - HALF).abs() < REGION_EPSILON {
        Some(true)
    } else if (p.y + HALF).abs() < REGION_EPSILON {
        Some(false)
    } else {
        None
    }
}

pub fn normal(p: Vec3) -> Vec3 {
    match cap(p) {
        Some(true) => Vec3::Y,
        Some(false) => Vec3::NEG_Y,
        None => Vec3::new(p.x, 0.0, p.z).try_normalize().unwrap_or(Vec3::X),
    }
}

/// Caps use the planar mapping; the side wraps longitude around y with height as v.
pub fn uv(p: Vec3) -> Vec2 {
    match cap(p) {
        Some(top) => cap_uv(p, top),
        None => Vec2::new(longitude(p), p.y + HALF),
    }
}

pub fn differentials(p: Vec3) -> (Vec3, Vec3) {
    if let Some(top) = cap(p) {
        return cap_differentials(top);
    }
    if radial_squared(p) < REGION_EPSILON * REGION_EPSILON {
        return (Vec3::X * FRAC_1_PI, Vec3::Y);
    }
    (longitude_gradient(p), Vec3::Y)
}

pub fn contains(p: Vec3) -> bool {
    p.y.abs() <= HALF && radial_squared(p) <= HALF * HALF
}
