//! Axis-aligned cube with side 1 centered at the origin.

use super::{nearest, HALF, REGION_EPSILON};
use crate::Ray;
use lumen_math::{Vec2, Vec3};

/// Nearest positive hit over the six face planes.
pub fn intersect(ray: &Ray) -> Option<f32> {
    let o = ray.origin;
    let d = ray.direction;

    let mut candidates = [None; 6];
    for axis in 0..3 {
        if d[axis] == 0.0 {
            continue;
        }
        for (slot, plane) in [HALF, -HALF].into_iter().enumerate() {
            let t = (plane - o[axis]) / d[axis];
            let p = o + d * t;
            if on_face(p, axis) {
                candidates[axis * 2 + slot] = Some(t);
            }
        }
    }

    nearest(candidates)
}

/// Whether `p` lies within the face bounds along the two axes other than `axis`.
fn on_face(p: Vec3, axis: usize) -> bool {
    (0..3)
        .filter(|&other| other != axis)
        .all(|other| p[other].abs() <= HALF + REGION_EPSILON)
}

/// Axis and sign of the face the point lies on.
fn face(p: Vec3) -> (usize, f32) {
    let a = p.abs();
    let axis = if a.x >= a.y && a.x >= a.z {
        0
    } else if a.y >= a.z {
        1
    } else {
        2
    };
    (axis, if p[axis] >= 0.0 { 1.0 } else { -1.0 })
}

pub fn normal(p: Vec3) -> Vec3 {
    let (axis, sign) = face(p);
    let mut n = Vec3::ZERO;
    n[axis] = sign;
    n
}

/// Per-face planar mapping, oriented so each face reads upright from outside.
pub fn uv(p: Vec3) -> Vec2 {
    match face(p) {
        (0, s) if s > 0.0 => Vec2::new(-p.z + HALF, p.y + HALF),
        (0, _) => Vec2::new(p.z + HALF, p.y + HALF),
        (1, s) if s > 0.0 => Vec2::new(p.x + HALF, -p.z + HALF),
        (1, _) => Vec2::new(p.x + HALF, p.z + HALF),
        (_, s) if s > 0.0 => Vec2::new(p.x + HALF, p.y + HALF),
        _ => Vec2::new(-p.x + HALF, p.y + HALF),
    }
}

pub fn differentials(p: Vec3) -> (Vec3, Vec3) {
    match face(p) {
        (0, s) if s > 0.0 => (Vec3::NEG_Z, Vec3::Y),
        (0, _) => (Vec3::Z, Vec3::Y),
        (1, s) if s > 0.0 => (Vec3::X, Vec3::NEG_Z),
        (1, _) => (Vec3::X, Vec3::Z),
        (_, s) if s > 0.0 => (Vec3::X, Vec3::Y),
        _ => (Vec3::NEG_X, Vec3::Y),
    }
}

pub fn contains(p: Vec3) -> bool {
    p.abs().max_element() <= HALF
}
