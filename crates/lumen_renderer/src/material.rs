//! Color type and material weights used by the tracer.

use lumen_core::{GlobalData, Material};
use lumen_math::Vec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Weight applied to the color seen along a mirror ray.
///
/// Zero in every channel means the material does not reflect.
#[inline]
pub fn reflection_weight(global: &GlobalData, material: &Material) -> Color {
    global.ks * material.reflective
}

/// Map a unit normal to a displayable color, `0.5 * n + 0.5`.
#[inline]
pub fn normal_to_color(normal: Vec3) -> Color {
    normal * 0.5 + Vec3::splat(0.5)
}
