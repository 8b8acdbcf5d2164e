//! Phong direct illumination with hard shadows.

use crate::light::Light;
use crate::{Color, HitRecord, Ray, Scene};
use lumen_core::LightKind;
use lumen_math::{reflect, Vec3};

/// Offset applied along the normal to secondary ray origins.
pub const SHADOW_EPSILON: f32 = 1e-3;

/// Texture contribution at a hit: sampled color and its blend weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureSample {
    pub color: Color,
    pub blend: f32,
}

/// Direct illumination at `hit` seen along `to_viewer`.
///
/// Ambient is always added. Each light contributes diffuse and specular
/// terms scaled by its attenuation, falloff and color, unless `shadows` is
/// set and the light is blocked.
pub fn phong(
    hit: &HitRecord<'_>,
    to_viewer: Vec3,
    scene: &Scene,
    texture: Option<TextureSample>,
    shadows: bool,
) -> Color {
    let global = scene.global();
    let material = hit.primitive.material();
    let n = hit.normal;

    let diffuse_color = match texture {
        Some(sample) => sample.blend * sample.color + (1.0 - sample.blend) * global.kd * material.diffuse,
        None => global.kd * material.diffuse,
    };
    let specular_color = global.ks * material.specular;

    let mut color = global.ka * material.ambient;

    for light in scene.lights() {
        if shadows && !is_lit(hit.p, n, light, scene) {
            continue;
        }

        let incidence = light.incidence(hit.p);
        let l = incidence.to_light;

        let diffuse = diffuse_color * n.dot(l).max(0.0);
        let r = reflect(-l, n);
        let specular = specular_color * r.dot(to_viewer).max(0.0).powf(material.shininess);

        let scale = light.attenuation(incidence.distance) * light.falloff(hit.p);
        color += (diffuse + specular) * scale * light.color();
    }

    color
}

/// Whether `light` reaches `point` unblocked.
///
/// Directional lights are blocked by any hit; point and spot lights only by
/// hits closer than the light itself.
pub fn is_lit(point: Vec3, normal: Vec3, light: &Light, scene: &Scene) -> bool {
    let incidence = light.incidence(point);
    let shadow_ray = Ray::new(point + normal * SHADOW_EPSILON, incidence.to_light);

    match (scene.nearest_distance(&shadow_ray), light.kind()) {
        (None, _) => true,
        (Some(_), LightKind::Directional) => false,
        (Some(t), LightKind::Point | LightKind::Spot) => t >= incidence.distance,
    }
}
