//! HitRecord and nearest-hit search over a primitive list.

use crate::{Primitive, Ray};
use lumen_math::Vec3;

/// Record of a ray-primitive intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// World distance along the ray
    pub t: f32,
    /// World-space point of intersection
    pub p: Vec3,
    /// Same point in the primitive's object space
    pub object_point: Vec3,
    /// World-space unit normal, outward unless the eye is inside the primitive
    pub normal: Vec3,
    /// The primitive that was hit
    pub primitive: &'a Primitive,
}

impl<'a> HitRecord<'a> {
    /// Build the record for a hit at `t` on `primitive`.
    ///
    /// The normal is flipped when `eye` lies inside the primitive so that
    /// interior surfaces shade as seen from inside.
    pub fn new(ray: &Ray, t: f32, object_point: Vec3, primitive: &'a Primitive, eye: Vec3) -> Self {
        let mut normal = primitive.world_normal(object_point);
        if primitive.contains_world_point(eye) {
            normal = -normal;
        }

        Self {
            t,
            p: ray.at(t),
            object_point,
            normal,
            primitive,
        }
    }
}

/// Nearest hit of `ray` over `primitives`.
///
/// Ties keep the earlier primitive. `eye` decides normal orientation, see
/// [`HitRecord::new`].
pub fn closest_hit<'a>(primitives: &'a [Primitive], ray: &Ray, eye: Vec3) -> Option<HitRecord<'a>> {
    let mut closest: Option<(f32, Vec3, &'a Primitive)> = None;

    for primitive in primitives {
        if let Some((t, object_point)) = primitive.intersect(ray) {
            if closest.map_or(true, |(best, _, _)| t < best) {
                closest = Some((t, object_point, primitive));
            }
        }
    }

    closest.map(|(t, object_point, primitive)| HitRecord::new(ray, t, object_point, primitive, eye))
}

/// Distance to the nearest hit, without building a record.
pub fn nearest_distance(primitives: &[Primitive], ray: &Ray) -> Option<f32> {
    primitives
        .iter()
        .filter_map(|primitive| primitive.intersect(ray).map(|(t, _)| t))
        .min_by(|a, b| a.total_cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;
    use lumen_core::Material;
    use lumen_math::Mat4;

    fn sphere_at(center: Vec3) -> Primitive {
        Primitive::new(Shape::Sphere, Mat4::from_translation(center), Material::default()).unwrap()
    }

    #[test]
    fn test_closest_hit_picks_nearest() {
        let primitives = vec![sphere_at(Vec3::new(0.0, 0.0, -5.0)), sphere_at(Vec3::new(0.0, 0.0, -2.0))];
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let hit = closest_hit(&primitives, &ray, Vec3::ZERO).unwrap();
        assert!((hit.t - 1.5).abs() < 1e-5);
        assert!(std::ptr::eq(hit.primitive, &primitives[1]));
        assert!((hit.normal - Vec3::Z).length() < 1e-5);

        assert!((nearest_distance(&primitives, &ray).unwrap() - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_closest_hit_miss() {
        let primitives = vec![sphere_at(Vec3::new(0.0, 0.0, -5.0))];
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        assert!(closest_hit(&primitives, &ray, Vec3::ZERO).is_none());
        assert!(nearest_distance(&primitives, &ray).is_none());
        assert!(closest_hit(&[], &ray, Vec3::ZERO).is_none());
    }

    #[test]
    fn test_normal_flipped_when_eye_inside() {
        let primitives = vec![Primitive::new(
            Shape::Sphere,
            Mat4::from_scale(Vec3::splat(10.0)),
            Material::default(),
        )
        .unwrap()];
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let hit = closest_hit(&primitives, &ray, Vec3::ZERO).unwrap();
        assert!((hit.t - 5.0).abs() < 1e-4);
        assert!((hit.normal - Vec3::NEG_X).length() < 1e-5);
    }
}
