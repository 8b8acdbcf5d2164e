use crate::{Mat4, Vec3};

/// A ray in 3D space.
///
/// Keeps the direction twice: `direction` is what intersection and shading
/// work with, `unnormalized_direction` is the raw direction the ray was built
/// from and is what ray differentials are propagated through.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub unnormalized_direction: Vec3,
}

impl Ray {
    /// Create a ray from an origin and a (possibly unnormalized) direction.
    ///
    /// The normalized direction is derived; the input is kept as is.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            unnormalized_direction: direction,
        }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Map the ray through an affine transform.
    ///
    /// Directions are transformed as vectors and are NOT renormalized, so a
    /// parameter `t` names the same point before and after the transform.
    /// This is what lets intersection distances found in object space be
    /// compared in world space.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
            unnormalized_direction: matrix.transform_vector3(self.unnormalized_direction),
        }
    }
}
