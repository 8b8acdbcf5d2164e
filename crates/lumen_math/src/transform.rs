// Transform utilities for Mat4
//
// Extends glam::Mat4 with the pieces ray tracing needs on top of
// transform_point3()/transform_vector3(): a checked inverse and the matrix
// that carries surface normals from object space to world space.

use glam::{Mat3, Mat4, Vec3};

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Inverse of the matrix, or `None` if it is singular or not finite.
    fn try_inverse(&self) -> Option<Mat4>;

    /// Matrix for transforming normals (no translation).
    ///
    /// This is the cofactor matrix of the upper 3x3 block scaled by the sign
    /// of its determinant, i.e. `|det| * M^-T`. Normals stay outward even
    /// when the transform mirrors space.
    fn normal_matrix(&self) -> Mat3;

    /// Transform an object-space normal and renormalize it.
    fn transform_normal(&self, normal: Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn try_inverse(&self) -> Option<Mat4> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }

        let inverse = self.inverse();
        inverse.is_finite().then_some(inverse)
    }

    fn normal_matrix(&self) -> Mat3 {
        let m = Mat3::from_mat4(*self);
        let cofactor = Mat3::from_cols(
            m.y_axis.cross(m.z_axis),
            m.z_axis.cross(m.x_axis),
            m.x_axis.cross(m.y_axis),
        );
        cofactor * m.determinant().signum()
    }

    fn transform_normal(&self, normal: Vec3) -> Vec3 {
        (self.normal_matrix() * normal).normalize_or_zero()
    }
}
