//! Pinhole camera for ray generation.

use crate::Ray;
use lumen_core::CameraData;
use lumen_math::{Mat4, Vec3, Vec4};

/// Distance from the eye to the image plane in camera space.
pub const FOCAL_SCALE: f32 = 1.0;

/// Camera-space extent of one sub-pixel sample.
///
/// `dx` spans one sample step to the right, `dy` one step down the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelFootprint {
    pub dx: Vec3,
    pub dy: Vec3,
}

impl PixelFootprint {
    /// Map both vectors through `matrix` (as directions).
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            dx: matrix.transform_vector3(self.dx),
            dy: matrix.transform_vector3(self.dy),
        }
    }
}

/// Camera for generating rays into the scene.
///
/// The view basis is `(u, v, w)`: `w = -normalize(look)`, `v` is `up` made
/// orthogonal to `w`, and `u = v x w`. The triple is right-handed and gives
/// the camera-space x (right), y (up) and z (backwards) axes; the camera
/// looks down camera-space -z.
#[derive(Debug, Clone)]
pub struct Camera {
    image_width: u32,
    image_height: u32,

    position: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,

    aspect_ratio: f32,
    height_angle: f32,
    width_angle: f32,

    // Depth of field inputs, carried for completeness
    aperture: f32,
    focal_length: f32,

    view_matrix: Mat4,
    inverse_view_matrix: Mat4,
}

impl Camera {
    /// Build the camera for a `width` x `height` image.
    ///
    /// Both dimensions must be non-zero; `Scene::new` checks this before
    /// calling.
    pub fn new(data: &CameraData, width: u32, height: u32) -> Self {
        let w = -data.look.normalize();
        let v = (data.up - data.up.dot(w) * w).normalize();
        let u = v.cross(w);

        let aspect_ratio = width as f32 / height as f32;
        let height_angle = data.height_angle;
        let width_angle = 2.0 * (aspect_ratio * (height_angle / 2.0).tan()).atan();

        let view_matrix = view_matrix(u, v, w, data.position);

        Self {
            image_width: width,
            image_height: height,
            position: data.position,
            u,
            v,
            w,
            aspect_ratio,
            height_angle,
            width_angle,
            aperture: data.aperture,
            focal_length: data.focal_length,
            view_matrix,
            inverse_view_matrix: view_matrix.inverse(),
        }
    }

    /// Camera-space ray through the image point (`row`, `col`).
    ///
    /// Coordinates are in pixels and may be fractional: pixel (i, j) covers
    /// `[i, i+1) x [j, j+1)`, so its center is (i + 0.5, j + 0.5). The
    /// returned direction is not normalized.
    pub fn generate_ray(&self, row: f32, col: f32) -> Ray {
        let (half_w, half_h) = self.half_extents();
        let x = 2.0 * half_w * (col / self.image_width as f32 - 0.5);
        let y = 2.0 * half_h * ((self.image_height as f32 - row) / self.image_height as f32 - 0.5);

        Ray::new(Vec3::ZERO, Vec3::new(x, y, -FOCAL_SCALE))
    }

    /// World-space ray through the image point (`row`, `col`).
    ///
    /// The unnormalized world direction is kept on the ray for differentials.
    pub fn generate_world_ray(&self, row: f32, col: f32) -> Ray {
        let local = self.generate_ray(row, col);
        let origin = self.inverse_view_matrix * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let direction = self
            .inverse_view_matrix
            .transform_vector3(local.unnormalized_direction);

        Ray::new(origin.truncate(), direction)
    }

    /// Image-plane offsets covered by one sample for the given sampling rate.
    ///
    /// Supersampling splits a pixel into an n x n grid with n = floor(sqrt(spp)).
    pub fn footprint(&self, samples_per_pixel: u32) -> PixelFootprint {
        let n = crate::sampler::grid_size(samples_per_pixel) as f32;
        let (half_w, half_h) = self.half_extents();

        PixelFootprint {
            dx: Vec3::new(2.0 * half_w / (self.image_width as f32 * n), 0.0, 0.0),
            dy: Vec3::new(0.0, -2.0 * half_h / (self.image_height as f32 * n), 0.0),
        }
    }

    /// Half width and half height of the image plane at the focal scale.
    fn half_extents(&self) -> (f32, f32) {
        (
            FOCAL_SCALE * (self.width_angle / 2.0).tan(),
            FOCAL_SCALE * (self.height_angle / 2.0).tan(),
        )
    }

    /// World-to-camera transform.
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Camera-to-world transform.
    pub fn inverse_view_matrix(&self) -> &Mat4 {
        &self.inverse_view_matrix
    }

    /// Eye position in world space.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// View basis `(u, v, w)` = (right, up, backwards).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Vertical field of view in radians.
    pub fn height_angle(&self) -> f32 {
        self.height_angle
    }

    /// Horizontal field of view in radians.
    pub fn width_angle(&self) -> f32 {
        self.width_angle
    }

    pub fn aperture(&self) -> f32 {
        self.aperture
    }

    pub fn focal_length(&self) -> f32 {
        self.focal_length
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }
}

/// rotation(rows u, v, w) * translation(-position)
fn view_matrix(u: Vec3, v: Vec3, w: Vec3, position: Vec3) -> Mat4 {
    let rotation = Mat4::from_cols(
        Vec4::new(u.x, v.x, w.x, 0.0),
        Vec4::new(u.y, v.y, w.y, 0.0),
        Vec4::new(u.z, v.z, w.z, 0.0),
        Vec4::W,
    );
    rotation * Mat4::from_translation(-position)
}
