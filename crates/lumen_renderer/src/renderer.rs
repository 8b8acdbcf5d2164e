//! Whitted-style recursive ray tracer.
//!
//! Implements:
//! - Phong direct lighting with hard shadows
//! - Recursive mirror reflection with configurable depth
//! - Texture mapping filtered by ray-differential level of detail
//! - Grid, random and stratified supersampling

use std::time::Instant;

use image::RgbaImage;
use lumen_core::TextureFilter;
use lumen_math::{reflect, Vec3};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::camera::PixelFootprint;
use crate::differential::{RayDifferentials, SurfaceFootprint};
use crate::material::{normal_to_color, reflection_weight};
use crate::sampler::{sample_offsets, SuperSamplePattern};
use crate::shading::{phong, TextureSample, SHADOW_EPSILON};
use crate::{Color, HitRecord, Ray, Scene};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum number of mirror bounces
    pub max_depth: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Placement of samples inside a pixel
    pub pattern: SuperSamplePattern,
    pub texture_filter: TextureFilter,
    pub enable_mipmapping: bool,
    pub enable_shadows: bool,
    pub enable_reflection: bool,
    pub enable_texture_map: bool,
    /// Render buckets on the rayon thread pool
    pub enable_parallelism: bool,
    /// Debug view: write `0.5 * N + 0.5` instead of shading
    pub only_render_normals: bool,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
    /// Seed for jittered sampling
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            samples_per_pixel: 1,
            pattern: SuperSamplePattern::Grid,
            texture_filter: TextureFilter::Nearest,
            enable_mipmapping: true,
            enable_shadows: true,
            enable_reflection: true,
            enable_texture_map: true,
            enable_parallelism: true,
            only_render_normals: false,
            bucket_size: DEFAULT_BUCKET_SIZE,
            seed: 0,
        }
    }
}

/// Renders a [`Scene`] with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct RayTracer {
    config: RenderConfig,
}

impl RayTracer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render the full image.
    pub fn render(&self, scene: &Scene) -> RgbaImage {
        let (width, height) = (scene.width(), scene.height());
        log::info!(
            "Rendering {}x{}: {} primitives, {} lights, {} spp ({:?}), max depth {}",
            width,
            height,
            scene.primitives().len(),
            scene.lights().len(),
            self.config.samples_per_pixel,
            self.config.pattern,
            self.config.max_depth
        );
        let start = Instant::now();

        let buckets = generate_buckets(width, height, self.config.bucket_size);
        let results: Vec<BucketResult> = if self.config.enable_parallelism {
            buckets
                .par_iter()
                .map(|bucket| render_bucket(bucket, scene, self))
                .collect()
        } else {
            buckets
                .iter()
                .map(|bucket| render_bucket(bucket, scene, self))
                .collect()
        };

        let mut image = RgbaImage::new(width, height);
        for result in &results {
            result.write_into(&mut image);
        }

        log::info!(
            "Render finished in {:.2?} ({} buckets)",
            start.elapsed(),
            results.len()
        );
        image
    }

    /// Average color of all samples of pixel (`x`, `y`).
    ///
    /// `footprint` is the camera-space sample footprint for the configured
    /// sampling rate, see [`Camera::footprint`](crate::Camera::footprint).
    pub fn render_pixel<R: Rng + ?Sized>(
        &self,
        scene: &Scene,
        footprint: &PixelFootprint,
        x: u32,
        y: u32,
        rng: &mut R,
    ) -> Color {
        let camera = scene.camera();
        let world_footprint = footprint.transformed(camera.inverse_view_matrix());
        let offsets = sample_offsets(self.config.pattern, self.config.samples_per_pixel, rng);

        let mut color = Color::ZERO;
        for offset in &offsets {
            let ray = camera.generate_world_ray(y as f32 + offset.y, x as f32 + offset.x);
            let differentials = RayDifferentials::from_camera(&ray, &world_footprint);
            color += self.trace(&ray, &differentials, scene, 0);
        }

        color / offsets.len() as f32
    }

    /// Color seen along `ray`; misses are black.
    ///
    /// `depth` counts the mirror bounces taken so far.
    pub fn trace(&self, ray: &Ray, differentials: &RayDifferentials, scene: &Scene, depth: u32) -> Color {
        let Some(hit) = scene.intersect(ray) else {
            return Color::ZERO;
        };

        if self.config.only_render_normals {
            return normal_to_color(hit.normal);
        }

        let surface = differentials.transfer(ray.direction, hit.t, hit.normal);
        let texture = if self.config.enable_texture_map {
            self.texture_sample(&hit, &surface)
        } else {
            None
        };

        let mut color = phong(&hit, -ray.direction, scene, texture, self.config.enable_shadows);

        let material = hit.primitive.material();
        if self.config.enable_reflection && depth < self.config.max_depth && material.is_reflective() {
            let weight = reflection_weight(scene.global(), material);
            if weight != Vec3::ZERO {
                let mirror = Ray::new(hit.p + hit.normal * SHADOW_EPSILON, reflect(ray.direction, hit.normal));
                let mirror_differentials = differentials.reflect(&surface, hit.normal);
                color += weight * self.trace(&mirror, &mirror_differentials, scene, depth + 1);
            }
        }

        color
    }

    /// Filtered texture color at a hit, if the primitive has a texture.
    fn texture_sample(&self, hit: &HitRecord<'_>, surface: &SurfaceFootprint) -> Option<TextureSample> {
        let primitive = hit.primitive;
        let texture = primitive.texture()?;

        let uv = primitive.uv(hit.object_point);
        let (duv_dx, duv_dy) = surface.uv_footprint(primitive, hit.object_point);
        let lod = texture.level_of_detail(duv_dx, duv_dy);

        Some(TextureSample {
            color: texture.sample(self.config.texture_filter, uv, lod, self.config.enable_mipmapping),
            blend: texture.blend(),
        })
    }
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert a linear color to opaque 8-bit RGBA (no gamma).
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * clamp_01(color.x)) as u8;
    let g = (255.0 * clamp_01(color.y)) as u8;
    let b = (255.0 * clamp_01(color.z)) as u8;
    [r, g, b, 255]
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{CameraData, LightData, Material, PrimitiveType, RenderData, ShapeData, TextureCache};
    use lumen_math::Mat4;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sphere_scene(width: u32, height: u32) -> Scene {
        let mut data = RenderData::new(CameraData::looking(Vec3::new(0.0, 0.0, 3.0), Vec3::NEG_Z, Vec3::Y, 0.9));
        data.add_shape(ShapeData::new(
            PrimitiveType::Sphere,
            Mat4::IDENTITY,
            Material {
                ambient: Vec3::splat(0.1),
                diffuse: Vec3::new(0.8, 0.2, 0.2),
                ..Material::default()
            },
        ));
        data.add_light(LightData::directional(Vec3::new(-1.0, -1.0, -1.0), Color::ONE));
        Scene::new(width, height, &data, &mut TextureCache::new()).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.samples_per_pixel, 1);
        assert_eq!(config.pattern, SuperSamplePattern::Grid);
        assert_eq!(config.texture_filter, TextureFilter::Nearest);
        assert!(config.enable_mipmapping && config.enable_parallelism);
        assert!(!config.only_render_normals);
    }

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Color::new(2.0, -1.0, 0.5)), [255, 0, 127, 255]);
        assert_eq!(color_to_rgba(Color::ZERO), [0, 0, 0, 255]);
    }

    #[test]
    fn test_trace_miss_is_black() {
        let scene = sphere_scene(16, 16);
        let tracer = RayTracer::default();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y);
        let footprint = scene.camera().footprint(1);
        let diffs = RayDifferentials::from_camera(&ray, &footprint);

        assert_eq!(tracer.trace(&ray, &diffs, &scene, 0), Color::ZERO);
    }

    #[test]
    fn test_center_pixel_hits_sphere() {
        let scene = sphere_scene(15, 15);
        let tracer = RayTracer::default();
        let footprint = scene.camera().footprint(1);
        let mut rng = StdRng::seed_from_u64(0);

        let center = tracer.render_pixel(&scene, &footprint, 7, 7, &mut rng);
        let corner = tracer.render_pixel(&scene, &footprint, 0, 0, &mut rng);
        assert!(center.x > 0.1);
        assert_eq!(corner, Color::ZERO);
    }

    #[test]
    fn test_normals_view() {
        let scene = sphere_scene(15, 15);
        let tracer = RayTracer::new(RenderConfig {
            only_render_normals: true,
            ..RenderConfig::default()
        });
        let footprint = scene.camera().footprint(1);
        let mut rng = StdRng::seed_from_u64(0);

        let center = tracer.render_pixel(&scene, &footprint, 7, 7, &mut rng);
        assert!((center - Color::new(0.5, 0.5, 1.0)).length() < 1e-3);
    }

    #[test]
    fn test_supersampling_averages_edge() {
        let scene = sphere_scene(9, 9);
        let footprint = scene.camera().footprint(16);
        let tracer = RayTracer::new(RenderConfig {
            samples_per_pixel: 16,
            pattern: SuperSamplePattern::Stratified,
            ..RenderConfig::default()
        });

        // Jittered samples across the silhouette average to an in-range color
        let mut rng = StdRng::seed_from_u64(5);
        for x in 0..9 {
            let color = tracer.render_pixel(&scene, &footprint, x, 4, &mut rng);
            assert!(color.is_finite());
            assert!(color.max_element() <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn test_render_dimensions() {
        let scene = sphere_scene(20, 10);
        let image = RayTracer::default().render(&scene);
        assert_eq!(image.dimensions(), (20, 10));
        assert!(image.pixels().all(|p| p.0[3] == 255));
    }
}
