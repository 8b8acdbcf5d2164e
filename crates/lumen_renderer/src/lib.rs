//! Lumen Renderer - Whitted-style CPU ray tracing
//!
//! Traces primary rays from a pinhole camera through a scene of
//! canonical shapes (sphere, cube, cylinder, cone) placed by affine
//! transforms, shades hits with Phong lighting and hard shadows, follows
//! mirror reflections up to a fixed depth, and filters textures using
//! ray differentials.
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{CameraData, RenderData, TextureCache};
//! use lumen_renderer::{RayTracer, RenderConfig, Scene};
//!
//! let data = RenderData::new(CameraData::default());
//! let scene = Scene::new(640, 480, &data, &mut TextureCache::new())?;
//! let image = RayTracer::new(RenderConfig::default()).render(&scene);
//! image.save("out.png")?;
//! ```

pub mod bucket;
pub mod camera;
pub mod differential;
mod hittable;
pub mod light;
mod material;
mod primitive;
pub mod renderer;
pub mod sampler;
mod scene;
pub mod shading;
pub mod shapes;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, PixelFootprint};
pub use differential::{RayDifferentials, SurfaceFootprint};
pub use hittable::{closest_hit, nearest_distance, HitRecord};
pub use light::{Incidence, Light};
pub use material::{normal_to_color, reflection_weight, Color};
pub use primitive::{Primitive, Shape};
pub use renderer::{color_to_rgba, RayTracer, RenderConfig};
pub use sampler::{grid_size, sample_offsets, SuperSamplePattern};
pub use scene::{Scene, SceneError};
pub use shading::{is_lit, phong, TextureSample};

/// Re-export math types from lumen_math
pub use lumen_math::{Mat4, Ray, Vec2, Vec3};
