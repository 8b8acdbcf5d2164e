//! Lumen Core - Scene description and textures for the Lumen ray tracer.
//!
//! This crate provides:
//!
//! - **Scene description types**: `RenderData`, `ShapeData`, `Material`,
//!   `LightData`, `CameraData`, the flattened scene a parser hands over
//! - **Textures**: mip chain construction, nearest/bilinear/trilinear
//!   sampling, and an image cache that feeds scene construction
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{MipChain, Texture, TextureCache, TextureSource};
//!
//! let mut cache = TextureCache::with_base_dir("scenes/");
//! let image = cache.fetch("textures/brick.png")?;
//! let maps = std::sync::Arc::new(MipChain::generate(&image)?);
//! let texture = Texture::new(maps, 2.0, 2.0, 0.8);
//! ```

pub mod cache;
pub mod mipmap;
pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use cache::{TextureCache, TextureSource};
pub use mipmap::{MipChain, MipLevel};
pub use scene::{
    CameraData, GlobalData, LightData, LightKind, Material, PrimitiveType, RenderData, ShapeData,
    TextureMap,
};
pub use texture::{Texture, TextureError, TextureFilter, TextureResult};
