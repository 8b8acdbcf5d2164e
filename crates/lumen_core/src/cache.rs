//! Texture image loading and caching.
//!
//! Scene construction asks a [`TextureSource`] for decoded images by the
//! filename written in the scene description. [`TextureCache`] is the stock
//! source: it decodes files with the `image` crate on first use and hands out
//! shared copies afterwards.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;

use crate::texture::{TextureError, TextureResult};

/// Provider of decoded RGBA8 texture images.
pub trait TextureSource {
    /// Return the decoded image referenced by `filename`.
    fn fetch(&mut self, filename: &str) -> TextureResult<Arc<RgbaImage>>;
}

/// Cache for loaded texture images.
///
/// Images are loaded on-demand and cached for reuse.
#[derive(Default)]
pub struct TextureCache {
    /// Cached images by file path
    images: HashMap<String, Arc<RgbaImage>>,

    /// Base directory for resolving relative paths
    base_dir: Option<PathBuf>,
}

impl TextureCache {
    /// Create a new empty texture cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a texture cache with a base directory for relative paths.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            images: HashMap::new(),
            base_dir: Some(base_dir.into()),
        }
    }

    /// Register an already decoded image under `path`.
    ///
    /// Later fetches of `path` return this image without touching the disk.
    pub fn insert(&mut self, path: impl Into<String>, image: RgbaImage) {
        self.images.insert(path.into(), Arc::new(image));
    }

    /// Load an image from file, using cache if available.
    pub fn load(&mut self, path: &str) -> TextureResult<Arc<RgbaImage>> {
        if let Some(image) = self.images.get(path) {
            return Ok(image.clone());
        }

        let full_path = self.resolve_path(path);
        let image = Arc::new(load_image_file(&full_path)?);
        self.images.insert(path.to_string(), image.clone());

        log::debug!(
            "Loaded texture: {} ({}x{})",
            path,
            image.width(),
            image.height()
        );

        Ok(image)
    }

    /// Get the number of cached images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Resolve a path relative to the base directory.
    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);

        match &self.base_dir {
            Some(base) if !path.is_absolute() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl TextureSource for TextureCache {
    fn fetch(&mut self, filename: &str) -> TextureResult<Arc<RgbaImage>> {
        self.load(filename)
    }
}

/// Decode an image file to RGBA8.
fn load_image_file(path: &Path) -> TextureResult<RgbaImage> {
    let img = image::open(path).map_err(|e| {
        TextureError::LoadError(format!("Failed to open {}: {}", path.display(), e))
    })?;

    Ok(img.to_rgba8())
}
