//! Mip chain construction.
//!
//! Each level is resampled from the base image with a separable tent
//! filter (horizontal pass, then vertical pass), so the filter widens as the
//! levels shrink. Addressing wraps around the
//! image borders so tiled textures stay seamless at every level.

use image::RgbaImage;
use lumen_math::Vec4;

use crate::texture::{TextureError, TextureResult};

/// One level of a mip chain, stored as linear float RGBA.
#[derive(Clone, Debug, PartialEq)]
pub struct MipLevel {
    pub width: u32,
    pub height: u32,
    /// Row-major texels, row 0 at the top of the image
    pub texels: Vec<Vec4>,
}

impl MipLevel {
    /// Convert a decoded 8-bit image to a float level.
    pub fn from_image(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let texels = image
            .pixels()
            .map(|p| {
                Vec4::new(
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                    p[3] as f32 / 255.0,
                )
            })
            .collect();

        Self {
            width,
            height,
            texels,
        }
    }

    /// Texel at integer coordinates. Coordinates must already be in range.
    #[inline]
    pub fn texel(&self, x: u32, y: u32) -> Vec4 {
        self.texels[(y * self.width + x) as usize]
    }
}

/// A texture image and its successively halved copies.
///
/// Level 0 is the original image; the last level is always 1x1.
#[derive(Clone, Debug)]
pub struct MipChain {
    levels: Vec<MipLevel>,
}

impl MipChain {
    /// Build the full chain for an image.
    pub fn generate(image: &RgbaImage) -> TextureResult<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::EmptyImage);
        }

        let base = MipLevel::from_image(image);
        let (mut level_width, mut level_height) = (width, height);
        let mut levels = Vec::new();
        while level_width > 1 || level_height > 1 {
            level_width = (level_width / 2).max(1);
            level_height = (level_height / 2).max(1);
            levels.push(downsample(&base, level_width, level_height));
        }
        levels.insert(0, base);

        log::debug!(
            "Built mip chain for {}x{} texture ({} levels)",
            width,
            height,
            levels.len()
        );

        Ok(Self { levels })
    }

    /// Number of levels, including the base image.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// A chain always has at least its base level.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level `index`, clamped to the coarsest level.
    pub fn level(&self, index: usize) -> &MipLevel {
        &self.levels[index.min(self.levels.len() - 1)]
    }

    /// The base image.
    pub fn base(&self) -> &MipLevel {
        &self.levels[0]
    }

    /// All levels, finest first.
    pub fn levels(&self) -> &[MipLevel] {
        &self.levels
    }
}

/// Resample `source` to `width` x `height` with a two-pass tent filter.
pub fn downsample(source: &MipLevel, width: u32, height: u32) -> MipLevel {
    let scale_x = width as f32 / source.width as f32;
    let scale_y = height as f32 / source.height as f32;

    // Horizontal pass: width x source.height
    let mut horizontal = Vec::with_capacity((width * source.height) as usize);
    for row in 0..source.height {
        for col in 0..width {
            let color = tent(col, scale_x, source.width, |s| source.texel(s, row));
            horizontal.push(color);
        }
    }

    // Vertical pass: width x height
    let mut texels = Vec::with_capacity((width * height) as usize);
    for row in 0..height {
        for col in 0..width {
            let color = tent(row, scale_y, source.height, |s| {
                horizontal[(s * width + col) as usize]
            });
            texels.push(color);
        }
    }

    MipLevel {
        width,
        height,
        texels,
    }
}

/// Filter one output sample `k` along an axis of `length` source texels.
///
/// `fetch` reads a source texel by (already wrapped) index along the axis.
fn tent(k: u32, scale: f32, length: u32, fetch: impl Fn(u32) -> Vec4) -> Vec4 {
    let center = (k as f32 + 0.5) / scale - 0.5;
    let radius = if scale < 1.0 { 1.0 / scale } else { 1.0 };

    let left = (center - radius).floor() as i64;
    let right = (center + radius).ceil() as i64;

    let mut sum = Vec4::ZERO;
    let mut weights = 0.0;
    for s in left..=right {
        let w = tent_weight(s as f32 - center, radius);
        if w <= 0.0 {
            continue;
        }
        let wrapped = s.rem_euclid(length as i64) as u32;
        sum += fetch(wrapped) * w;
        weights += w;
    }

    if weights <= 0.0 {
        return Vec4::ZERO;
    }
    sum / weights
}

#[inline]
fn tent_weight(x: f32, radius: f32) -> f32 {
    (1.0 - x.abs() / radius).max(0.0)
}
