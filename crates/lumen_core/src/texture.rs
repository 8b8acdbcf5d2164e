//! Texture sampling for materials.
//!
//! A [`Texture`] pairs a shared mip chain with the per-material tiling and
//! blend settings. Sampling comes in three flavours (nearest, bilinear,
//! trilinear); out-of-range coordinates are wrapped on tiled axes and clamped
//! otherwise, so every lookup resolves to a texel.

use std::sync::Arc;

use lumen_math::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mipmap::{MipChain, MipLevel};

/// Errors that can occur while loading or preparing textures.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadError(String),

    #[error("Texture has no pixels")]
    EmptyImage,
}

pub type TextureResult<T> = Result<T, TextureError>;

/// How a texture is reconstructed between texels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureFilter {
    #[default]
    Nearest,
    Bilinear,
    Trilinear,
}

/// A mip-mapped texture bound to a primitive.
#[derive(Clone, Debug)]
pub struct Texture {
    maps: Arc<MipChain>,
    repeat_u: f32,
    repeat_v: f32,
    blend: f32,
}

impl Texture {
    /// Create a texture over an existing mip chain.
    pub fn new(maps: Arc<MipChain>, repeat_u: f32, repeat_v: f32, blend: f32) -> Self {
        Self {
            maps,
            repeat_u,
            repeat_v,
            blend,
        }
    }

    /// Weight of the texture color against the material's diffuse color.
    pub fn blend(&self) -> f32 {
        self.blend
    }

    /// The mip chain backing this texture.
    pub fn maps(&self) -> &MipChain {
        &self.maps
    }

    /// Base image width in texels.
    pub fn width(&self) -> u32 {
        self.maps.base().width
    }

    /// Base image height in texels.
    pub fn height(&self) -> u32 {
        self.maps.base().height
    }

    /// Sample with the chosen filter.
    pub fn sample(&self, filter: TextureFilter, uv: Vec2, lod: f32, mipmap: bool) -> Vec3 {
        match filter {
            TextureFilter::Nearest => self.sample_nearest(uv),
            TextureFilter::Bilinear => self.sample_bilinear(uv, lod, mipmap),
            TextureFilter::Trilinear => self.sample_trilinear(uv, lod, mipmap),
        }
    }

    /// Nearest-texel lookup in the base image.
    pub fn sample_nearest(&self, uv: Vec2) -> Vec3 {
        let map = self.maps.base();
        let (x, y) = self.texel_space(uv, map);

        let col = self.resolve_u(x.floor() as i64, map.width);
        let row = self.resolve_v(y.floor() as i64, map.height);
        map.texel(col, row).truncate()
    }

    /// Bilinear lookup at mip level `ceil(lod)`, or level 0 without mipmapping.
    pub fn sample_bilinear(&self, uv: Vec2, lod: f32, mipmap: bool) -> Vec3 {
        let level = if mipmap { lod.max(0.0).ceil() as usize } else { 0 };
        self.bilinear_at(uv, level).truncate()
    }

    /// Blend of the two bilinear lookups bracketing `lod`.
    pub fn sample_trilinear(&self, uv: Vec2, lod: f32, mipmap: bool) -> Vec3 {
        if !mipmap {
            return self.bilinear_at(uv, 0).truncate();
        }

        let last = self.maps.len() - 1;
        let lod = lod.max(0.0);
        let lower = (lod.floor() as usize).min(last);
        let upper = (lower + 1).min(last);
        let weight = (lod - lower as f32).clamp(0.0, 1.0);

        let a = self.bilinear_at(uv, lower);
        let b = self.bilinear_at(uv, upper);
        a.lerp(b, weight).truncate()
    }

    /// Level of detail for a footprint given in UV units.
    ///
    /// `duv_dx` and `duv_dy` are the UV offsets spanned by one sample step
    /// horizontally and vertically. They are scaled into base-level texels
    /// (tiling included) and the longer one decides the level.
    pub fn level_of_detail(&self, duv_dx: Vec2, duv_dy: Vec2) -> f32 {
        let scale = Vec2::new(
            self.width() as f32 * tile_scale(self.repeat_u),
            self.height() as f32 * tile_scale(self.repeat_v),
        );
        let extent = (duv_dx * scale).length().max((duv_dy * scale).length());

        if extent > 0.0 && extent.is_finite() {
            extent.log2()
        } else {
            0.0
        }
    }

    fn bilinear_at(&self, uv: Vec2, level: usize) -> Vec4 {
        let map = self.maps.level(level);
        let (x, y) = self.texel_space(uv, map);

        // Texel centers sit at half-integer coordinates
        let x = x - 0.5;
        let y = y - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;

        let left = self.resolve_u(x0 as i64, map.width);
        let right = self.resolve_u(x0 as i64 + 1, map.width);
        let top = self.resolve_v(y0 as i64, map.height);
        let bottom = self.resolve_v(y0 as i64 + 1, map.height);

        let upper = map.texel(left, top).lerp(map.texel(right, top), fx);
        let lower = map.texel(left, bottom).lerp(map.texel(right, bottom), fx);
        upper.lerp(lower, fy)
    }

    /// Continuous texel coordinates on `map`; v is flipped so row 0 is the top.
    fn texel_space(&self, uv: Vec2, map: &MipLevel) -> (f32, f32) {
        let x = uv.x * tile_scale(self.repeat_u) * map.width as f32;
        let y = (1.0 - uv.y) * tile_scale(self.repeat_v) * map.height as f32;
        (x, y)
    }

    fn resolve_u(&self, index: i64, size: u32) -> u32 {
        resolve(index, size, self.repeat_u > 0.0)
    }

    fn resolve_v(&self, index: i64, size: u32) -> u32 {
        resolve(index, size, self.repeat_v > 0.0)
    }
}

/// Tiling factor along an axis; 0 means clamp and behaves like one tile.
#[inline]
fn tile_scale(repeat: f32) -> f32 {
    if repeat > 0.0 {
        repeat
    } else {
        1.0
    }
}

/// Bring an integer texel index into `[0, size)` by wrapping or clamping.
#[inline]
fn resolve(index: i64, size: u32, wrap: bool) -> u32 {
    let size = size as i64;
    if wrap {
        index.rem_euclid(size) as u32
    } else {
        index.clamp(0, size - 1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    /// 4x4 image where every texel has a distinct red value.
    fn gradient_texture(repeat: f32) -> Texture {
        let image = RgbaImage::from_fn(4, 4, |x, y| Rgba([(y * 4 + x) as u8 * 16, 0, 0, 255]));
        let maps = Arc::new(MipChain::generate(&image).unwrap());
        Texture::new(maps, repeat, repeat, 1.0)
    }

    /// UV at the center of texel (col, row) on a `size`-texel square image.
    fn texel_center(col: u32, row: u32, size: u32) -> Vec2 {
        Vec2::new(
            (col as f32 + 0.5) / size as f32,
            1.0 - (row as f32 + 0.5) / size as f32,
        )
    }

    #[test]
    fn test_nearest_picks_texel() {
        let texture = gradient_texture(0.0);
        let color = texture.sample_nearest(texel_center(2, 1, 4));
        assert!((color.x - (6.0 * 16.0) / 255.0).abs() < 1e-5);
    }

    #[test]
    fn test_nearest_clamps_without_repeat() {
        let texture = gradient_texture(0.0);
        let inside = texture.sample_nearest(texel_center(3, 0, 4));
        let outside = texture.sample_nearest(Vec2::new(1.7, 1.4));
        assert_eq!(inside, outside);
    }

    #[test]
    fn test_nearest_wraps_with_repeat() {
        let texture = gradient_texture(1.0);
        let a = texture.sample_nearest(texel_center(1, 2, 4));
        let b = texture.sample_nearest(texel_center(1, 2, 4) + Vec2::new(2.0, -3.0));
        assert!((a - b).length() < 1e-5);
    }

    #[test]
    fn test_filters_agree_at_texel_center() {
        for repeat in [0.0, 1.0] {
            let texture = gradient_texture(repeat);
            for row in 0..4 {
                for col in 0..4 {
                    let uv = texel_center(col, row, 4);
                    let nearest = texture.sample_nearest(uv);
                    let bilinear = texture.sample_bilinear(uv, 0.0, true);
                    let trilinear = texture.sample_trilinear(uv, 0.0, true);
                    assert!((nearest - bilinear).length() < 1e-4, "({}, {})", col, row);
                    assert!((nearest - trilinear).length() < 1e-4, "({}, {})", col, row);
                }
            }
        }
    }

    #[test]
    fn test_bilinear_midpoint() {
        let texture = gradient_texture(0.0);
        // Halfway between texel (0,0) and texel (1,0)
        let uv = Vec2::new(0.25, 1.0 - 0.125);
        let color = texture.sample_bilinear(uv, 0.0, false);
        let expected = (0.0 + 16.0) * 0.5 / 255.0;
        assert!((color.x - expected).abs() < 1e-4);
    }

    #[test]
    fn test_trilinear_blends_levels() {
        let texture = gradient_texture(1.0);
        let uv = texel_center(1, 1, 4);

        let fine = texture.sample_bilinear(uv, 1.0, true);
        let coarse = texture.sample_bilinear(uv, 2.0, true);
        let mid = texture.sample_trilinear(uv, 1.5, true);
        assert!((mid - (fine + coarse) * 0.5).length() < 1e-4);
    }

    #[test]
    fn test_mipmap_disabled_uses_base() {
        let texture = gradient_texture(0.0);
        let uv = texel_center(3, 3, 4);
        let base = texture.sample_bilinear(uv, 0.0, true);
        assert_eq!(texture.sample_bilinear(uv, 5.0, false), base);
        assert_eq!(texture.sample_trilinear(uv, 5.0, false), base);
    }

    #[test]
    fn test_lod_clamped_to_chain() {
        let texture = gradient_texture(0.0);
        let uv = Vec2::new(0.3, 0.6);
        let coarsest = texture.sample_bilinear(uv, 2.0, true);
        assert!((texture.sample_bilinear(uv, 40.0, true) - coarsest).length() < 1e-6);
        assert!((texture.sample_trilinear(uv, 40.0, true) - coarsest).length() < 1e-6);
    }

    #[test]
    fn test_level_of_detail() {
        let texture = gradient_texture(0.0);
        // One texel per step -> level 0
        let one_texel = Vec2::new(0.25, 0.0);
        assert!(texture.level_of_detail(one_texel, Vec2::ZERO).abs() < 1e-5);

        // Four texels per step -> level 2, whichever axis carries it
        let four = Vec2::new(0.0, 1.0);
        assert!((texture.level_of_detail(Vec2::ZERO, four) - 2.0).abs() < 1e-5);

        // Tiling twice doubles the footprint
        let tiled = gradient_texture(2.0);
        assert!((tiled.level_of_detail(one_texel, Vec2::ZERO) - 1.0).abs() < 1e-5);

        assert_eq!(texture.level_of_detail(Vec2::ZERO, Vec2::ZERO), 0.0);
    }
}
