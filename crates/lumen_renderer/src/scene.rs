//! Immutable render scene built from parsed scene data.

use std::collections::HashMap;
use std::sync::Arc;

use lumen_core::{GlobalData, MipChain, RenderData, Texture, TextureError, TextureSource};
use thiserror::Error;

use crate::hittable::{closest_hit, nearest_distance};
use crate::{Camera, HitRecord, Light, Primitive, Ray, Shape};

/// Errors that can occur while building a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("shape {index} has a non-invertible transform")]
    NonInvertibleTransform { index: usize },

    #[error("failed to load texture {filename}: {source}")]
    Texture {
        filename: String,
        #[source]
        source: TextureError,
    },
}

/// Everything a render reads: camera, primitives, lights and global weights.
#[derive(Debug)]
pub struct Scene {
    camera: Camera,
    primitives: Vec<Primitive>,
    lights: Vec<Light>,
    global: GlobalData,
}

impl Scene {
    /// Build the scene for a `width` x `height` image.
    ///
    /// Mesh entries have no analytic shape and are skipped. Textures are
    /// fetched through `textures` and their mip chains built once per file.
    pub fn new(
        width: u32,
        height: u32,
        data: &RenderData,
        textures: &mut impl TextureSource,
    ) -> Result<Self, SceneError> {
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidDimensions { width, height });
        }

        let mut chains: HashMap<String, Arc<MipChain>> = HashMap::new();
        let mut primitives = Vec::with_capacity(data.renderable_count());

        for (index, shape_data) in data.shapes.iter().enumerate() {
            let Some(shape) = Shape::from_type(shape_data.primitive) else {
                log::debug!("Skipping shape {} ({:?}): not ray traceable", index, shape_data.primitive);
                continue;
            };

            let mut primitive = Primitive::new(shape, shape_data.ctm, shape_data.material.clone())
                .ok_or(SceneError::NonInvertibleTransform { index })?;

            if let Some(map) = &shape_data.material.texture_map {
                let maps = match chains.get(&map.filename) {
                    Some(maps) => Arc::clone(maps),
                    None => {
                        let maps = build_chain(textures, &map.filename)?;
                        chains.insert(map.filename.clone(), Arc::clone(&maps));
                        maps
                    }
                };
                primitive = primitive.with_texture(Texture::new(
                    maps,
                    map.repeat_u,
                    map.repeat_v,
                    shape_data.material.blend,
                ));
            }

            primitives.push(primitive);
        }

        log::debug!(
            "Scene built: {} primitives, {} lights, {} textures",
            primitives.len(),
            data.lights.len(),
            chains.len()
        );

        Ok(Self {
            camera: Camera::new(&data.camera, width, height),
            primitives,
            lights: data.lights.iter().map(Light::new).collect(),
            global: data.global,
        })
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn global(&self) -> &GlobalData {
        &self.global
    }

    pub fn width(&self) -> u32 {
        self.camera.image_width()
    }

    pub fn height(&self) -> u32 {
        self.camera.image_height()
    }

    /// Nearest hit of a world-space ray, normals oriented for the camera.
    pub fn intersect(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        closest_hit(&self.primitives, ray, self.camera.position())
    }

    /// Distance to the nearest hit, if any.
    pub fn nearest_distance(&self, ray: &Ray) -> Option<f32> {
        nearest_distance(&self.primitives, ray)
    }
}

fn build_chain(textures: &mut impl TextureSource, filename: &str) -> Result<Arc<MipChain>, SceneError> {
    let wrap = |source| SceneError::Texture {
        filename: filename.to_string(),
        source,
    };
    let image = textures.fetch(filename).map_err(wrap)?;
    let maps = MipChain::generate(&image).map_err(wrap)?;
    log::debug!("Built {} mip levels for {}", maps.len(), filename);
    Ok(Arc::new(maps))
}
