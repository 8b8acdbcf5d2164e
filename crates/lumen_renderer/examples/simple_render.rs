//! Simple ray tracer example.
//!
//! Renders a small scene with every primitive type, a mirror floor and a
//! procedural checker texture, and saves it as PNG.
//!
//! Usage: cargo run --example simple_render [output.png] [config.json]

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use lumen_core::{
    CameraData, GlobalData, LightData, Material, PrimitiveType, RenderData, ShapeData, TextureCache,
    TextureMap,
};
use lumen_renderer::{Color, Mat4, RayTracer, RenderConfig, Scene, Vec3};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let output = args.next().unwrap_or_else(|| "output.png".to_string());
    let config = match args.next() {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path))?
        }
        None => RenderConfig {
            samples_per_pixel: 4,
            ..RenderConfig::default()
        },
    };

    let mut textures = TextureCache::new();
    textures.insert("checker", checker(64, 8));

    let start = std::time::Instant::now();
    let scene = Scene::new(640, 360, &build_scene(), &mut textures).context("building scene")?;
    log::info!("Scene built in {:?}", start.elapsed());

    let image = RayTracer::new(config).render(&scene);
    image.save(&output).with_context(|| format!("saving {}", output))?;
    log::info!("Saved to {}", output);

    Ok(())
}

fn build_scene() -> RenderData {
    let camera = CameraData::looking(
        Vec3::new(0.0, 2.0, 7.0),
        Vec3::new(0.0, -0.3, -1.0),
        Vec3::Y,
        40f32.to_radians(),
    );
    let mut data = RenderData::new(camera);
    data.global = GlobalData {
        ka: 0.5,
        kd: 0.5,
        ks: 0.5,
    };

    let matte = |diffuse: Color| Material {
        ambient: diffuse * 0.2,
        diffuse,
        specular: Color::splat(0.6),
        shininess: 25.0,
        ..Material::default()
    };

    // Mirror floor
    data.add_shape(ShapeData::new(
        PrimitiveType::Cube,
        Mat4::from_translation(Vec3::new(0.0, -1.05, 0.0)) * Mat4::from_scale(Vec3::new(12.0, 0.1, 12.0)),
        Material {
            reflective: Color::splat(0.6),
            ..matte(Color::splat(0.2))
        },
    ));

    data.add_shape(ShapeData::new(
        PrimitiveType::Sphere,
        Mat4::from_translation(Vec3::new(-2.4, 0.0, 0.0)) * Mat4::from_scale(Vec3::splat(2.0)),
        Material {
            texture_map: Some(TextureMap::new("checker", 2.0, 1.0)),
            blend: 0.8,
            ..matte(Color::new(0.9, 0.3, 0.2))
        },
    ));
    data.add_shape(ShapeData::new(
        PrimitiveType::Cube,
        Mat4::from_translation(Vec3::new(-0.8, -0.4, 1.5))
            * Mat4::from_rotation_y(0.6)
            * Mat4::from_scale(Vec3::splat(1.2)),
        matte(Color::new(0.2, 0.7, 0.3)),
    ));
    data.add_shape(ShapeData::new(
        PrimitiveType::Cylinder,
        Mat4::from_translation(Vec3::new(0.9, 0.0, -0.5)) * Mat4::from_scale(Vec3::new(1.2, 2.0, 1.2)),
        matte(Color::new(0.2, 0.4, 0.9)),
    ));
    data.add_shape(ShapeData::new(
        PrimitiveType::Cone,
        Mat4::from_translation(Vec3::new(2.6, 0.0, 0.8)) * Mat4::from_scale(Vec3::new(1.5, 2.0, 1.5)),
        matte(Color::new(0.9, 0.8, 0.2)),
    ));

    data.add_light(LightData::directional(Vec3::new(-1.0, -2.0, -1.0), Color::splat(0.8)));
    data.add_light(
        LightData::point(Vec3::new(3.0, 4.0, 4.0), Color::splat(0.7))
            .with_attenuation(Vec3::new(1.0, 0.05, 0.01)),
    );
    data.add_light(LightData::spot(
        Vec3::new(-3.0, 5.0, 2.0),
        Vec3::new(0.4, -1.0, -0.3),
        Color::new(1.0, 0.9, 0.7),
        0.5,
        0.15,
    ));

    data
}

/// Black and white checkerboard with `cells` squares per side.
fn checker(size: u32, cells: u32) -> RgbaImage {
    let cell = (size / cells).max(1);
    RgbaImage::from_fn(size, size, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgba([240, 240, 240, 255])
        } else {
            Rgba([20, 20, 20, 255])
        }
    })
}
