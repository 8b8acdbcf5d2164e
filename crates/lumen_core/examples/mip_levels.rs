//! Example: Build and inspect the mip chain of a texture.
//!
//! Run with: cargo run --example mip_levels -- textures/brick.png [out_dir]
//!
//! With an output directory, every level is written back out as PNG.

use std::env;
use std::path::Path;

use image::{Rgba, RgbaImage};
use lumen_core::{MipChain, MipLevel, TextureCache, TextureSource};
use lumen_math::Vec4;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: mip_levels <image> [out_dir]");
        println!("\nExamples:");
        println!("  cargo run --example mip_levels -- textures/brick.png");
        println!("  cargo run --example mip_levels -- textures/brick.png /tmp/mips");
        return;
    }

    let path = &args[1];
    println!("Loading texture: {}", path);

    let mut cache = TextureCache::new();
    let image = match cache.fetch(path) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error loading texture: {}", e);
            std::process::exit(1);
        }
    };

    let chain = match MipChain::generate(&image) {
        Ok(chain) => chain,
        Err(e) => {
            eprintln!("Error building mip chain: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n=== {} ({}x{}) ===", path, image.width(), image.height());
    println!("Levels: {}", chain.len());
    for (i, level) in chain.levels().iter().enumerate() {
        let mean = level.texels.iter().copied().sum::<Vec4>() / level.texels.len() as f32;
        println!(
            "  [{}] {}x{} mean rgba ({:.3}, {:.3}, {:.3}, {:.3})",
            i, level.width, level.height, mean.x, mean.y, mean.z, mean.w
        );
    }

    if let Some(out_dir) = args.get(2) {
        for (i, level) in chain.levels().iter().enumerate() {
            let out = Path::new(out_dir).join(format!("level_{:02}.png", i));
            if let Err(e) = to_image(level).save(&out) {
                eprintln!("Error writing {}: {}", out.display(), e);
                std::process::exit(1);
            }
        }
        println!("\nWrote {} levels to {}", chain.len(), out_dir);
    }
}

fn to_image(level: &MipLevel) -> RgbaImage {
    RgbaImage::from_fn(level.width, level.height, |x, y| {
        let t = level.texel(x, y).clamp(Vec4::ZERO, Vec4::ONE) * 255.0;
        Rgba([t.x as u8, t.y as u8, t.z as u8, t.w as u8])
    })
}
