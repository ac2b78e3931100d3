//! Heightmap preview binary: walks an observer across streamed terrain and
//! writes the final window as a grayscale PNG.
//!
//! Usage: cargo run --release --bin heightmap_preview -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>   Terrain config JSON (default: built-in reference terrain)
//!   --seed <SEED>     Override the noise seed
//!   --radius <R>      Override the streamed window radius
//!   --steps <N>       Number of simulated frames (default: 240)
//!   --speed <UNITS>   Observer movement per frame, diagonal (default: 3.5)
//!   --out <PATH>      Output image (default: heightmap.png)

use std::path::{Path, PathBuf};
use std::time::Instant;

use glam::DVec2;

use lodscape::terrain::{ObserverHandle, Terrain, TerrainConfig};

fn main() {
    lodscape::core::logging::try_init();

    let args: Vec<String> = std::env::args().collect();
    let steps = parse_usize_arg(&args, "--steps").unwrap_or(240);
    let speed = parse_f64_arg(&args, "--speed").unwrap_or(3.5);
    let out = parse_str_arg(&args, "--out")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("heightmap.png"));

    let mut config = match parse_str_arg(&args, "--config") {
        Some(path) => match TerrainConfig::load_json(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => TerrainConfig::default(),
    };
    if let Some(seed) = parse_u32_arg(&args, "--seed") {
        config.seed = seed;
    }
    if let Some(radius) = parse_u32_arg(&args, "--radius") {
        config.streaming.window_radius = radius;
    }

    println!("=== Heightmap Preview ===");
    println!("Seed: {}", config.seed);
    println!(
        "Window: radius {} ({}x{} samples), hysteresis {}",
        config.streaming.window_radius,
        config.streaming.side(),
        config.streaming.side(),
        config.streaming.hysteresis
    );
    println!("Walk: {} frames at {} units/frame", steps, speed);
    println!();

    let observer = ObserverHandle::new(DVec2::ZERO);
    let start = Instant::now();
    let mut terrain = match Terrain::new(&config, observer.clone()) {
        Ok(terrain) => terrain,
        Err(e) => {
            eprintln!("Invalid terrain config: {}", e);
            std::process::exit(1);
        }
    };
    println!("Initial fill: {:.1}ms", start.elapsed().as_secs_f64() * 1000.0);

    let walk = DVec2::new(speed, speed * 0.5);
    let mut uploads = 0usize;
    let mut uploaded_samples = 0usize;
    let mut refills = 0usize;
    let walk_start = Instant::now();
    for _ in 0..steps {
        observer.translate(walk);
        let frame = terrain.update();
        if !frame.dirty.is_empty() {
            uploads += 1;
            uploaded_samples += frame.dirty.iter().map(|r| r.area()).sum::<usize>();
        }
        if frame.outcome.full_refill {
            refills += 1;
        }
    }
    let walk_time = walk_start.elapsed();

    let streamer = terrain.streamer();
    println!(
        "Walked to ({:.1}, {:.1}) in {:.1}ms",
        observer.get().x,
        observer.get().y,
        walk_time.as_secs_f64() * 1000.0
    );
    println!(
        "Uploads: {} ({} samples), full refills: {}",
        uploads, uploaded_samples, refills
    );
    println!(
        "Streamed window corner: ({}, {})",
        streamer.corner_coords().x,
        streamer.corner_coords().y
    );

    let layout = terrain.layout();
    println!(
        "Layout: {} tiles, {} rings, finest scale {}, extent {}",
        layout.len(),
        layout.config().ring_count,
        layout.initial_scale(),
        layout.extent()
    );

    let window = streamer.streamed_window();
    let side = window.side() as u32;
    let pixels = streamer.buffer().unwrap_window(&window);
    let Some(image) = image::GrayImage::from_raw(side, side, pixels) else {
        eprintln!("Window size does not match buffer");
        std::process::exit(1);
    };
    if let Err(e) = image.save(&out) {
        eprintln!("Failed to write {}: {}", out.display(), e);
        std::process::exit(1);
    }

    println!();
    println!("=== Done ===");
    println!("Output: {}", out.display());
}

fn parse_f64_arg(args: &[String], flag: &str) -> Option<f64> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
