use clap::Parser;

mod demo;
mod flow;
mod grid;
mod menu;
mod network;
mod orbital;
mod render;
mod surface;
mod terrain;
mod viewer;

use demo::{render_demo, Demo, DemoConfig};
use terrain::{TerrainParams, MAX_EXPONENT};

#[derive(Parser, Debug)]
#[command(name = "viz_suite")]
#[command(about = "Standalone visualization demos: fractal terrain, surfaces, flows, orbitals")]
struct Args {
    /// Demo to run: landscape, heightfield, surface, flow, orbital, network.
    /// Omitted: an interactive setup menu is shown.
    #[arg(short, long)]
    demo: Option<String>,

    /// Random seed (uses a random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Terrain grid exponent (heightfield side is 2^n + 1)
    #[arg(short = 'n', long, default_value = "8")]
    exponent: u32,

    /// Terrain roughness decay per subdivision pass
    #[arg(short, long, default_value = "0.6")]
    roughness: f32,

    /// Save the render to a PNG instead of opening a window
    #[arg(short, long)]
    output: Option<String>,

    /// Render without opening a window (requires --output)
    #[arg(long)]
    headless: bool,
}

fn main() {
    let args = Args::parse();

    if args.exponent < 1 || args.exponent > MAX_EXPONENT {
        eprintln!("Exponent must be in 1..={}", MAX_EXPONENT);
        std::process::exit(1);
    }

    let config = match args.demo.as_deref() {
        Some(name) => match Demo::from_name(name) {
            Some(demo) => {
                let seed = args.seed.unwrap_or_else(rand::random);
                let mut config = DemoConfig::new(demo, seed);
                config.terrain = TerrainParams {
                    exponent: args.exponent,
                    roughness: args.roughness,
                    ..TerrainParams::default()
                };
                config
            }
            None => {
                eprintln!("Unknown demo: {}", name);
                let names: Vec<&str> = Demo::all().iter().map(|d| d.name()).collect();
                eprintln!("Available: {}", names.join(", "));
                std::process::exit(1);
            }
        },
        None => {
            // No demo flag: run the setup menu.
            match menu::run_menu(menu::MenuConfig::default()) {
                Ok(menu::MenuResult::Run(choice)) => {
                    let seed = choice.seed.or(args.seed).unwrap_or_else(rand::random);
                    let mut config = DemoConfig::new(choice.demo, seed);
                    config.terrain = TerrainParams {
                        exponent: choice.exponent,
                        roughness: choice.roughness.value(),
                        ..TerrainParams::default()
                    };
                    config
                }
                Ok(menu::MenuResult::Quit) => return,
                Err(e) => {
                    eprintln!("Menu error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    println!("Running demo: {}", config.demo.label());
    println!("Seed: {}", config.seed);
    if matches!(config.demo, Demo::Landscape | Demo::Heightfield) {
        let side = terrain::side_length(config.terrain.exponent);
        println!(
            "Heightfield: {}x{} (roughness {})",
            side, side, config.terrain.roughness
        );
    }

    if let Some(ref path) = args.output {
        let img = match render_demo(&config) {
            Ok(img) => img,
            Err(e) => {
                eprintln!("Render failed: {}", e);
                std::process::exit(1);
            }
        };
        if let Err(e) = img.save(path) {
            eprintln!("Failed to save image: {}", e);
            std::process::exit(1);
        }
        println!("Saved render to: {}", path);
    } else if args.headless {
        eprintln!("--headless requires --output");
        std::process::exit(1);
    }

    if args.headless {
        return;
    }

    if let Err(e) = viewer::run_viewer(config) {
        eprintln!("Viewer error: {}", e);
    }
}
