//! Demo catalog and dispatch: one entry per visualization, shared by the
//! setup menu, the viewer, and the CLI.

use image::RgbImage;

use crate::flow::{render_flow, FlowParams};
use crate::network::{render_network, NetworkParams};
use crate::orbital::{render_orbital, OrbitalParams};
use crate::render;
use crate::surface::{render_surface, SurfaceParams};
use crate::terrain::{generate_terrain, TerrainError, TerrainParams};

/// The available visualizations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Demo {
    /// Diamond-square terrain with hillshaded elevation bands.
    Landscape,
    /// The same heightfield under a spectral colormap.
    Heightfield,
    /// Klein bottle parametric surface.
    Surface,
    /// Swirl-field streamlines.
    Flow,
    /// Hydrogen-like orbital point cloud.
    Orbital,
    /// Feed-forward network diagram.
    Network,
}

impl Demo {
    pub fn all() -> [Demo; 6] {
        [
            Demo::Landscape,
            Demo::Heightfield,
            Demo::Surface,
            Demo::Flow,
            Demo::Orbital,
            Demo::Network,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Demo::Landscape => "Fractal Landscape",
            Demo::Heightfield => "Heightfield Map",
            Demo::Surface => "Parametric Surface",
            Demo::Flow => "Fluid Streamlines",
            Demo::Orbital => "Orbital Density",
            Demo::Network => "Network Diagram",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Demo::Landscape => "Midpoint-displacement terrain with hillshading",
            Demo::Heightfield => "Raw heightfield, spectral colormap",
            Demo::Surface => "Klein bottle sampled on a UV grid",
            Demo::Flow => "Streamlines through a turbulent swirl field",
            Demo::Orbital => "Rejection-sampled hydrogen orbital",
            Demo::Network => "Layered net with weight-colored edges",
        }
    }

    /// CLI name, also accepted by `--demo`.
    pub fn name(&self) -> &'static str {
        match self {
            Demo::Landscape => "landscape",
            Demo::Heightfield => "heightfield",
            Demo::Surface => "surface",
            Demo::Flow => "flow",
            Demo::Orbital => "orbital",
            Demo::Network => "network",
        }
    }

    pub fn from_name(name: &str) -> Option<Demo> {
        Demo::all().into_iter().find(|d| d.name() == name)
    }
}

/// Everything needed to render one demo.
#[derive(Clone, Debug)]
pub struct DemoConfig {
    pub demo: Demo,
    pub seed: u64,
    pub terrain: TerrainParams,
    /// Output image side in pixels for the non-terrain demos.
    pub image_size: u32,
}

impl DemoConfig {
    pub fn new(demo: Demo, seed: u64) -> Self {
        Self {
            demo,
            seed,
            terrain: TerrainParams::default(),
            image_size: 640,
        }
    }
}

/// Render the configured demo to an image.
pub fn render_demo(config: &DemoConfig) -> Result<RgbImage, TerrainError> {
    let img = match config.demo {
        Demo::Landscape => {
            let field = generate_terrain(&config.terrain, config.seed)?;
            render::render_terrain_shaded(&field)
        }
        Demo::Heightfield => {
            let field = generate_terrain(&config.terrain, config.seed)?;
            render::render_heightmap(&field)
        }
        Demo::Surface => render_surface(&SurfaceParams::default(), config.image_size),
        Demo::Flow => render_flow(&FlowParams::default(), config.seed, config.image_size),
        Demo::Orbital => render_orbital(&OrbitalParams::default(), config.seed, config.image_size),
        Demo::Network => render_network(&NetworkParams::default(), config.seed, config.image_size),
    };
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for demo in Demo::all() {
            assert_eq!(Demo::from_name(demo.name()), Some(demo));
        }
        assert_eq!(Demo::from_name("volumetric"), None);
    }

    #[test]
    fn every_demo_renders() {
        for demo in Demo::all() {
            let mut config = DemoConfig::new(demo, 5);
            config.image_size = 96;
            config.terrain.exponent = 5;
            let img = render_demo(&config).unwrap();
            assert!(img.width() > 0 && img.height() > 0);
        }
    }

    #[test]
    fn invalid_terrain_config_surfaces_error() {
        let mut config = DemoConfig::new(Demo::Landscape, 1);
        config.terrain.exponent = 0;
        assert!(render_demo(&config).is_err());
    }
}
