//! Orbital density demo: hydrogen-like wavefunctions sampled by rejection
//! into a point cloud, rendered as a phase-colored projection.

use image::{ImageBuffer, RgbImage};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::render::draw_filled_circle;

/// Which orbital to visualize. Radial units are Bohr radii.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orbital {
    /// 2p along z: a two-lobed dumbbell.
    P2z,
    /// 3d z-squared: lobes along z with an equatorial ring.
    D3z2,
}

impl Orbital {
    pub fn label(&self) -> &'static str {
        match self {
            Orbital::P2z => "2p (z)",
            Orbital::D3z2 => "3d (z^2)",
        }
    }

    /// Unnormalized wavefunction value at a point. Only relative magnitude
    /// and sign matter for sampling and coloring.
    pub fn wavefunction(&self, x: f64, y: f64, z: f64) -> f64 {
        let r = (x * x + y * y + z * z).sqrt();
        match self {
            Orbital::P2z => z * (-r / 2.0).exp(),
            Orbital::D3z2 => (3.0 * z * z - r * r) * (-r / 3.0).exp(),
        }
    }

    /// Half-width of the sampling cube, chosen to contain the visible lobes.
    fn extent(&self) -> f64 {
        match self {
            Orbital::P2z => 12.0,
            Orbital::D3z2 => 20.0,
        }
    }
}

/// Sampling settings for the orbital point cloud.
#[derive(Clone, Debug)]
pub struct OrbitalParams {
    pub orbital: Orbital,
    /// Number of accepted sample points.
    pub points: usize,
}

impl Default for OrbitalParams {
    fn default() -> Self {
        Self {
            orbital: Orbital::P2z,
            points: 30_000,
        }
    }
}

/// An accepted sample with the wavefunction value at that point.
#[derive(Clone, Copy, Debug)]
pub struct OrbitalPoint {
    pub position: [f64; 3],
    pub psi: f64,
}

/// Rejection-sample the probability density |psi|^2 inside the orbital's
/// bounding cube. Deterministic for a fixed seed.
pub fn sample_orbital(params: &OrbitalParams, seed: u64) -> Vec<OrbitalPoint> {
    let orbital = params.orbital;
    let extent = orbital.extent();

    // Coarse scan for the density ceiling used by the rejection test.
    let mut max_density = 0.0f64;
    let scan = 48;
    for i in 0..scan {
        for j in 0..scan {
            for k in 0..scan {
                let x = (i as f64 / (scan - 1) as f64 * 2.0 - 1.0) * extent;
                let y = (j as f64 / (scan - 1) as f64 * 2.0 - 1.0) * extent;
                let z = (k as f64 / (scan - 1) as f64 * 2.0 - 1.0) * extent;
                let psi = orbital.wavefunction(x, y, z);
                max_density = max_density.max(psi * psi);
            }
        }
    }
    let ceiling = max_density * 1.1;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut points = Vec::with_capacity(params.points);

    // Cap attempts so a degenerate ceiling cannot loop forever.
    let max_attempts = params.points.saturating_mul(1000);
    let mut attempts = 0usize;

    while points.len() < params.points && attempts < max_attempts {
        attempts += 1;
        let x = rng.gen_range(-extent..extent);
        let y = rng.gen_range(-extent..extent);
        let z = rng.gen_range(-extent..extent);

        let psi = orbital.wavefunction(x, y, z);
        if psi * psi / ceiling > rng.gen_range(0.0..1.0) {
            points.push(OrbitalPoint {
                position: [x, y, z],
                psi,
            });
        }
    }

    points
}

/// Render the point cloud: positive phase in warm orange, negative in cyan,
/// brightness by density, painted back to front.
pub fn render_orbital(params: &OrbitalParams, seed: u64, size: u32) -> RgbImage {
    let mut points = sample_orbital(params, seed);
    let extent = params.orbital.extent();

    let mut img: RgbImage = ImageBuffer::new(size, size);
    for pixel in img.pixels_mut() {
        *pixel = image::Rgb([10, 10, 14]);
    }

    // Tilt so both lobes and any equatorial ring are visible.
    let tilt = 0.5f64;
    let (st, ct) = tilt.sin_cos();

    let mut max_abs = 0.0f64;
    for p in &points {
        max_abs = max_abs.max(p.psi.abs());
    }
    if max_abs <= 0.0 {
        return img;
    }

    // Depth sort on the rotated z.
    points.sort_by(|a, b| {
        let za = a.position[1] * st + a.position[2] * ct;
        let zb = b.position[1] * st + b.position[2] * ct;
        za.partial_cmp(&zb).unwrap_or(std::cmp::Ordering::Equal)
    });

    let half = size as f64 * 0.5;
    let scale = half * 0.9 / extent;

    for p in &points {
        let [x, y, z] = p.position;
        let ry = y * ct - z * st;

        let px = (x * scale + half) as i32;
        let py = (ry * scale + half) as i32;

        let strength = (p.psi.abs() / max_abs).powf(0.5);
        let color = if p.psi >= 0.0 {
            [
                (255.0 * strength) as u8,
                (140.0 * strength) as u8,
                (50.0 * strength) as u8,
            ]
        } else {
            [
                (50.0 * strength) as u8,
                (200.0 * strength) as u8,
                (255.0 * strength) as u8,
            ]
        };

        draw_filled_circle(&mut img, px, py, 1, color);
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_is_deterministic() {
        let params = OrbitalParams {
            orbital: Orbital::P2z,
            points: 500,
        };
        let a = sample_orbital(&params, 11);
        let b = sample_orbital(&params, 11);
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.position, pb.position);
        }
    }

    #[test]
    fn p_orbital_has_node_at_equator() {
        // psi for 2p is proportional to z, so both signs appear and points
        // hug neither the z = 0 plane nor the cube edges.
        let params = OrbitalParams {
            orbital: Orbital::P2z,
            points: 2_000,
        };
        let points = sample_orbital(&params, 3);
        assert_eq!(points.len(), 2_000);

        let positive = points.iter().filter(|p| p.psi > 0.0).count();
        assert!(positive > 200);
        assert!(points.len() - positive > 200);

        // The nodal plane itself has zero density.
        assert_eq!(Orbital::P2z.wavefunction(1.0, 2.0, 0.0), 0.0);
    }

    #[test]
    fn d_orbital_sign_structure() {
        // Along the z axis 3z^2 - r^2 = 2z^2 > 0; in the equatorial plane
        // it is -r^2 < 0.
        assert!(Orbital::D3z2.wavefunction(0.0, 0.0, 4.0) > 0.0);
        assert!(Orbital::D3z2.wavefunction(4.0, 0.0, 0.0) < 0.0);
    }

    #[test]
    fn render_paints_both_phases() {
        let params = OrbitalParams {
            orbital: Orbital::P2z,
            points: 3_000,
        };
        let img = render_orbital(&params, 9, 128);
        let mut warm = 0;
        let mut cool = 0;
        for p in img.pixels() {
            if p.0[0] > p.0[2] && p.0 != [10, 10, 14] {
                warm += 1;
            }
            if p.0[2] > p.0[0] && p.0 != [10, 10, 14] {
                cool += 1;
            }
        }
        assert!(warm > 0);
        assert!(cool > 0);
    }
}
