//! Fractal heightfield generation via midpoint displacement (diamond-square).

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use thiserror::Error;

use crate::grid::Grid;

/// Largest supported grid exponent (side 2^12 + 1 = 4097).
pub const MAX_EXPONENT: u32 = 12;

/// Parameters for heightfield generation.
#[derive(Clone, Debug)]
pub struct TerrainParams {
    /// Grid size exponent: the heightfield side is `2^exponent + 1`.
    pub exponent: u32,
    /// Displacement decay per subdivision pass. Values in (0, 1) give
    /// fractal terrain; 0 yields pure neighbor averaging, >= 1 diverges.
    pub roughness: f32,
    /// Scale of the initial corner heights and of the first displacement pass.
    pub corner_range: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            exponent: 8,
            roughness: 0.6,
            corner_range: 1.0,
        }
    }
}

/// Named roughness levels for the setup menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoughnessPreset {
    Gentle,
    Normal,
    Rugged,
    Jagged,
}

impl RoughnessPreset {
    pub fn all() -> [RoughnessPreset; 4] {
        [
            RoughnessPreset::Gentle,
            RoughnessPreset::Normal,
            RoughnessPreset::Rugged,
            RoughnessPreset::Jagged,
        ]
    }

    pub fn value(&self) -> f32 {
        match self {
            RoughnessPreset::Gentle => 0.35,
            RoughnessPreset::Normal => 0.6,
            RoughnessPreset::Rugged => 0.8,
            RoughnessPreset::Jagged => 0.95,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RoughnessPreset::Gentle => "Rolling hills, slow displacement decay",
            RoughnessPreset::Normal => "Balanced fractal relief",
            RoughnessPreset::Rugged => "Sharper ridges and valleys",
            RoughnessPreset::Jagged => "Near-divergent, chaotic peaks",
        }
    }
}

impl std::fmt::Display for RoughnessPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RoughnessPreset::Gentle => "Gentle",
            RoughnessPreset::Normal => "Normal",
            RoughnessPreset::Rugged => "Rugged",
            RoughnessPreset::Jagged => "Jagged",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("grid exponent {0} out of range (expected 1..={MAX_EXPONENT})")]
    ExponentOutOfRange(u32),
}

/// Side length of a heightfield with the given exponent: `2^n + 1`.
pub fn side_length(exponent: u32) -> usize {
    (1usize << exponent) + 1
}

/// Generate a square heightfield of side `2^exponent + 1` with the
/// diamond-square algorithm, seeded corners drawn from the RNG.
pub fn generate_terrain(params: &TerrainParams, seed: u64) -> Result<Grid<f32>, TerrainError> {
    if params.exponent < 1 || params.exponent > MAX_EXPONENT {
        return Err(TerrainError::ExponentOutOfRange(params.exponent));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut corners = [0.0f32; 4];
    for c in &mut corners {
        *c = params.corner_range * rng.sample::<f32, _>(StandardNormal);
    }

    generate_with_corners(params, corners, &mut rng)
}

/// Generate with explicit corner heights, in order
/// top-left, top-right, bottom-left, bottom-right.
///
/// Displacement at each pass is a standard-normal sample scaled by the
/// current amplitude; the amplitude decays by `roughness` before each pass,
/// so `roughness = 0` removes all randomness beyond the corners.
pub fn generate_with_corners(
    params: &TerrainParams,
    corners: [f32; 4],
    rng: &mut ChaCha8Rng,
) -> Result<Grid<f32>, TerrainError> {
    if params.exponent < 1 || params.exponent > MAX_EXPONENT {
        return Err(TerrainError::ExponentOutOfRange(params.exponent));
    }

    let side = side_length(params.exponent);
    let last = side - 1;
    let mut field = Grid::new_with(side, side, 0.0f32);

    field.set(0, 0, corners[0]);
    field.set(last, 0, corners[1]);
    field.set(0, last, corners[2]);
    field.set(last, last, corners[3]);

    let mut amplitude = params.corner_range;
    let mut step = last;

    while step > 1 {
        let half = step / 2;
        amplitude *= params.roughness;

        // Diamond step: each cell center becomes the mean of its four
        // surrounding corners plus a scaled random offset.
        for y in (0..last).step_by(step) {
            for x in (0..last).step_by(step) {
                let avg = (*field.get(x, y)
                    + *field.get(x + step, y)
                    + *field.get(x, y + step)
                    + *field.get(x + step, y + step))
                    / 4.0;
                let offset: f32 = rng.sample::<f32, _>(StandardNormal) * amplitude;
                field.set(x + half, y + half, avg + offset);
            }
        }

        // Square step: each edge midpoint becomes the mean of its available
        // orthogonal neighbors at distance `half`. Boundary midpoints only
        // have three.
        for y in (0..side).step_by(half) {
            let x_start = (y + half) % step;
            for x in (x_start..side).step_by(step) {
                let mut total = 0.0f32;
                let mut count = 0u32;

                if y >= half {
                    total += *field.get(x, y - half);
                    count += 1;
                }
                if y + half < side {
                    total += *field.get(x, y + half);
                    count += 1;
                }
                if x >= half {
                    total += *field.get(x - half, y);
                    count += 1;
                }
                if x + half < side {
                    total += *field.get(x + half, y);
                    count += 1;
                }

                let offset: f32 = rng.sample::<f32, _>(StandardNormal) * amplitude;
                field.set(x, y, total / count as f32 + offset);
            }
        }

        step = half;
    }

    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_params(exponent: u32) -> TerrainParams {
        TerrainParams {
            exponent,
            roughness: 0.0,
            corner_range: 1.0,
        }
    }

    #[test]
    fn side_length_law() {
        for n in 1..=8 {
            let params = TerrainParams {
                exponent: n,
                ..TerrainParams::default()
            };
            let field = generate_terrain(&params, 7).unwrap();
            assert_eq!(field.width, (1 << n) + 1);
            assert_eq!(field.height, (1 << n) + 1);
        }
    }

    #[test]
    fn exponent_out_of_range_is_rejected() {
        let params = TerrainParams {
            exponent: 0,
            ..TerrainParams::default()
        };
        assert!(matches!(
            generate_terrain(&params, 1),
            Err(TerrainError::ExponentOutOfRange(0))
        ));

        let params = TerrainParams {
            exponent: MAX_EXPONENT + 1,
            ..TerrainParams::default()
        };
        assert!(generate_terrain(&params, 1).is_err());
    }

    #[test]
    fn fixed_seed_is_deterministic() {
        let params = TerrainParams::default();
        let a = generate_terrain(&params, 42).unwrap();
        let b = generate_terrain(&params, 42).unwrap();
        for (x, y, v) in a.iter() {
            assert_eq!(v.to_bits(), b.get(x, y).to_bits());
        }
    }

    #[test]
    fn different_seeds_differ() {
        let params = TerrainParams::default();
        let a = generate_terrain(&params, 1).unwrap();
        let b = generate_terrain(&params, 2).unwrap();
        let differing = a.iter().filter(|(x, y, v)| *b.get(*x, *y) != **v).count();
        assert!(differing > 0);
    }

    #[test]
    fn zero_corners_zero_roughness_is_flat() {
        // 5x5, corners all zero, no roughness. Every
        // average of zeros is zero, exactly.
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let field = generate_with_corners(&flat_params(2), [0.0; 4], &mut rng).unwrap();
        for (_, _, v) in field.iter() {
            assert_eq!(*v, 0.0);
        }
    }

    #[test]
    fn five_by_five_hand_computed_averages() {
        // Corners: tl=0, tr=0, bl=0, br=48, roughness 0. Every point is the
        // mean of its defined neighbors and can be checked by hand.
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let field =
            generate_with_corners(&flat_params(2), [0.0, 0.0, 0.0, 48.0], &mut rng).unwrap();

        // First pass: center, then edge midpoints from 3 neighbors each.
        assert_eq!(*field.get(2, 2), 12.0);
        assert_eq!(*field.get(2, 0), 4.0); // (0 + 0 + 12) / 3
        assert_eq!(*field.get(0, 2), 4.0);
        assert_eq!(*field.get(4, 2), 20.0); // (0 + 48 + 12) / 3
        assert_eq!(*field.get(2, 4), 20.0);

        // Second pass diamond centers.
        assert_eq!(*field.get(1, 1), 5.0); // (0 + 4 + 4 + 12) / 4
        assert_eq!(*field.get(3, 1), 9.0); // (4 + 0 + 12 + 20) / 4
        assert_eq!(*field.get(1, 3), 9.0);
        assert_eq!(*field.get(3, 3), 25.0); // (12 + 20 + 20 + 48) / 4

        // A second-pass boundary midpoint: (1,0) averages (0,0), (2,0), (1,1).
        assert!((*field.get(1, 0) - 3.0).abs() < 1e-5);
        // And an interior one: (2,1) averages (2,0), (2,2), (1,1), (3,1).
        assert!((*field.get(2, 1) - 7.5).abs() < 1e-5);
    }

    #[test]
    fn zero_roughness_averages_arbitrary_corners() {
        // With no displacement the first-pass relations hold for any corners.
        let corners = [3.0, -1.5, 8.25, 0.5];
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let field = generate_with_corners(&flat_params(3), corners, &mut rng).unwrap();

        let last = field.width - 1;
        let mid = last / 2;
        let center = (corners[0] + corners[1] + corners[2] + corners[3]) / 4.0;
        assert!((*field.get(mid, mid) - center).abs() < 1e-5);

        // Top edge midpoint has exactly three defined neighbors.
        let top = (corners[0] + corners[1] + center) / 3.0;
        assert!((*field.get(mid, 0) - top).abs() < 1e-5);
    }

    #[test]
    fn all_small_exponents_fully_populated() {
        // Exercises boundary midpoints for n = 1..8; any out-of-bounds
        // neighbor read would panic via the grid's debug assert.
        for n in 1..=8 {
            let params = TerrainParams {
                exponent: n,
                roughness: 0.5,
                corner_range: 2.0,
            };
            let field = generate_terrain(&params, 1234).unwrap();
            let (min_v, max_v) = field.min_max();
            assert!(min_v.is_finite() && max_v.is_finite());
        }
    }

    #[test]
    fn roughness_scales_relief() {
        // Rougher terrain should show a wider elevation range for the same
        // seed and corner scale.
        let seed = 77;
        let smooth = generate_terrain(
            &TerrainParams {
                exponent: 6,
                roughness: 0.2,
                corner_range: 1.0,
            },
            seed,
        )
        .unwrap();
        let rough = generate_terrain(
            &TerrainParams {
                exponent: 6,
                roughness: 0.9,
                corner_range: 1.0,
            },
            seed,
        )
        .unwrap();

        let (s_min, s_max) = smooth.min_max();
        let (r_min, r_max) = rough.min_max();
        assert!(r_max - r_min > s_max - s_min);
    }
}
