//! Parametric surface demo: a Klein bottle sampled on a UV grid and
//! rendered as a depth-sorted, Lambert-shaded point splat.

use std::f64::consts::PI;

use image::{ImageBuffer, RgbImage};

use crate::render::draw_filled_circle;

/// Sampling and view settings for the parametric surface.
#[derive(Clone, Debug)]
pub struct SurfaceParams {
    /// Samples along u and v.
    pub resolution: usize,
    /// Rotation around the vertical axis, radians.
    pub yaw: f64,
    /// Rotation toward the camera, radians.
    pub tilt: f64,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            resolution: 360,
            yaw: 0.6,
            tilt: 0.45,
        }
    }
}

/// Evaluate the Klein bottle at parameters in [0, 1) x [0, 1).
/// The classic immersion splits at u = pi where the tube passes
/// through itself.
pub fn klein_bottle(u: f64, v: f64) -> [f64; 3] {
    let u = u * 2.0 * PI;
    let v = v * 2.0 * PI;
    let r = 4.0 * (1.0 - u.cos() / 2.0);

    let (x, y);
    if u < PI {
        x = 6.0 * u.cos() * (1.0 + u.sin()) + r * u.cos() * v.cos();
        y = 16.0 * u.sin() + r * u.sin() * v.cos();
    } else {
        x = 6.0 * u.cos() * (1.0 + u.sin()) + r * (v + PI).cos();
        y = 16.0 * u.sin();
    }
    let z = r * v.sin();

    [x, y, z]
}

/// Sample the surface on a regular UV grid. Returns `resolution^2` points.
pub fn sample_surface(resolution: usize) -> Vec<[f64; 3]> {
    let mut points = Vec::with_capacity(resolution * resolution);
    for i in 0..resolution {
        for j in 0..resolution {
            let u = i as f64 / resolution as f64;
            let v = j as f64 / resolution as f64;
            points.push(klein_bottle(u, v));
        }
    }
    points
}

/// Render the surface to an image of the given size.
pub fn render_surface(params: &SurfaceParams, size: u32) -> RgbImage {
    let res = params.resolution.max(16);
    let mut img: RgbImage = ImageBuffer::new(size, size);

    // Dark backdrop, matching the original demo's near-black scenes.
    for pixel in img.pixels_mut() {
        *pixel = image::Rgb([10, 10, 14]);
    }

    let light = normalize3(0.4, -0.6, 1.0);
    let du = 1e-4;

    // Collect rotated points with shading, then paint back-to-front.
    let mut splats: Vec<(f64, i32, i32, [u8; 3])> = Vec::with_capacity(res * res);
    let mut min_x = f64::MAX;
    let mut max_x = f64::MIN;
    let mut min_y = f64::MAX;
    let mut max_y = f64::MIN;

    let mut rotated: Vec<[f64; 3]> = Vec::with_capacity(res * res);
    for i in 0..res {
        for j in 0..res {
            let u = i as f64 / res as f64;
            let v = j as f64 / res as f64;

            let p = rotate(klein_bottle(u, v), params.yaw, params.tilt);

            // Numerical surface normal from the two tangents.
            let pu = rotate(klein_bottle(u + du, v), params.yaw, params.tilt);
            let pv = rotate(klein_bottle(u, v + du), params.yaw, params.tilt);
            let tu = [pu[0] - p[0], pu[1] - p[1], pu[2] - p[2]];
            let tv = [pv[0] - p[0], pv[1] - p[1], pv[2] - p[2]];
            let n = normalize3(
                tu[1] * tv[2] - tu[2] * tv[1],
                tu[2] * tv[0] - tu[0] * tv[2],
                tu[0] * tv[1] - tu[1] * tv[0],
            );

            // Two-sided Lambert: the immersion flips orientation at the
            // self-intersection, so shade by |n . l|.
            let diffuse = (n.0 * light.0 + n.1 * light.1 + n.2 * light.2).abs();
            let intensity = 0.25 + 0.75 * diffuse;

            // The original demo's burnt-orange PBR material.
            let base = [255.0, 107.0, 53.0];
            let color = [
                (base[0] * intensity).min(255.0) as u8,
                (base[1] * intensity).min(255.0) as u8,
                (base[2] * intensity).min(255.0) as u8,
            ];

            min_x = min_x.min(p[0]);
            max_x = max_x.max(p[0]);
            min_y = min_y.min(p[1]);
            max_y = max_y.max(p[1]);
            rotated.push(p);
            splats.push((p[2], 0, 0, color));
        }
    }

    // Fit the projected extent into the image with a margin.
    let extent = (max_x - min_x).max(max_y - min_y).max(1e-9);
    let margin = 0.08 * size as f64;
    let scale = (size as f64 - 2.0 * margin) / extent;
    let cx = (min_x + max_x) * 0.5;
    let cy = (min_y + max_y) * 0.5;

    for (idx, p) in rotated.iter().enumerate() {
        let px = ((p[0] - cx) * scale + size as f64 * 0.5).round() as i32;
        let py = ((p[1] - cy) * scale + size as f64 * 0.5).round() as i32;
        splats[idx].1 = px;
        splats[idx].2 = py;
    }

    // Painter's algorithm: far points first.
    splats.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let radius = ((size as usize / res.max(1)) as i32).clamp(1, 3);
    for (_, px, py, color) in splats {
        draw_filled_circle(&mut img, px, py, radius, color);
    }

    img
}

fn rotate(p: [f64; 3], yaw: f64, tilt: f64) -> [f64; 3] {
    // Yaw around the vertical (y) axis, then tilt around x.
    let (sy, cy) = yaw.sin_cos();
    let x1 = p[0] * cy + p[2] * sy;
    let z1 = -p[0] * sy + p[2] * cy;

    let (st, ct) = tilt.sin_cos();
    let y2 = p[1] * ct - z1 * st;
    let z2 = p[1] * st + z1 * ct;

    [x1, y2, z2]
}

fn normalize3(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let len = (x * x + y * y + z * z).sqrt().max(1e-12);
    (x / len, y / len, z / len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_produces_full_grid() {
        let points = sample_surface(32);
        assert_eq!(points.len(), 32 * 32);
        for p in &points {
            assert!(p.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn surface_is_bounded() {
        // The immersion's coefficients bound it to a modest box.
        for p in sample_surface(64) {
            assert!(p[0].abs() < 40.0);
            assert!(p[1].abs() < 40.0);
            assert!(p[2].abs() < 10.0);
        }
    }

    #[test]
    fn render_fills_requested_size() {
        let params = SurfaceParams {
            resolution: 48,
            ..SurfaceParams::default()
        };
        let img = render_surface(&params, 120);
        assert_eq!(img.width(), 120);
        assert_eq!(img.height(), 120);
        // Something other than background was painted.
        let painted = img
            .pixels()
            .filter(|p| p.0 != [10, 10, 14])
            .count();
        assert!(painted > 0);
    }
}
