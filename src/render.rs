//! Shared raster rendering helpers: colormaps, hillshading, line and
//! circle drawing, and conversion to window pixel buffers.

use image::{ImageBuffer, Rgb, RgbImage};
use rayon::prelude::*;

use crate::grid::Grid;

/// Spectral colormap (matplotlib style): dark blue -> cyan -> green -> yellow -> orange -> red
pub fn spectral_colormap(t: f32) -> [u8; 3] {
    let colors: [[f32; 3]; 11] = [
        [0.37, 0.31, 0.64], // Dark blue/purple (low)
        [0.20, 0.53, 0.74], // Blue
        [0.40, 0.76, 0.65], // Teal
        [0.67, 0.87, 0.64], // Light green
        [0.90, 0.96, 0.60], // Yellow-green
        [1.00, 1.00, 0.75], // Light yellow / white
        [1.00, 0.88, 0.55], // Yellow
        [0.99, 0.68, 0.38], // Light orange
        [0.96, 0.43, 0.26], // Orange
        [0.84, 0.24, 0.31], // Red
        [0.62, 0.00, 0.26], // Dark red (high)
    ];

    let t = t.clamp(0.0, 1.0);
    let t_scaled = t * 10.0;
    let idx = (t_scaled as usize).min(9);
    let frac = t_scaled - idx as f32;

    let c1 = colors[idx];
    let c2 = colors[idx + 1];

    [
        ((c1[0] + (c2[0] - c1[0]) * frac) * 255.0) as u8,
        ((c1[1] + (c2[1] - c1[1]) * frac) * 255.0) as u8,
        ((c1[2] + (c2[2] - c1[2]) * frac) * 255.0) as u8,
    ]
}

/// Terrain color bands over a normalized 0..1 elevation.
pub fn terrain_color(t: f32) -> [u8; 3] {
    if t < 0.28 {
        [30, 60, 120] // Deep water
    } else if t < 0.35 {
        [60, 100, 150] // Shallow water
    } else if t < 0.38 {
        [210, 190, 140] // Beach
    } else if t < 0.50 {
        [80, 160, 60] // Lowland
    } else if t < 0.62 {
        [100, 180, 80] // Plains
    } else if t < 0.72 {
        [110, 140, 70] // Hills
    } else if t < 0.82 {
        [140, 130, 100] // Highland
    } else if t < 0.92 {
        [120, 110, 100] // Mountain
    } else {
        [240, 240, 245] // Snowy peak
    }
}

/// Render a heightfield with the spectral colormap. Values are normalized
/// internally, so any elevation range works.
pub fn render_heightmap(field: &Grid<f32>) -> RgbImage {
    let normalized = field.normalized();
    let mut img: RgbImage = ImageBuffer::new(field.width as u32, field.height as u32);

    for y in 0..field.height {
        for x in 0..field.width {
            let color = spectral_colormap(*normalized.get(x, y));
            img.put_pixel(x as u32, y as u32, Rgb(color));
        }
    }

    img
}

/// Render a heightfield with elevation color bands and hillshading.
/// Light comes from the upper-left, Lambert diffuse with an ambient floor.
pub fn render_terrain_shaded(field: &Grid<f32>) -> RgbImage {
    let normalized = field.normalized();
    let width = field.width;
    let height = field.height;

    // Exaggerate relief so shading reads at any grid size.
    let z_scale = width as f32 * 0.15;
    let light = normalize3(-1.0, -1.0, 1.2);

    let rows: Vec<Vec<[u8; 3]>> = (0..height)
        .into_par_iter()
        .map(|y| {
            let mut row = Vec::with_capacity(width);
            for x in 0..width {
                let t = *normalized.get(x, y);

                let left = normalized.sample_bilinear(x as f32 - 1.0, y as f32);
                let right = normalized.sample_bilinear(x as f32 + 1.0, y as f32);
                let up = normalized.sample_bilinear(x as f32, y as f32 - 1.0);
                let down = normalized.sample_bilinear(x as f32, y as f32 + 1.0);

                let gx = (right - left) * 0.5 * z_scale;
                let gy = (down - up) * 0.5 * z_scale;
                let normal = normalize3(-gx, -gy, 1.0);

                let diffuse =
                    (normal.0 * light.0 + normal.1 * light.1 + normal.2 * light.2).max(0.0);
                let ambient = 0.3;
                let intensity = ambient + (1.0 - ambient) * diffuse;

                let base = terrain_color(t);
                row.push([
                    (base[0] as f32 * intensity).clamp(0.0, 255.0) as u8,
                    (base[1] as f32 * intensity).clamp(0.0, 255.0) as u8,
                    (base[2] as f32 * intensity).clamp(0.0, 255.0) as u8,
                ]);
            }
            row
        })
        .collect();

    let mut img: RgbImage = ImageBuffer::new(width as u32, height as u32);
    for (y, row) in rows.iter().enumerate() {
        for (x, color) in row.iter().enumerate() {
            img.put_pixel(x as u32, y as u32, Rgb(*color));
        }
    }

    img
}

/// Draw a line with Bresenham's algorithm. Endpoints may lie outside the
/// image; out-of-bounds pixels are skipped.
pub fn draw_line(img: &mut RgbImage, x0: i32, y0: i32, x1: i32, y1: i32, color: [u8; 3]) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let mut err = dx + dy;
    let mut x = x0;
    let mut y = y0;

    loop {
        if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
            img.put_pixel(x as u32, y as u32, Rgb(color));
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draw a filled circle, clipped against the image bounds.
pub fn draw_filled_circle(img: &mut RgbImage, cx: i32, cy: i32, radius: i32, color: [u8; 3]) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let x = cx + dx;
            let y = cy + dy;
            if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
                img.put_pixel(x as u32, y as u32, Rgb(color));
            }
        }
    }
}

/// Convert an image to a 0RGB u32 buffer for minifb, integer-scaled and
/// centered on a window of `out_width` x `out_height`.
pub fn image_to_window_buffer(
    img: &RgbImage,
    out_width: usize,
    out_height: usize,
    scale: usize,
) -> Vec<u32> {
    let img_width = img.width() as usize;
    let img_height = img.height() as usize;

    let bg_color: u32 = (5 << 16) | (5 << 8) | 15;
    let mut buffer = vec![bg_color; out_width * out_height];

    let offset_x = out_width.saturating_sub(img_width * scale) / 2;
    let offset_y = out_height.saturating_sub(img_height * scale) / 2;

    for iy in 0..img_height {
        for ix in 0..img_width {
            let pixel = img.get_pixel(ix as u32, iy as u32);
            let color =
                ((pixel[0] as u32) << 16) | ((pixel[1] as u32) << 8) | pixel[2] as u32;

            for sy in 0..scale {
                for sx in 0..scale {
                    let ox = offset_x + ix * scale + sx;
                    let oy = offset_y + iy * scale + sy;
                    if ox < out_width && oy < out_height {
                        buffer[oy * out_width + ox] = color;
                    }
                }
            }
        }
    }

    buffer
}

fn normalize3(x: f32, y: f32, z: f32) -> (f32, f32, f32) {
    let len = (x * x + y * y + z * z).sqrt();
    (x / len, y / len, z / len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colormap_endpoints() {
        // t = 0 is the first control color, t = 1 the last.
        assert_eq!(spectral_colormap(0.0), [94, 79, 163]);
        assert_eq!(spectral_colormap(1.0), [158, 0, 66]);
        // Out-of-range input clamps instead of indexing out of bounds.
        assert_eq!(spectral_colormap(-1.0), spectral_colormap(0.0));
        assert_eq!(spectral_colormap(2.0), spectral_colormap(1.0));
    }

    #[test]
    fn heightmap_render_matches_grid_size() {
        let grid = Grid::new_with(17, 17, 0.5f32);
        let img = render_heightmap(&grid);
        assert_eq!(img.width(), 17);
        assert_eq!(img.height(), 17);
    }

    #[test]
    fn shaded_flat_terrain_is_uniform() {
        // A flat field has no gradients, so every pixel shades identically.
        let grid = Grid::new_with(9, 9, 3.0f32);
        let img = render_terrain_shaded(&grid);
        let first = *img.get_pixel(0, 0);
        for pixel in img.pixels() {
            assert_eq!(*pixel, first);
        }
    }

    #[test]
    fn line_drawing_clips_out_of_bounds() {
        let mut img: RgbImage = ImageBuffer::new(8, 8);
        draw_line(&mut img, -5, -5, 20, 20, [255, 0, 0]);
        // The diagonal inside the image is painted.
        assert_eq!(*img.get_pixel(3, 3), Rgb([255, 0, 0]));
    }

    #[test]
    fn circle_fills_center() {
        let mut img: RgbImage = ImageBuffer::new(16, 16);
        draw_filled_circle(&mut img, 8, 8, 3, [0, 255, 0]);
        assert_eq!(*img.get_pixel(8, 8), Rgb([0, 255, 0]));
        assert_eq!(*img.get_pixel(8, 11), Rgb([0, 255, 0]));
        assert_eq!(*img.get_pixel(0, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn window_buffer_centers_scaled_image() {
        let mut img: RgbImage = ImageBuffer::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 255, 255]));
        let buffer = image_to_window_buffer(&img, 8, 8, 2);
        assert_eq!(buffer.len(), 64);
        // 2x2 image scaled by 2 occupies the centered 4x4 block at (2, 2).
        assert_eq!(buffer[2 * 8 + 2], 0x00FF_FFFF);
        assert_eq!(buffer[0], (5 << 16) | (5 << 8) | 15);
    }
}
