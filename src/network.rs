//! Network diagram demo: a layered feed-forward net with random weights,
//! drawn as weight-colored edges between circular nodes.

use image::{ImageBuffer, RgbImage};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

use crate::render::{draw_filled_circle, draw_line};

/// Layer sizes and canvas layout for the diagram.
#[derive(Clone, Debug)]
pub struct NetworkParams {
    /// Neurons per layer, input to output.
    pub layers: Vec<usize>,
    /// Node circle radius in pixels.
    pub node_radius: i32,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            layers: vec![6, 10, 8, 4],
            node_radius: 7,
        }
    }
}

/// Node positions per layer, computed for a canvas of the given size.
pub fn layout_nodes(params: &NetworkParams, width: u32, height: u32) -> Vec<Vec<(i32, i32)>> {
    let margin_x = width as f32 * 0.1;
    let margin_y = height as f32 * 0.08;
    let usable_w = width as f32 - 2.0 * margin_x;
    let usable_h = height as f32 - 2.0 * margin_y;

    let layer_count = params.layers.len().max(1);
    params
        .layers
        .iter()
        .enumerate()
        .map(|(li, &count)| {
            let x = if layer_count == 1 {
                width as f32 * 0.5
            } else {
                margin_x + usable_w * li as f32 / (layer_count - 1) as f32
            };
            (0..count)
                .map(|ni| {
                    // Center each column vertically.
                    let y = if count == 1 {
                        height as f32 * 0.5
                    } else {
                        margin_y + usable_h * ni as f32 / (count - 1) as f32
                    };
                    (x as i32, y as i32)
                })
                .collect()
        })
        .collect()
}

/// Random layer-to-layer weight matrices, standard normal entries.
pub fn random_weights(params: &NetworkParams, seed: u64) -> Vec<Vec<Vec<f32>>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    params
        .layers
        .windows(2)
        .map(|pair| {
            (0..pair[0])
                .map(|_| {
                    (0..pair[1])
                        .map(|_| rng.sample::<f32, _>(StandardNormal))
                        .collect()
                })
                .collect()
        })
        .collect()
}

/// Render the diagram: edges first (red positive, blue negative, brightness
/// by magnitude), then nodes on top.
pub fn render_network(params: &NetworkParams, seed: u64, size: u32) -> RgbImage {
    let mut img: RgbImage = ImageBuffer::new(size, size);
    for pixel in img.pixels_mut() {
        *pixel = image::Rgb([10, 10, 14]);
    }

    let nodes = layout_nodes(params, size, size);
    let weights = random_weights(params, seed);

    for (li, matrix) in weights.iter().enumerate() {
        for (from, row) in matrix.iter().enumerate() {
            for (to, &w) in row.iter().enumerate() {
                let (x0, y0) = nodes[li][from];
                let (x1, y1) = nodes[li + 1][to];

                let strength = (w.abs() / 2.0).min(1.0);
                let shade = (40.0 + 180.0 * strength) as u8;
                let color = if w >= 0.0 {
                    [shade, 40, 50]
                } else {
                    [40, 90, shade]
                };
                draw_line(&mut img, x0, y0, x1, y1, color);
            }
        }
    }

    for layer in &nodes {
        for &(x, y) in layer {
            draw_filled_circle(&mut img, x, y, params.node_radius, [230, 230, 235]);
            draw_filled_circle(&mut img, x, y, params.node_radius - 2, [70, 130, 180]);
        }
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_places_all_nodes_inside_canvas() {
        let params = NetworkParams::default();
        let nodes = layout_nodes(&params, 640, 640);
        assert_eq!(nodes.len(), params.layers.len());
        for (layer, &count) in nodes.iter().zip(&params.layers) {
            assert_eq!(layer.len(), count);
            for &(x, y) in layer {
                assert!(x >= 0 && x < 640);
                assert!(y >= 0 && y < 640);
            }
        }
    }

    #[test]
    fn weights_match_layer_shapes() {
        let params = NetworkParams {
            layers: vec![3, 5, 2],
            node_radius: 5,
        };
        let weights = random_weights(&params, 8);
        assert_eq!(weights.len(), 2);
        assert_eq!(weights[0].len(), 3);
        assert_eq!(weights[0][0].len(), 5);
        assert_eq!(weights[1].len(), 5);
        assert_eq!(weights[1][0].len(), 2);
    }

    #[test]
    fn weights_are_seeded() {
        let params = NetworkParams::default();
        let a = random_weights(&params, 21);
        let b = random_weights(&params, 21);
        assert_eq!(a, b);
        let c = random_weights(&params, 22);
        assert_ne!(a, c);
    }

    #[test]
    fn render_draws_nodes() {
        let params = NetworkParams::default();
        let img = render_network(&params, 4, 320);
        let node_pixels = img
            .pixels()
            .filter(|p| p.0 == [70, 130, 180])
            .count();
        assert!(node_pixels > 0);
    }
}
