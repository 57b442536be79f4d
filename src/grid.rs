/// A dense 2D grid of values with clamped (non-wrapping) edges.
#[derive(Clone)]
pub struct Grid<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Grid<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        let idx = self.index(x, y);
        &mut self.data[idx]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Fill the entire grid with a value.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % self.width;
            let y = idx / self.width;
            (x, y, val)
        })
    }

    /// Iterate mutably over all cells with their coordinates.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut T)> {
        let width = self.width;
        self.data.iter_mut().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }
}

impl Grid<f32> {
    /// Minimum and maximum values over the whole grid.
    pub fn min_max(&self) -> (f32, f32) {
        let mut min_val = f32::MAX;
        let mut max_val = f32::MIN;
        for v in &self.data {
            if *v < min_val {
                min_val = *v;
            }
            if *v > max_val {
                max_val = *v;
            }
        }
        (min_val, max_val)
    }

    /// Rescale values to the 0.0-1.0 range. A near-constant grid maps to 0.
    pub fn normalized(&self) -> Grid<f32> {
        let (min_val, max_val) = self.min_max();
        let range = max_val - min_val;
        if range < 1e-6 {
            return Grid::new_with(self.width, self.height, 0.0);
        }

        let mut result = self.clone();
        for v in &mut result.data {
            *v = (*v - min_val) / range;
        }
        result
    }

    /// Sample at fractional coordinates using bilinear interpolation.
    /// Coordinates outside the grid clamp to the nearest edge.
    pub fn sample_bilinear(&self, x: f32, y: f32) -> f32 {
        let x0 = x.floor() as i32;
        let y0 = y.floor() as i32;

        let fx = x - x.floor();
        let fy = y - y.floor();

        let sx0 = x0.clamp(0, self.width as i32 - 1) as usize;
        let sx1 = (x0 + 1).clamp(0, self.width as i32 - 1) as usize;
        let sy0 = y0.clamp(0, self.height as i32 - 1) as usize;
        let sy1 = (y0 + 1).clamp(0, self.height as i32 - 1) as usize;

        let v00 = *self.get(sx0, sy0);
        let v10 = *self.get(sx1, sy0);
        let v01 = *self.get(sx0, sy1);
        let v11 = *self.get(sx1, sy1);

        let v0 = v00 * (1.0 - fx) + v10 * fx;
        let v1 = v01 * (1.0 - fx) + v11 * fx;
        v0 * (1.0 - fy) + v1 * fy
    }

    /// Local gradient magnitude via central differences (used for shading).
    pub fn local_gradient(&self, x: f32, y: f32) -> f32 {
        let delta = 1.0;
        let hx_plus = self.sample_bilinear(x + delta, y);
        let hx_minus = self.sample_bilinear(x - delta, y);
        let hy_plus = self.sample_bilinear(x, y + delta);
        let hy_minus = self.sample_bilinear(x, y - delta);

        let gx = (hx_plus - hx_minus) / (2.0 * delta);
        let gy = (hy_plus - hy_minus) / (2.0 * delta);

        (gx * gx + gy * gy).sqrt()
    }
}
