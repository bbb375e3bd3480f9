use nalgebra::Vector3;

/// Color + depth target for one preview frame, linear RGB.
///
/// Frames are rendered one at a time on a single thread (turntable
/// parallelism happens across whole frames), so plain vectors suffice.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    color: Vec<Vector3<f32>>,
    depth: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            color: vec![Vector3::zeros(); width * height],
            depth: vec![f32::INFINITY; width * height],
        }
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Resets every pixel to `color` and clears depth.
    pub fn clear(&mut self, color: Vector3<f32>) {
        self.color.fill(color);
        self.depth.fill(f32::INFINITY);
    }

    /// Vertical gradient clear, `top` at row 0 fading to `bottom`.
    pub fn clear_gradient(&mut self, top: Vector3<f32>, bottom: Vector3<f32>) {
        let denom = (self.height.max(2) - 1) as f32;
        for y in 0..self.height {
            let t = y as f32 / denom;
            let row_color = top * (1.0 - t) + bottom * t;
            let start = y * self.width;
            self.color[start..start + self.width].fill(row_color);
        }
        self.depth.fill(f32::INFINITY);
    }

    /// Depth-tested write: stores the fragment only if it is closer than
    /// what the pixel already holds. Returns whether the write happened.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, depth: f32, color: Vector3<f32>) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = self.index(x, y);
        if depth < self.depth[idx] {
            self.depth[idx] = depth;
            self.color[idx] = color;
            true
        } else {
            false
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Vector3<f32>> {
        if x < self.width && y < self.height {
            Some(self.color[self.index(x, y)])
        } else {
            None
        }
    }

    /// True if any fragment passed the depth test since the last clear.
    pub fn has_geometry(&self) -> bool {
        self.depth.iter().any(|d| d.is_finite())
    }
}
