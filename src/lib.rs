pub mod error;
pub mod io;
pub mod logging;

pub use error::{Error, Result};

/// Square grid of elevations, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElevationMap {
    pub heights: Vec<u8>,
    pub width: usize,
}

impl ElevationMap {
    pub fn new(width: usize) -> Self {
        Self {
            heights: vec![0; width * width],
            width,
        }
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.heights[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, height: u8) {
        let idx = self.index(x, y);
        self.heights[idx] = height;
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        // chunks_exact panics on zero
        self.heights.chunks_exact(self.width.max(1))
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(x < self.width && y < self.width, "({}, {}) out of bounds", x, y);
        y * self.width + x
    }
}
