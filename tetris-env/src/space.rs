use ndarray::ArrayView2;
use rand::Rng;

/// `n` mutually exclusive choices, `0..n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discrete {
    n: usize,
}

impl Discrete {
    pub const fn new(n: usize) -> Self {
        Self { n }
    }

    pub const fn n(&self) -> usize {
        self.n
    }

    pub const fn contains(&self, value: usize) -> bool {
        value < self.n
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.random_range(0..self.n)
    }
}

/// Fixed-shape grid of 0/1 values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiBinary {
    shape: (usize, usize),
}

impl MultiBinary {
    pub const fn new(height: usize, width: usize) -> Self {
        Self {
            shape: (height, width),
        }
    }

    pub const fn shape(&self) -> (usize, usize) {
        self.shape
    }

    pub fn contains(&self, value: ArrayView2<'_, u8>) -> bool {
        value.dim() == self.shape && value.iter().all(|v| *v <= 1)
    }
}
