use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

use crate::errors::*;
use crate::grid_dimensions::GridDimensions;
use crate::units::{Height, Width};

pub const DEFAULT_MAX_CONSECUTIVE_FAILURES: usize = 5;

/// Everything needed to reproduce one maze generation run.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MazeConfig {
    dimensions: GridDimensions,
    seed: u32,
    max_consecutive_failures: usize,
}

impl MazeConfig {
    #[inline]
    pub fn dimensions(&self) -> &GridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.dimensions.width()
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.dimensions.height()
    }

    #[inline]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// How many tunnel placements in a row may be rejected before a weave maze stops looking
    /// for more. Zero places no tunnels at all.
    #[inline]
    pub fn max_consecutive_failures(&self) -> usize {
        self.max_consecutive_failures
    }

    /// A fresh random source seeded from the config; the same seed always yields the same stream.
    pub fn rng(&self) -> XorShiftRng {
        XorShiftRng::seed_from_u64(u64::from(self.seed))
    }
}

#[derive(Debug, Clone)]
pub struct MazeConfigBuilder {
    width: Width,
    height: Option<Height>,
    seed: Option<u32>,
    max_consecutive_failures: usize,
}

impl MazeConfigBuilder {
    pub fn new(width: Width) -> MazeConfigBuilder {
        MazeConfigBuilder {
            width,
            height: None,
            seed: None,
            max_consecutive_failures: DEFAULT_MAX_CONSECUTIVE_FAILURES,
        }
    }

    /// Defaults to the width.
    pub fn height(mut self, height: Height) -> Self {
        self.height = Some(height);
        self
    }

    /// Defaults to a freshly drawn seed.
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn max_consecutive_failures(mut self, max_consecutive_failures: usize) -> Self {
        self.max_consecutive_failures = max_consecutive_failures;
        self
    }

    pub fn build(self) -> Result<MazeConfig> {
        let height = self.height.unwrap_or(Height(self.width.0));
        let dimensions = GridDimensions::new(self.width, height)?;
        Ok(MazeConfig {
            dimensions,
            seed: self.seed.unwrap_or_else(rand::random),
            max_consecutive_failures: self.max_consecutive_failures,
        })
    }
}
