//! RNG module - seedable shape drawing
//!
//! Each pool refill draws uniformly from the catalog. The RNG is a simple
//! LCG injected by seed so tests can assert deterministic pool contents.

use arrayvec::ArrayVec;

use crate::core::shapes::{ShapeInstance, CATALOG};
use crate::types::POOL_SIZE;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Current internal state (used to persist the draw sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Draws random shape instances from the catalog
#[derive(Debug, Clone)]
pub struct ShapeDealer {
    rng: SimpleRng,
}

impl ShapeDealer {
    /// Create a new dealer with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw one uniformly random catalog shape
    pub fn draw(&mut self) -> ShapeInstance {
        let idx = self.rng.next_range(CATALOG.len() as u32) as usize;
        ShapeInstance::from_template(&CATALOG[idx])
    }

    /// Deal a full pool of `POOL_SIZE` shapes
    pub fn deal_pool(&mut self) -> ArrayVec<ShapeInstance, POOL_SIZE> {
        let mut pool = ArrayVec::new();
        for _ in 0..POOL_SIZE {
            pool.push(self.draw());
        }
        pool
    }

    /// Current RNG state (for restoring the same draw sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for ShapeDealer {
    fn default() -> Self {
        Self::new(1)
    }
}
