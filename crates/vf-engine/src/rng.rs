//! Injectable randomness seam
//!
//! The randomizer never talks to a concrete RNG type. It draws through
//! [`RandomSource`], which any [`rand::Rng`] satisfies via the blanket
//! impl, and which tests can satisfy directly with a scripted sequence.

use rand::Rng;

/// Source of uniform randomness for configuration draws.
pub trait RandomSource: Send {
    /// Uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `[0, bound)`. `bound` must be nonzero.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<R: Rng + Send> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        self.random()
    }

    fn next_index(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }
}

/// Scripted randomness for tests. Yields `values` in order for float
/// draws and always picks index 0.
#[cfg(test)]
pub(crate) struct StepRandom {
    values: Vec<f64>,
    cursor: usize,
}

#[cfg(test)]
impl StepRandom {
    pub(crate) fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for StepRandom {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }

    fn next_index(&mut self, _bound: usize) -> usize {
        0
    }
}
