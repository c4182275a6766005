use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

/// Uniform draws in `[0, 1)` consumed by the path generator.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Portable 64-bit LCG. The same seed yields the same stream on every platform.
#[derive(Debug, Clone)]
pub struct SeededSource {
    state: u64,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl RandomSource for SeededSource {
    fn next_unit(&mut self) -> f64 {
        let value = next_u64(&mut self.state);
        (value >> 11) as f64 * UNIT_SCALE
    }
}

const UNIT_SCALE: f64 = 1.0 / (1u64 << 53) as f64;

fn next_u64(state: &mut u64) -> u64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    *state
}

/// Adapter over any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: RngCore> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed cycle of draws. Test-only: the constructor panics on bad input.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

#[cfg(any(test, feature = "test-support"))]
impl SequenceSource {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "sequence must contain at least one draw");
        assert!(
            values.iter().all(|value| (0.0..1.0).contains(value)),
            "sequence draws must lie in [0, 1)"
        );

        Self { values, cursor: 0 }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}
