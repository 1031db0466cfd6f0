//! Injectable randomness for kind selection, invader fire and barrier damage.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::Rng;

/// The only source of randomness the simulation consults.
pub trait RandomSource {
    /// Float in `[0, 1]`. Real generators stay below 1; a scripted source
    /// may return exactly 1.0, which no `chance` call passes.
    fn unit(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;

    /// Uniform integer in `lo..=hi`.
    fn int_inclusive(&mut self, lo: u32, hi: u32) -> u32;

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }
}

impl RandomSource for StdRng {
    fn unit(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn int_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        self.gen_range(lo..=hi)
    }
}

/// Replays a fixed script of values; used to pin exact outcomes in tests.
///
/// Each call pops the next value. `unit` clamps it to `[0, 1]`; `index` and
/// `int_inclusive` reduce it into range. When the script runs dry the
/// fallback value is used for every further call.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback: 0.0,
        }
    }

    /// A source that always yields `value`.
    pub fn constant(value: f64) -> Self {
        Self {
            values: VecDeque::new(),
            fallback: value,
        }
    }

    pub fn with_fallback(mut self, value: f64) -> Self {
        self.fallback = value;
        self
    }

    fn next_value(&mut self) -> f64 {
        self.values.pop_front().unwrap_or(self.fallback)
    }
}

impl RandomSource for ScriptedRandom {
    fn unit(&mut self) -> f64 {
        self.next_value().clamp(0.0, 1.0)
    }

    fn index(&mut self, len: usize) -> usize {
        let v = self.next_value().max(0.0) as usize;
        v % len
    }

    fn int_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        let v = self.next_value().max(0.0) as u32;
        v.clamp(lo, hi)
    }
}
