//! Seeded randomness for manager recruitment.
//!
//! A SplitMix64 stream: one `u64` of state, so an engine opened with a fixed
//! seed recruits the same managers in the same order.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimRng {
    state: u64,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`, from the high 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Draw an index with probability proportional to its weight.
    ///
    /// Negative weights count as zero. `None` if nothing has weight.
    pub fn weighted_index<I>(&mut self, weights: I) -> Option<usize>
    where
        I: IntoIterator<Item = f64>,
        I::IntoIter: Clone,
    {
        let weights = weights.into_iter();
        let total: f64 = weights.clone().map(|w| w.max(0.0)).sum();
        if !(total > 0.0) {
            return None;
        }
        let mut roll = self.next_f64() * total;
        let mut fallback = None;
        for (i, w) in weights.enumerate().filter(|&(_, w)| w > 0.0) {
            if roll < w {
                return Some(i);
            }
            roll -= w;
            fallback = Some(i);
        }
        fallback
    }
}
