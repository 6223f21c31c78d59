use anyhow::{ensure, Result};

use crate::offset::{next_iteration, offset_for, SequenceTag, ITERATION_LIMIT};
use crate::sequence::Sequence;

/// Seekable Zipf-distributed variates in `[0, max)`, where the probability
/// of `k` is proportional to `(v + k)^-q` with `q > 1` and `v >= 1`.
///
/// Sampling is rejection-inversion after Hörmann and Derflinger (1996), the
/// same construction behind most standard-library Zipf generators. The
/// difference here is that the sampler carries no state between draws: the
/// `n`-th variate re-derives its uniforms from the `ZipfU` region of the
/// offset space at id `n`, so it depends only on `(q, v, max, seed, n)` and
/// can be computed in constant time in any order. Rejected candidates retry
/// on the next iteration of the same offset; the expected number of tries
/// per draw is about 1.1.
///
/// All of the floating-point work happens in `f64` with a fixed evaluation
/// order. Reordering the algebra (or letting FMA contract it) can flip rare
/// accept/reject decisions and silently change every stream.
pub struct Zipf<S> {
    src: S,
    seed: u32,
    q: f64,
    v: f64,
    max: f64,
    one_minus_q: f64,
    one_over_one_minus_q: f64,
    h_past_top: f64,
    h_span: f64,
    s: f64,
    idx: u64,
}

impl<S: Sequence> Zipf<S> {
    /// Build a sampler for `(q, v, max)` with its uniforms keyed by `seed`.
    pub fn new(q: f64, v: f64, max: u64, seed: u32, src: S) -> Result<Self> {
        ensure!(
            !q.is_nan() && !v.is_nan(),
            "q ({}) and v ({}) must not be NaN for Zipf distribution",
            q,
            v
        );
        ensure!(
            q > 1.0 && v >= 1.0,
            "need q > 1 (got {}) and v >= 1 (got {}) for Zipf distribution",
            q,
            v
        );
        ensure!(max >= 1, "need max >= 1 (got {}) for Zipf distribution", max);

        let mut zipf = Self {
            src,
            seed,
            q,
            v,
            max: max as f64,
            one_minus_q: 1.0 - q,
            one_over_one_minus_q: 1.0 / (1.0 - q),
            h_past_top: 0.0,
            h_span: 0.0,
            s: 0.0,
            idx: 0,
        };
        let h_x0 = zipf.h(0.5) - (zipf.v.ln() * -zipf.q).exp();
        // Envelope boundary half past the largest value, max - 1. Putting it
        // at max + 0.5 would admit candidates equal to max, which is the
        // stdlib convention for an inclusive domain, not this one.
        zipf.h_past_top = zipf.h(zipf.max - 0.5);
        zipf.h_span = h_x0 - zipf.h_past_top;
        zipf.s = 1.0 - zipf.h_inv(zipf.h(1.5) - ((zipf.v + 1.0).ln() * -zipf.q).exp());
        Ok(zipf)
    }

    // Antiderivative of the continuous envelope density and its inverse.
    fn h(&self, x: f64) -> f64 {
        (self.one_minus_q * (self.v + x).ln()).exp() * self.one_over_one_minus_q
    }

    fn h_inv(&self, x: f64) -> f64 {
        -self.v + (self.one_over_one_minus_q * (self.one_minus_q * x).ln()).exp()
    }

    /// The `n`-th variate of the stream. Also repositions the cursor so a
    /// following `next` returns variate `n + 1`.
    pub fn nth(&mut self, index: u64) -> u64 {
        self.idx = index;
        let mut offset = offset_for(SequenceTag::ZipfU, self.seed, 0, index);
        let mut tries = 0u32;
        loop {
            let block = self.src.bits_at(offset);
            let uniform = (block.lo() & ((1u64 << 53) - 1)) as f64 / (1u64 << 53) as f64;
            let u = self.h_past_top + uniform * self.h_span;
            let x = self.h_inv(u);
            let k = (x + 0.5).floor();
            if k - x <= self.s {
                return k as u64;
            }
            if u >= self.h(k + 0.5) - (-(self.v + k).ln() * self.q).exp() {
                return k as u64;
            }
            tries += 1;
            debug_assert!(tries < ITERATION_LIMIT, "zipf rejection exhausted the iteration field");
            offset = next_iteration(offset);
        }
    }

    /// The variate after the last one requested; variate 1 on a fresh
    /// sampler.
    pub fn next(&mut self) -> u64 {
        self.nth(self.idx + 1)
    }
}

/// Construct a Zipf sampler over a sequence.
pub fn new_zipf<S: Sequence>(q: f64, v: f64, max: u64, seed: u32, src: S) -> Result<Zipf<S>> {
    Zipf::new(q, v, max, seed, src)
}
