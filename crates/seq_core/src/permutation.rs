use anyhow::{ensure, Result};

use crate::offset::{next_iteration, offset_for, SequenceTag};
use crate::sequence::Sequence;
use crate::word128::Word128;

/// A pseudo-random bijection of `[0, max)` that never materializes itself.
///
/// Storing a shuffled `Vec` costs `max` words; this instead evaluates a
/// fixed network of conditional swaps at whatever input you ask about, after
/// the construction of Goossens and Mikkelsen (arXiv:1208.1176). Each of
/// `6 * bit_length(max)` rounds pairs every value `x` with a partner
/// `(key[r] + max - x) % max` and swaps the pair, or not, according to one
/// pseudo-random bit. Six rounds per bit of `max` is enough mixing for
/// statistical use; the reachable permutations are still a vanishing subset
/// of all `max!`, and none of this resists an adversary.
///
/// Swap keys are drawn from the `PermutationK` region of the offset space
/// (iteration 0, id = round). Decision bits come from the `PermutationF`
/// region: round `r` reads bit `r % 128` of the block at iteration
/// `r / 128`, id = the larger element of the pair, so both elements of a
/// pair consult the same bit. One fetched block therefore serves up to 128
/// consecutive rounds, and the last block is cached across rounds whose
/// pair-maximum happens to repeat.
pub struct Permutation<S> {
    src: S,
    perm_seed: u32,
    max: i64,
    counter: i64,
    rounds: u32,
    keys: Vec<u64>,
    cached_block: Word128,
}

impl<S: Sequence> Permutation<S> {
    /// Build the permutation of `[0, max)` selected by `perm_seed` over the
    /// given sequence. Distinct seeds select distinct shuffles of the same
    /// underlying sequence.
    pub fn new(max: i64, perm_seed: u32, src: S) -> Result<Self> {
        ensure!(max >= 1, "period must be positive");
        let width = max as u64;
        let rounds = 6 * (64 - width.leading_zeros());

        // Accept only the largest multiple of `width` below 2^64, so the
        // modulo cannot favor small keys.
        let max_multiple = (u64::MAX / width) * width;
        let mut keys = Vec::with_capacity(rounds as usize);
        for round in 0..u64::from(rounds) {
            let mut offset = offset_for(SequenceTag::PermutationK, perm_seed, 0, round);
            let mut block = src.bits_at(offset);
            while block.lo() >= max_multiple {
                offset = next_iteration(offset);
                block = src.bits_at(offset);
            }
            keys.push(block.lo() % width);
        }

        Ok(Self {
            src,
            perm_seed,
            max,
            counter: 0,
            rounds,
            keys,
            cached_block: Word128::ZERO,
        })
    }

    /// The size of the permuted domain.
    pub fn max(&self) -> i64 {
        self.max
    }

    /// The next value of the shuffled order; wraps around after `max` calls.
    pub fn next(&mut self) -> i64 {
        self.next_value()
    }

    /// The `n`-th value of the shuffled order, repositioning the cursor so
    /// that `next` continues from `n + 1`. Negative `n` counts back from the
    /// end: `nth(-1)` is the last value.
    pub fn nth(&mut self, n: i64) -> i64 {
        let n = if n < 0 { self.max + (n % self.max) } else { n };
        self.counter = n;
        self.next_value()
    }

    fn next_value(&mut self) -> i64 {
        self.counter = ((self.counter as u64) % (self.max as u64)) as i64;
        let width = self.max as u64;
        let mut x = self.counter as u64;
        self.counter += 1;

        // Sentinel outside [0, width) so the first round always fetches.
        let mut cached_for = width + 1;
        let mut offset = offset_for(SequenceTag::PermutationF, self.perm_seed, 0, 0);
        for round in 0..u64::from(self.rounds) {
            if round > 0 && round & 127 == 0 {
                offset = next_iteration(offset);
                cached_for = width + 1;
            }
            let partner = (self.keys[round as usize] + width - x) % width;
            let pair_max = x.max(partner);
            if pair_max != cached_for {
                self.cached_block = self.src.bits_at(offset.with_lo(pair_max));
                cached_for = pair_max;
            }
            if self.cached_block.bit((round & 127) as u32) != 0 {
                x = partner;
            }
        }
        x as i64
    }
}

/// Construct a permutation of `[0, max)` over a sequence.
pub fn new_permutation<S: Sequence>(max: i64, perm_seed: u32, src: S) -> Result<Permutation<S>> {
    Permutation::new(max, perm_seed, src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::new_sequence;

    #[test]
    fn rejects_non_positive_period() {
        for max in [0i64, -1, -52] {
            let err = Permutation::new(max, 0, new_sequence(0))
                .err()
                .expect("non-positive period must fail");
            assert_eq!(err.to_string(), "period must be positive");
        }
    }

    #[test]
    fn singleton_domain_only_emits_zero() {
        let mut perm = Permutation::new(1, 0, new_sequence(5)).unwrap();
        for _ in 0..10 {
            assert_eq!(perm.next(), 0);
        }
        assert_eq!(perm.nth(0), 0);
        assert_eq!(perm.nth(-1), 0);
    }

    #[test]
    fn two_element_domain_is_a_bijection() {
        for seed in 0..8u32 {
            let mut perm = Permutation::new(2, seed, new_sequence(1)).unwrap();
            let first = perm.next();
            let second = perm.next();
            assert_ne!(first, second);
            assert!(first == 0 || first == 1);
            assert!(second == 0 || second == 1);
        }
    }

    #[test]
    fn cursor_wraps_modularly() {
        let mut perm = Permutation::new(5, 3, new_sequence(9)).unwrap();
        let mut first_cycle = Vec::new();
        for _ in 0..5 {
            first_cycle.push(perm.next());
        }
        let mut second_cycle = Vec::new();
        for _ in 0..5 {
            second_cycle.push(perm.next());
        }
        assert_eq!(first_cycle, second_cycle);
    }

    #[test]
    fn negative_seek_counts_from_the_end() {
        let max = 23i64;
        let mut forward = Permutation::new(max, 0, new_sequence(2)).unwrap();
        let mut backward = Permutation::new(max, 0, new_sequence(2)).unwrap();
        assert_eq!(backward.nth(-1), forward.nth(max - 1));
        assert_eq!(backward.nth(-max), forward.nth(0));

        // nth leaves the cursor just past the sought element, including
        // when the index arrived negative.
        let _ = forward.nth(3);
        let fifth = forward.next();
        assert_eq!(backward.nth(4 - max), fifth);
    }
}
