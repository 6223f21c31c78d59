use crate::offset::next_iteration;
use crate::sequence::Sequence;
use crate::word128::Word128;

/// Biased bitfield generator.
///
/// A single call yields 64 independent bits, each set with probability
/// `weight / scale` where `scale` is a power of two. Conceptually every
/// result bit compares a fresh `k`-bit uniform draw (`k = log2 scale`)
/// against `weight`; the implementation runs all 64 comparisons at once on
/// bit planes, so a call costs `ceil(k/2)` keystream blocks instead of 64.
pub struct Weighted<S> {
    src: S,
}

impl<S: Sequence> Weighted<S> {
    pub fn new(src: S) -> Self {
        Self { src }
    }

    /// 64 bits, each 1 with probability `weight / scale`, deterministic in
    /// `(offset, weight, scale)`.
    ///
    /// `scale` must be a power of two and `weight <= scale`. Plane `j` of
    /// the comparison (bit `j` of each per-column draw) comes from block
    /// `iteration + j/2` of the keystream at `offset`, low word for even
    /// `j`, high word for odd `j`.
    pub fn bits(&self, offset: Word128, weight: u64, scale: u64) -> u64 {
        debug_assert!(scale.is_power_of_two(), "scale must be a power of two");
        debug_assert!(weight <= scale, "weight must not exceed scale");
        if weight >= scale {
            return u64::MAX;
        }
        if weight == 0 {
            return 0;
        }

        let planes_needed = scale.trailing_zeros() as usize;
        let mut planes = [0u64; 64];
        let mut cursor = offset;
        let mut j = 0;
        while j < planes_needed {
            let block = self.src.bits_at(cursor);
            planes[j] = block.lo();
            if j + 1 < planes_needed {
                planes[j + 1] = block.hi();
            }
            cursor = next_iteration(cursor);
            j += 2;
        }

        // Column-wise unsigned compare, most significant plane first: a
        // column is below `weight` exactly when the first differing bit is
        // set in `weight` and clear in the draw.
        let mut below = 0u64;
        let mut undecided = u64::MAX;
        for j in (0..planes_needed).rev() {
            let weight_plane = if (weight >> j) & 1 == 1 { u64::MAX } else { 0 };
            let draw_plane = planes[j];
            below |= undecided & weight_plane & !draw_plane;
            undecided &= !(draw_plane ^ weight_plane);
        }
        below
    }
}

/// Construct a weighted generator over a sequence.
pub fn new_weighted<S: Sequence>(src: S) -> Weighted<S> {
    Weighted::new(src)
}
