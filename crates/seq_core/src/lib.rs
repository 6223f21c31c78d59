//! Seekable pseudo-random sequences.
//!
//! Everything in this crate hangs off one primitive: a [`Sequence`] maps a
//! 128-bit offset to a 128-bit block in constant time, deterministically in
//! its seed. Consumers carve up the offset space with [`SequenceTag`]s so
//! they can share a single sequence without colliding, and each one
//! re-derives its draws from `(tag, seed, iteration, id)` instead of
//! carrying stream state. That makes every distribution here seekable: the
//! n-th shuffled value or Zipf variate costs the same whether or not you
//! generated the first n - 1.
//!
//! The shipped sequence runs AES-128 over the offset ([`AesSequence`]);
//! [`Permutation`] evaluates a storage-free shuffle of `[0, max)`,
//! [`Zipf`] samples a power-law domain, [`Weighted`] draws biased bits,
//! and [`SequenceSource`] adapts a sequence to `rand::RngCore`.
//!
//! ```
//! use seq_core::{new_permutation, new_sequence};
//!
//! let seq = new_sequence(42);
//! let mut shuffle = new_permutation(52, 0, &seq)?;
//! let first = shuffle.next();
//!
//! // Seeking lands on the same value without replaying the stream.
//! let mut seeked = new_permutation(52, 0, &seq)?;
//! assert_eq!(seeked.nth(0), first);
//! # anyhow::Ok(())
//! ```
//!
//! Nothing in this crate is cryptographically secure; determinism and
//! seekability are the point, secrecy is not.

pub mod offset;
pub mod permutation;
pub mod sequence;
pub mod source;
pub mod weighted;
pub mod word128;
pub mod zipf;

pub use offset::{next_iteration, offset_for, SequenceTag, ITERATION_BITS, ITERATION_LIMIT};
pub use permutation::{new_permutation, Permutation};
pub use sequence::{new_sequence, AesSequence, Sequence};
pub use source::SequenceSource;
pub use weighted::{new_weighted, Weighted};
pub use word128::Word128;
pub use zipf::{new_zipf, Zipf};
