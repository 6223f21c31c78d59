use std::sync::Arc;

use aes::cipher::{BlockEncrypt, KeyInit};
use aes::Aes128;

use crate::word128::Word128;

/// A seekable source of pseudo-random 128-bit blocks.
///
/// `bits_at` is a pure function of the source's seed and the offset: reading
/// offsets in order behaves like a long PRNG stream, while any single offset
/// can be read in constant time. Implementations must be deterministic
/// across runs and platforms. None of this is suitable for secrecy.
pub trait Sequence {
    /// The 128-bit block at the given offset.
    fn bits_at(&self, offset: Word128) -> Word128;
}

impl<S: Sequence + ?Sized> Sequence for &S {
    fn bits_at(&self, offset: Word128) -> Word128 {
        (**self).bits_at(offset)
    }
}

impl<S: Sequence + ?Sized> Sequence for Arc<S> {
    fn bits_at(&self, offset: Word128) -> Word128 {
        (**self).bits_at(offset)
    }
}

/// The default sequence: AES-128 as a stateless permutation of the offset
/// space, `bits_at(offset) = AES_k(offset)`.
///
/// Distinct offsets give uncorrelated blocks under the usual AES
/// assumptions, which is what lets every consumer treat its slice of the
/// offset space as an independent stream. Because AES is a bijection there
/// are exactly zero block collisions, where a true random stream would
/// expect around one per 2^64 blocks; nothing here cares.
///
/// Two choices are part of the output contract and must never change:
/// the key is the little-endian seed in bytes 0..8 with bytes 8..16 zero,
/// and offsets are serialized with [`Word128::to_le_bytes`].
#[derive(Clone)]
pub struct AesSequence {
    cipher: Aes128,
}

impl AesSequence {
    pub fn new(seed: u64) -> Self {
        let mut key = [0u8; 16];
        key[..8].copy_from_slice(&seed.to_le_bytes());
        Self {
            cipher: Aes128::new(&key.into()),
        }
    }
}

impl Sequence for AesSequence {
    fn bits_at(&self, offset: Word128) -> Word128 {
        let mut block = aes::Block::from(offset.to_le_bytes());
        self.cipher.encrypt_block(&mut block);
        Word128::from_le_bytes(block.into())
    }
}

/// Construct the default AES-backed sequence for a seed.
pub fn new_sequence(seed: u64) -> AesSequence {
    AesSequence::new(seed)
}
