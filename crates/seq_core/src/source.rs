use rand::{Error, RngCore};

use crate::offset::{offset_for, SequenceTag};
use crate::sequence::Sequence;

/// Adapter exposing a sequence as a [`rand::RngCore`] stream, so the
/// keystream can feed anything in the `rand` ecosystem.
///
/// Draws walk the `RandSource` region of the offset space linearly, one
/// block per two 64-bit outputs. The stream is deterministic in
/// `(sequence seed, source seed)`; unlike the distribution types it is a
/// plain forward-only generator, which is exactly what `RngCore` expects.
pub struct SequenceSource<S> {
    src: S,
    seed: u32,
    id: u64,
    spare: Option<u64>,
}

impl<S: Sequence> SequenceSource<S> {
    pub fn new(seed: u32, src: S) -> Self {
        Self {
            src,
            seed,
            id: 0,
            spare: None,
        }
    }
}

impl<S: Sequence> RngCore for SequenceSource<S> {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        if let Some(word) = self.spare.take() {
            return word;
        }
        let block = self
            .src
            .bits_at(offset_for(SequenceTag::RandSource, self.seed, 0, self.id));
        self.id = self.id.wrapping_add(1);
        self.spare = Some(block.hi());
        block.lo()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let word = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
