use std::fmt;

use anyhow::{ensure, Result};
use seq_core::{new_sequence, AesSequence, Permutation};

const SUITS: &[u8] = b"CDHS";
const FACES: &[u8] = b"A23456789TJQK";

/// Cards per deck.
pub const DECK_SIZE: u16 = 52;

/// One card out of a shoe; values 0..52 map to face and suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Card(pub u16);

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= DECK_SIZE {
            return write!(f, "invalid-card-{:04x}", self.0);
        }
        let face = FACES[usize::from(self.0 % 13)] as char;
        let suit = SUITS[usize::from((self.0 / 13) % 4)] as char;
        write!(f, "{}{}", face, suit)
    }
}

/// A shuffled shoe of one or more decks. Cards deal out in permutation
/// order, each exactly once, so every face/suit pair appears once per deck
/// across the full shoe.
pub struct Shuffle {
    dealt: i64,
    max: i64,
    permutation: Permutation<AesSequence>,
}

impl Shuffle {
    /// Shuffle `decks` decks together under `seed`.
    pub fn new(decks: u32, seed: u64) -> Result<Self> {
        ensure!(
            (1..=1_000).contains(&decks),
            "number of decks ({}) must be positive, but under 1000",
            decks
        );
        let max = i64::from(decks) * i64::from(DECK_SIZE);
        let permutation = Permutation::new(max, 0, new_sequence(seed))?;
        Ok(Self {
            dealt: 0,
            max,
            permutation,
        })
    }

    /// Cards not yet dealt.
    pub fn remaining(&self) -> i64 {
        self.max - self.dealt
    }

    /// Deal the next `n` cards.
    pub fn deal(&mut self, n: i64) -> Result<Vec<Card>> {
        ensure!(
            n <= self.remaining(),
            "can't deal {} cards, only {} remaining",
            n,
            self.remaining()
        );
        let mut cards = Vec::with_capacity(n as usize);
        for _ in 0..n {
            let value = self.permutation.next();
            cards.push(Card((value % i64::from(DECK_SIZE)) as u16));
        }
        self.dealt += n;
        Ok(cards)
    }
}
