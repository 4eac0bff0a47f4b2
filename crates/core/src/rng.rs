//! RNG module - where new pieces come from
//!
//! The controller draws every new piece from a [`PieceSource`]. The default
//! source is a seeded LCG that picks uniformly among the seven kinds; tests
//! plug in a [`SequenceSource`] to script exact piece orders.

use crate::types::PieceKind;

/// Supplies the kind of each newly spawned piece
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with
    /// short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl PieceSource for SimpleRng {
    fn next_kind(&mut self) -> PieceKind {
        let index = self.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[index]
    }
}

/// Cycles through a fixed list of kinds
#[derive(Debug, Clone)]
pub struct SequenceSource {
    kinds: Vec<PieceKind>,
    next: usize,
}

impl SequenceSource {
    /// Panics if `kinds` is empty
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let kinds = kinds.into();
        assert!(!kinds.is_empty(), "SequenceSource needs at least one kind");
        Self { kinds, next: 0 }
    }

    /// Always the same kind
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new(vec![kind])
    }
}

impl PieceSource for SequenceSource {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.next];
        self.next = (self.next + 1) % self.kinds.len();
        kind
    }
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}
