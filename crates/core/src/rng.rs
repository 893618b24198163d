//! RNG module - no-repeat piece queue
//!
//! The upcoming queue holds 5 pairwise-distinct kinds. New kinds are drawn
//! uniformly from 1..=7 and redrawn while they already appear anywhere in the
//! queue. With 7 kinds and 5 slots there are always 2 candidates, so rejection
//! sampling terminates.
//!
//! Slot 0 is the kind currently in play; slots 1..5 are the preview.
//!
//! Also provides a simple LCG so games are reproducible from a seed.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, QUEUE_LEN};

/// Source of uniformly distributed piece indices in 1..=7
pub trait KindSource {
    fn next_kind_index(&mut self) -> u8;
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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low LCG bits have short periods; use the high half.
        (self.next_u32() >> 16) % max
    }

    /// Current RNG state (seeds an identical continuation)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl KindSource for SimpleRng {
    fn next_kind_index(&mut self) -> u8 {
        self.next_range(7) as u8 + 1
    }
}

/// Fixed-length lookahead queue of pairwise-distinct kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceQueue {
    slots: [PieceKind; QUEUE_LEN],
}

impl PieceQueue {
    /// Fill all slots, each draw distinct from the slots already filled
    pub fn initialize(source: &mut impl KindSource) -> Self {
        let mut filled: ArrayVec<PieceKind, QUEUE_LEN> = ArrayVec::new();
        while !filled.is_full() {
            let kind = draw_excluding(source, &filled);
            filled.push(kind);
        }
        match filled.into_inner() {
            Ok(slots) => Self { slots },
            Err(_) => unreachable!("queue filled to capacity above"),
        }
    }

    /// Draw a kind not present anywhere in the queue
    pub fn next_kind(&self, source: &mut impl KindSource) -> PieceKind {
        draw_excluding(source, &self.slots)
    }

    /// Shift every slot left (dropping slot 0) and append `new_kind`.
    ///
    /// Returns the discarded kind.
    pub fn advance(&mut self, new_kind: PieceKind) -> PieceKind {
        debug_assert!(!self.contains(new_kind), "{new_kind:?} already queued");
        let dropped = self.slots[0];
        self.slots.rotate_left(1);
        self.slots[QUEUE_LEN - 1] = new_kind;
        dropped
    }

    /// Draw, advance, and return the kind that now leads the queue
    pub fn pull(&mut self, source: &mut impl KindSource) -> PieceKind {
        let kind = self.next_kind(source);
        self.advance(kind);
        self.slots[0]
    }

    pub fn contains(&self, kind: PieceKind) -> bool {
        self.slots.contains(&kind)
    }

    /// Kind in play (slot 0)
    pub fn front(&self) -> PieceKind {
        self.slots[0]
    }

    /// First preview slot
    pub fn next(&self) -> PieceKind {
        self.slots[1]
    }

    pub fn kinds(&self) -> &[PieceKind; QUEUE_LEN] {
        &self.slots
    }

    /// True when no kind appears twice
    pub fn is_distinct(&self) -> bool {
        self.slots
            .iter()
            .enumerate()
            .all(|(i, a)| self.slots[i + 1..].iter().all(|b| a != b))
    }
}

fn draw_excluding(source: &mut impl KindSource, taken: &[PieceKind]) -> PieceKind {
    loop {
        let index = source.next_kind_index();
        // Out-of-range values from a misbehaving source are redrawn too.
        if let Some(kind) = PieceKind::from_index(index) {
            if !taken.contains(&kind) {
                return kind;
            }
        }
    }
}
