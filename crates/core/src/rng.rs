//! RNG module - seeded piece generation with a short lookahead
//!
//! Draws are uniform over the seven kinds and independent of each other;
//! there is no bag, so repeats and droughts are possible. The generator keeps
//! a FIFO of upcoming kinds so the head can be shown as a "next" preview.

use arrayvec::ArrayVec;

use tetris_duel_types::PieceKind;

/// Maximum number of queued kinds
pub const LOOKAHEAD: usize = 2;

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
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with a
    /// short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Lookahead-bounded random piece source
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    queue: ArrayVec<PieceKind, LOOKAHEAD>,
    rng: SimpleRng,
    seed: u32,
}

impl PieceGenerator {
    /// Create a generator and seed the queue with two random kinds
    pub fn new(seed: u32) -> Self {
        let mut generator = Self {
            queue: ArrayVec::new(),
            rng: SimpleRng::new(seed),
            seed,
        };
        generator.fill();
        generator
    }

    fn random_kind(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }

    fn fill(&mut self) {
        while !self.queue.is_full() {
            let kind = self.random_kind();
            self.queue.push(kind);
        }
    }

    /// Take the head of the queue
    ///
    /// Tops the queue up first whenever it holds one kind or fewer, so a
    /// preview is always available after the draw.
    pub fn draw(&mut self) -> PieceKind {
        if self.queue.len() <= 1 {
            self.fill();
        }
        self.queue.remove(0)
    }

    /// Head of the queue without removing it
    ///
    /// `new` fills the queue and `draw` tops it up before removing, so at
    /// least one kind is always queued.
    pub fn peek_next(&self) -> PieceKind {
        self.queue[0]
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Current queue contents, head first
    pub fn queued(&self) -> &[PieceKind] {
        &self.queue
    }
}
