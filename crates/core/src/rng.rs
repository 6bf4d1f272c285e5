//! RNG module - seeded randomness and shape generation
//!
//! Random choices never come from an ambient generator: every function takes the
//! `rand::Rng` to draw from, so a seeded [`SimpleRng`] replays a game exactly.
//! Shapes are drawn uniformly from the six standard templates.

use rand::{Rng, RngCore};

use crate::shape::{template, Shape};
use crate::types::{BlockColour, ShapeName};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // a zero state would stay zero
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Current state, usable as a seed to replay from here
    pub fn state(&self) -> u32 {
        self.state
    }

    fn step(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RngCore for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.step());
        let high = u64::from(self.step());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// How a freshly spawned shape is coloured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeColouring {
    /// One random colour for the whole shape
    #[default]
    Uniform,
    /// An independent random colour per block
    PerBlock,
}

pub fn random_colour<R: Rng + ?Sized>(rng: &mut R) -> BlockColour {
    BlockColour::ALL[rng.gen_range(0..BlockColour::ALL.len())]
}

pub fn random_shape_name<R: Rng + ?Sized>(rng: &mut R) -> ShapeName {
    ShapeName::STANDARD[rng.gen_range(0..ShapeName::STANDARD.len())]
}

/// A named shape coloured according to `colouring`
pub fn coloured_shape<R: Rng + ?Sized>(
    name: ShapeName,
    colouring: ShapeColouring,
    rng: &mut R,
) -> Shape {
    match colouring {
        ShapeColouring::Uniform => Shape::standard(name, random_colour(rng)),
        ShapeColouring::PerBlock => {
            let colours = (0..template(name).len())
                .map(|_| random_colour(rng))
                .collect();
            // counts come from the template itself
            Shape::standard_with_colours(name, colours)
                .unwrap_or_else(|_| Shape::standard(name, BlockColour::Red))
        }
    }
}

/// A uniformly random standard shape
pub fn random_shape<R: Rng + ?Sized>(rng: &mut R, colouring: ShapeColouring) -> Shape {
    let name = random_shape_name(rng);
    coloured_shape(name, colouring, rng)
}

/// Shape source with a one-shape preview
#[derive(Debug, Clone)]
pub struct ShapeQueue<R> {
    rng: R,
    colouring: ShapeColouring,
    next: Shape,
}

impl<R: Rng> ShapeQueue<R> {
    pub fn new(mut rng: R, colouring: ShapeColouring) -> Self {
        let next = random_shape(&mut rng, colouring);
        Self {
            rng,
            colouring,
            next,
        }
    }

    /// The shape the next draw returns
    pub fn peek(&self) -> &Shape {
        &self.next
    }

    pub fn draw(&mut self) -> Shape {
        let following = random_shape(&mut self.rng, self.colouring);
        std::mem::replace(&mut self.next, following)
    }

    /// Colouring for shapes generated after the current preview
    pub fn set_colouring(&mut self, colouring: ShapeColouring) {
        self.colouring = colouring;
    }

    pub fn colouring(&self) -> ShapeColouring {
        self.colouring
    }

    /// The generator, for other random choices that must stay in sequence
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl Default for ShapeQueue<SimpleRng> {
    fn default() -> Self {
        Self::new(SimpleRng::default(), ShapeColouring::Uniform)
    }
}
