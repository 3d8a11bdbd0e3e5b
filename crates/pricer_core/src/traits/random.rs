//! Random-source seam for path simulation.
//!
//! Path simulators draw standard normals one at a time and the order in which
//! they do so is part of their observable contract: the same sequence of draws
//! always reproduces the same trajectory. Simulators are generic over
//! [`NormalSource`] so that a seeded PRNG, a replayed scenario, or a
//! partitioned per-batch generator can be plugged in without dynamic dispatch.
//!
//! A source must be owned by exactly one simulation call at a time; sharing
//! one across threads would interleave draw sequences.

/// A stream of independent standard normal (mean 0, variance 1) draws.
pub trait NormalSource {
    /// Returns the next draw in the stream.
    fn next_normal(&mut self) -> f64;
}

impl<R: NormalSource + ?Sized> NormalSource for &mut R {
    #[inline]
    fn next_normal(&mut self) -> f64 {
        (**self).next_normal()
    }
}

/// Replays a fixed sequence of draws.
///
/// Once the sequence is exhausted every further draw is `0.0` (a zero shock),
/// so a short script still yields a well-defined drift-only continuation.
/// [`consumed`](Self::consumed) counts every draw handed out, including
/// those past the end of the script.
///
/// # Examples
///
/// ```
/// use pricer_core::traits::{FixedNormals, NormalSource};
///
/// let mut source = FixedNormals::new(vec![0.5, -1.0]);
/// assert_eq!(source.next_normal(), 0.5);
/// assert_eq!(source.next_normal(), -1.0);
/// assert_eq!(source.next_normal(), 0.0);
/// assert_eq!(source.consumed(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FixedNormals {
    draws: Vec<f64>,
    position: usize,
}

impl FixedNormals {
    /// Creates a source replaying `draws` in order.
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, position: 0 }
    }

    /// A source that only ever returns `0.0`.
    pub fn zeros() -> Self {
        Self::default()
    }

    /// Number of draws handed out so far.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.position
    }

    /// Number of scripted draws not yet handed out.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.draws.len().saturating_sub(self.position)
    }

    /// Rewinds to the start of the script.
    pub fn rewind(&mut self) {
        self.position = 0;
    }
}

impl NormalSource for FixedNormals {
    #[inline]
    fn next_normal(&mut self) -> f64 {
        let draw = self.draws.get(self.position).copied().unwrap_or(0.0);
        self.position += 1;
        draw
    }
}
