//! Traits shared across the pricing layers.
//!
//! - [`NormalSource`]: Stream of independent standard normal draws consumed by
//!   path simulators in a fixed, documented order
//! - [`FixedNormals`]: Replays a predetermined draw sequence

pub mod random;

pub use random::{FixedNormals, NormalSource};
