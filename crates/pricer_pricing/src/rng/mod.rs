//! # Random Number Generation Infrastructure
//!
//! This module provides the production random source for Monte Carlo
//! simulations.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: All generators are seeded for deterministic sequences
//! - **Partitioning**: Each parallel batch owns a generator derived from
//!   `(seed, batch index)`, so draw sequences never interleave
//! - **Static dispatch**: Implements `pricer_core::traits::NormalSource`;
//!   simulators are generic over it
//!
//! ## British English Convention
//!
//! All documentation in this module uses British English spelling conventions.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::traits::NormalSource;
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::from_seed(12345);
//! let z = rng.next_normal();
//! assert!(z.is_finite());
//! ```

mod prng;

pub use prng::PricerRng;
