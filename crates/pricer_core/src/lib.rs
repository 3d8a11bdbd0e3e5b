//! # pricer_core: Foundation Types for Structured Product Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the 3-layer architecture, providing:
//! - Cash flow and observation schedule types (`types`)
//! - The market snapshot read by simulators and the pricing driver (`market_data`)
//! - The random-source seam consumed by path simulators (`traits`)
//! - Error types: `ScheduleError`, `MarketDataError` (`types::error`, `market_data::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - thiserror: Structured error types
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::MarketSnapshot;
//! use pricer_core::types::{discounted_sum, CashFlow, ObservationSchedule};
//!
//! let mut market = MarketSnapshot::new(0.03);
//! market.set_quote("SX5E", 100.0, 0.2);
//! let quote = market.quote("SX5E").unwrap();
//! assert_eq!(quote.spot, 100.0);
//!
//! let schedule = ObservationSchedule::new(vec![1.0, 2.0, 3.0]).unwrap();
//! assert_eq!(schedule.maturity(), 3.0);
//!
//! let flows = [CashFlow::new(105.0, 1.0)];
//! let pv = discounted_sum(&flows, market.risk_free_rate());
//! # assert!((pv - 105.0 * (-0.03_f64).exp()).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `CashFlow`, `ObservationSchedule`, `Quote`, `MarketSnapshot`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod traits;
pub mod types;
