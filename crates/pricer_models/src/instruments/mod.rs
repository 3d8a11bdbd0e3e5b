//! Structured product definitions.
//!
//! This module provides path-dependent structured products that convert a
//! simulated trajectory into an ordered list of cash flows.
//!
//! # Architecture
//!
//! Uses enum dispatch (NOT trait objects) for static dispatch:
//! - [`StructuredProduct`] enum wraps all product types
//! - [`CashFlowProduct`] trait is the single capability (`cash_flows`)
//! - Products are immutable and stateless across evaluations
//!
//! # Product Families
//!
//! - [`autocall`]: Early-redemption products (Simple, StepDown, Airbag,
//!   Phoenix, MemoryPhoenix)
//! - [`cliquet`]: Ratchet products paying once at maturity (CappedCoupon,
//!   MaxReturn)
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::{CashFlow, ObservationSchedule};
//! use pricer_models::instruments::{
//!     AutocallTerms, CashFlowProduct, ContractTerms, SimpleAutocall, StructuredProduct,
//! };
//!
//! let schedule = ObservationSchedule::new(vec![1.0, 2.0, 3.0]).unwrap();
//! let contract = ContractTerms::new("SX5E", schedule, 100.0, 100.0).unwrap();
//! let terms = AutocallTerms::new(contract, 0.05, 80.0).unwrap();
//! let product = StructuredProduct::from(SimpleAutocall::new(terms, 100.0).unwrap());
//!
//! let flows = product.cash_flows(&[90.0, 85.0, 70.0]).unwrap();
//! assert_eq!(flows, vec![CashFlow::new(70.0, 3.0)]);
//! ```

pub mod autocall;
pub mod cliquet;
mod error;
mod product;
mod terms;
mod traits;

pub use autocall::{
    AirbagAutocall, AutocallTerms, MemoryPhoenixAutocall, PhoenixAutocall, SimpleAutocall,
    StepDownAutocall,
};
pub use cliquet::{CappedCouponCliquet, MaxReturnCliquet};
pub use error::InstrumentError;
pub use product::StructuredProduct;
pub use terms::ContractTerms;
pub use traits::CashFlowProduct;
