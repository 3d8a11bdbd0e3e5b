//! # Pricer Models (L2: Business Logic)
//!
//! Path simulators and structured product payoff rules.
//!
//! This crate provides:
//! - Stochastic path simulators (GBM, Heston with full truncation)
//! - Structured products (autocalls and cliquets) as path → cash-flow rules
//!
//! ## Design Principles
//!
//! - **Enum-based models and products** for static dispatch
//! - **Generic random source**: simulators consume any `NormalSource`
//! - **Validated construction**: invalid parameters fail at build time,
//!   evaluation itself is a pure function of the path

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod instruments;
pub mod models;
