//! Core types for structured product pricing.
//!
//! This module provides:
//! - [`CashFlow`]: An undiscounted payment and its payment time
//! - [`ObservationSchedule`]: Validated, read-only observation times
//! - [`ScheduleError`]: Errors from schedule construction

pub mod cashflow;
pub mod error;
pub mod schedule;

pub use cashflow::{discounted_sum, CashFlow};
pub use error::ScheduleError;
pub use schedule::ObservationSchedule;
