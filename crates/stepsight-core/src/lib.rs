//! stepsight-core
//!
//! Pure domain types shared by the StepSight crates: clinical inputs, risk
//! results, image analysis payloads, and the session that holds them.
//! No I/O lives here.

pub mod disclaimer;
pub mod error;
pub mod models;
pub mod session;
