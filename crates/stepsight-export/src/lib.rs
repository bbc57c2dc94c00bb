//! stepsight-export
//!
//! Plain-text report generation from Tera templates.

pub mod error;
pub mod render;
pub mod reports;
