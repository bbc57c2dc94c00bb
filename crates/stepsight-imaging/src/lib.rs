//! stepsight-imaging
//!
//! Client for the external MRI analysis service: upload an image, request
//! its analysis, and fall back to a marked demo result when either step
//! fails.

pub mod client;
pub mod error;
pub mod fallback;
pub mod service;
