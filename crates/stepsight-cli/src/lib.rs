//! stepsight-cli library root.
//!
//! The binary is a thin shell over these modules so integration tests can
//! drive the commands and the config store directly.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
