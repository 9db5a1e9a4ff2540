//! Command-line front end for duaa image generation
//!
//! The binary lives in `main.rs`; argument definitions, commands and the
//! rate-limited logger are exposed here so they can be tested.

pub mod cli;
pub mod commands;
pub mod logging;
