//! PropShop: +EV player-prop analyzer
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod input;
pub mod types;
pub mod strategy;
pub mod report;
