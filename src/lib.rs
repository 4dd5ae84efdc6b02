//! ghcard library
//!
//! Exposes the lookup flow, cache, and renderers for use in integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
pub mod logging;
pub mod ui;
