//! CLI library components for the rollcall manager.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod render;
