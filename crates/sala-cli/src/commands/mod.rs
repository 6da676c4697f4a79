//! CLI command implementations.

pub mod common;
pub mod config;
pub mod modes;
pub mod reverb;
pub mod sum;
