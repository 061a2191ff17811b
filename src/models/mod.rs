//! Externally supplied runtime models.

pub mod config;
