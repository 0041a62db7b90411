//! Infrastructure adapters for configuration and host-supplied data.

pub mod bootstrap;
pub mod config;
