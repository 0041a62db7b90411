//! Core domain types shared across the form controllers.

pub mod errors;
pub mod model;
