//! Application layer orchestrating domain logic and infrastructure.

pub mod ingredients;
pub mod order;
pub mod submit;
