//! Terminal user interface for the two forms.

pub mod app;
pub mod components;
