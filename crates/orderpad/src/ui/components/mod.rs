//! Collection of reusable TUI components.

pub mod catalog;
pub mod chip_list;
pub mod line_items;
