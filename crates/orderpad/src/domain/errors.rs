//! Domain-specific errors.

use thiserror::Error;

/// Rejections surfaced to the user when an add action is invalid. The list
/// state is left untouched in every case.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("select a burger and enter a quantity of at least 1")]
    InvalidAddRequest,
    #[error("no burger with id '{0}' in the catalog")]
    UnknownBurger(String),
}
