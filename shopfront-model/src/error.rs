use std::fmt::{self, Display};

/// Errors produced by catalogue record validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A required text field was empty.
    MissingField(&'static str),
    /// A price was negative, NaN or infinite.
    InvalidPrice(f64),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::MissingField(field) => {
                write!(f, "missing required field: {field}")
            }
            ModelError::InvalidPrice(price) => {
                write!(f, "invalid price: {price}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
