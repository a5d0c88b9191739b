//! Unit algebra errors.

use thiserror::Error;

/// Errors raised while defining, parsing or converting units.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("Undefined base unit '{symbol}'")]
    UndefinedBaseUnit { symbol: String },

    #[error("Incompatible units: {from} cannot be converted to {to}")]
    IncompatibleUnits { from: String, to: String },

    #[error("Invalid unit expression '{input}' at offset {offset}: {message}")]
    Parse {
        input: String,
        offset: usize,
        message: String,
    },

    #[error("Unit '{id}' is already defined")]
    DuplicateUnit { id: String },
}

impl UnitError {
    pub fn undefined_base_unit(symbol: impl Into<String>) -> Self {
        UnitError::UndefinedBaseUnit {
            symbol: symbol.into(),
        }
    }

    pub fn incompatible(from: impl ToString, to: impl ToString) -> Self {
        UnitError::IncompatibleUnits {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn parse(input: &str, offset: usize, message: impl Into<String>) -> Self {
        UnitError::Parse {
            input: input.to_string(),
            offset,
            message: message.into(),
        }
    }
}

/// Result type for unit operations.
pub type UnitResult<T> = Result<T, UnitError>;
