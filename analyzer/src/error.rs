//! Analyzer error types.

use kinetic_core::ErrorKind;
use kinetic_parser::{ParseError, Span};
use kinetic_units::ReducedUnit;
use thiserror::Error;

/// Errors raised while binding an expression to registry entities.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Identifier not bound in any visible scope frame.
    #[error("Unresolved symbol '{name}' at line {line}, column {column}")]
    UnresolvedSymbol {
        name: String,
        line: usize,
        column: usize,
    },

    /// Function outside the allow-list.
    #[error("Unknown function '{name}' at line {line}, column {column}")]
    UnknownFunction {
        name: String,
        line: usize,
        column: usize,
    },

    #[error("Function '{name}' called with {found} arguments at line {line}, column {column}")]
    Arity {
        name: String,
        found: usize,
        line: usize,
        column: usize,
    },
}

impl ResolveError {
    pub fn unresolved(name: impl Into<String>, span: Span) -> Self {
        ResolveError::UnresolvedSymbol {
            name: name.into(),
            line: span.line,
            column: span.column,
        }
    }

    pub fn unknown_function(name: impl Into<String>, span: Span) -> Self {
        ResolveError::UnknownFunction {
            name: name.into(),
            line: span.line,
            column: span.column,
        }
    }

    pub fn arity(name: impl Into<String>, found: usize, span: Span) -> Self {
        ResolveError::Arity {
            name: name.into(),
            found,
            line: span.line,
            column: span.column,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::Parse(_) | ResolveError::Arity { .. } => ErrorKind::InvalidExpression,
            ResolveError::UnresolvedSymbol { .. } => ErrorKind::UnresolvedSymbol,
            ResolveError::UnknownFunction { .. } => ErrorKind::UnknownFunction,
        }
    }
}

/// Result type for resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Unit inference failures. All map to [`ErrorKind::IncompatibleUnits`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitCheckError {
    #[error("Operands of '{op}' have incompatible units {left} and {right} at line {line}, column {column}")]
    Operands {
        op: String,
        left: ReducedUnit,
        right: ReducedUnit,
        line: usize,
        column: usize,
    },

    #[error("Exponent must be a constant when the base has unit {base} at line {line}, column {column}")]
    NonConstantExponent {
        base: ReducedUnit,
        line: usize,
        column: usize,
    },

    #[error("Exponent {exponent} does not yield integral dimensions of {base} at line {line}, column {column}")]
    FractionalDimension {
        base: ReducedUnit,
        exponent: f64,
        line: usize,
        column: usize,
    },

    #[error("Argument of '{function}' must be dimensionless, found {unit} at line {line}, column {column}")]
    DimensionedArgument {
        function: String,
        unit: ReducedUnit,
        line: usize,
        column: usize,
    },

    #[error("Unit exponent out of range in '{op}' at line {line}, column {column}")]
    ExponentOutOfRange {
        op: String,
        line: usize,
        column: usize,
    },
}

impl UnitCheckError {
    pub fn operands(op: impl Into<String>, left: ReducedUnit, right: ReducedUnit, span: Span) -> Self {
        UnitCheckError::Operands {
            op: op.into(),
            left,
            right,
            line: span.line,
            column: span.column,
        }
    }

    pub fn non_constant_exponent(base: ReducedUnit, span: Span) -> Self {
        UnitCheckError::NonConstantExponent {
            base,
            line: span.line,
            column: span.column,
        }
    }

    pub fn fractional(base: ReducedUnit, exponent: f64, span: Span) -> Self {
        UnitCheckError::FractionalDimension {
            base,
            exponent,
            line: span.line,
            column: span.column,
        }
    }

    pub fn dimensioned_argument(function: impl Into<String>, unit: ReducedUnit, span: Span) -> Self {
        UnitCheckError::DimensionedArgument {
            function: function.into(),
            unit,
            line: span.line,
            column: span.column,
        }
    }

    pub fn out_of_range(op: impl Into<String>, span: Span) -> Self {
        UnitCheckError::ExponentOutOfRange {
            op: op.into(),
            line: span.line,
            column: span.column,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::IncompatibleUnits
    }
}
