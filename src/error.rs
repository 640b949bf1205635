//! Errors raised by the arithmetic core.

use thiserror::Error;

/// A failure raised at the point of computation.
///
/// The core never recovers from these itself. Callers decide how to present
/// them and whether to reset calculator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Math domain error")]
    Domain,
    #[error("Number too large")]
    Overflow,
    #[error("Factorial requires non-negative integer")]
    InvalidFactorialArgument,
}

impl CalcError {
    /// Short message suitable for the result line of the display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::DivisionByZero => "Error: ÷ by 0",
            Self::Domain => "Error: Domain",
            Self::Overflow => "Error: Too large",
            Self::InvalidFactorialArgument => "Error: Invalid !",
        }
    }
}
