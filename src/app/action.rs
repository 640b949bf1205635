//! Actions a key press can trigger.

use crate::calculator::scientific;
use crate::calculator::{Operation, Operator};
use crate::error::CalcError;

/// A single key press routed into the calculator core.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    /// A digit key, `0` through `9`.
    Digit(char),
    /// The decimal point key.
    Decimal,
    /// A constant key that replaces the current operand.
    Constant(Constant),
    /// All clear.
    Clear,
    /// Remove the last entered character.
    Delete,
    /// An operator or `=`.
    Operation(Operation),
    /// A scientific function applied to the current operand.
    Function(Function),
    MemoryClear,
    MemoryRecall,
    MemoryAdd,
    MemorySubtract,
    /// `(` or `)`. Accepted but has no effect since evaluation has no grouping.
    Parenthesis,
    /// `x^y`. Queues `^`, which folds as an operator without arithmetic
    /// meaning.
    Power,
}

impl Action {
    /// Shorthand for an operator key.
    pub fn operator(symbol: char) -> Self {
        Self::Operation(Operation::Apply(Operator::from_symbol(symbol)))
    }

    pub fn equals() -> Self {
        Self::Operation(Operation::Equals)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn value(&self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }
}

/// Scientific functions available as keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Ln,
    Log,
    Sqrt,
    Square,
    Cube,
    Exp,
    Pow10,
    Factorial,
}

impl Function {
    pub fn apply(&self, x: f64) -> Result<f64, CalcError> {
        match self {
            Self::Sin => Ok(scientific::sin(x)),
            Self::Cos => Ok(scientific::cos(x)),
            Self::Tan => Ok(scientific::tan(x)),
            Self::Ln => scientific::ln(x),
            Self::Log => scientific::log(x),
            Self::Sqrt => scientific::sqrt(x),
            Self::Square => Ok(scientific::square(x)),
            Self::Cube => Ok(scientific::cube(x)),
            Self::Exp => scientific::exp(x),
            Self::Pow10 => scientific::pow10(x),
            Self::Factorial => scientific::factorial(x),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Ln => "ln",
            Self::Log => "log",
            Self::Sqrt => "sqrt",
            Self::Square => "square",
            Self::Cube => "cube",
            Self::Exp => "exp",
            Self::Pow10 => "pow10",
            Self::Factorial => "factorial",
        }
    }
}
