//! Key parsing for the calculator.
//!
//! Turns a line of typed keys such as `12+7=` or `9 sqrt M+` into
//! [`Action`]s. The whole line is parsed before anything runs, so a typo
//! never leaves the calculator half-updated.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use super::action::{Action, Constant, Function};
use crate::calculator::Operation;

lazy_static! {
    /// Matches one key token at the start of the input.
    /// Multi-character keys come first so `x²` is not read as the word `x`.
    static ref KEY_TOKEN: Regex = Regex::new(
        r"(?i)^(?:m[+\-]|pow10|x²|n!|[a-z]+|π|\d|\.|[+\-*/×÷%=^()!√])"
    ).unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("Unknown key: {0}")]
    Unknown(String),
    #[error("Unexpected character {0:?}")]
    Unexpected(char),
}

/// Parse every key on a line.
pub fn parse_keys(input: &str) -> Result<Vec<Action>, KeyError> {
    let mut actions = Vec::new();
    let mut rest = input.trim_start();

    while let Some(c) = rest.chars().next() {
        let Some(token) = KEY_TOKEN.find(rest) else {
            return Err(KeyError::Unexpected(c));
        };
        actions.push(parse_key(token.as_str())?);
        rest = rest[token.end()..].trim_start();
    }

    Ok(actions)
}

/// Parse a single key token.
pub fn parse_key(token: &str) -> Result<Action, KeyError> {
    let lower = token.to_lowercase();

    let action = match lower.as_str() {
        "." => Action::Decimal,
        "π" | "pi" => Action::Constant(Constant::Pi),
        "e" => Action::Constant(Constant::E),
        "ac" | "esc" | "escape" => Action::Clear,
        "del" | "backspace" => Action::Delete,
        "=" | "enter" => Action::Operation(Operation::Equals),
        "+" | "-" | "*" | "/" | "×" | "÷" | "%" => match lower.chars().next() {
            Some(symbol) => Action::operator(symbol),
            None => return Err(KeyError::Unknown(token.to_string())),
        },
        "^" | "power" => Action::Power,
        "(" | ")" => Action::Parenthesis,
        "mc" => Action::MemoryClear,
        "mr" => Action::MemoryRecall,
        "m+" => Action::MemoryAdd,
        "m-" => Action::MemorySubtract,
        "sin" => Action::Function(Function::Sin),
        "cos" => Action::Function(Function::Cos),
        "tan" => Action::Function(Function::Tan),
        "ln" => Action::Function(Function::Ln),
        "log" => Action::Function(Function::Log),
        "sqrt" | "√" => Action::Function(Function::Sqrt),
        "square" | "x²" => Action::Function(Function::Square),
        "cube" => Action::Function(Function::Cube),
        "exp" => Action::Function(Function::Exp),
        "pow10" => Action::Function(Function::Pow10),
        "factorial" | "n!" | "!" => Action::Function(Function::Factorial),
        digit if digit.len() == 1 && digit.chars().all(|c| c.is_ascii_digit()) => {
            match digit.chars().next() {
                Some(d) => Action::Digit(d),
                None => return Err(KeyError::Unknown(token.to_string())),
            }
        }
        _ => return Err(KeyError::Unknown(token.to_string())),
    };

    Ok(action)
}
