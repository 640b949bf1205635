//! The memory register.

use crate::calculator::format::parse_float;

/// A single accumulator driven by the M+, M-, MR and MC keys.
///
/// Input is parsed leniently: text that is not a number turns the
/// accumulator into NaN instead of raising an error.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Memory {
    value: f64,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: &str) {
        self.value += parse_float(value);
    }

    pub fn subtract(&mut self, value: &str) {
        self.value -= parse_float(value);
    }

    pub fn recall(&self) -> f64 {
        self.value
    }

    pub fn clear(&mut self) {
        self.value = 0.0;
    }

    /// Whether the register holds anything other than zero.
    pub fn has_value(&self) -> bool {
        self.value != 0.0
    }
}
