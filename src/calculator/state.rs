//! The calculator state machine.
//!
//! Evaluation is a strict left-to-right fold: every operator press applies
//! the pending operator to the running result and the operand just entered.
//! There is no precedence and no grouping.

use std::fmt;

use serde::Serialize;

use super::format::{number_to_string, parse_float};
use crate::error::CalcError;

/// The operand currently on the display.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// Text typed by the user, kept verbatim so `0.` and `1.50` survive.
    Entry(String),
    /// A computed number.
    Value(f64),
}

impl Operand {
    /// Text form shown on the display.
    pub fn text(&self) -> String {
        match self {
            Self::Entry(text) => text.clone(),
            Self::Value(value) => number_to_string(*value),
        }
    }

    /// Numeric form used for computation.
    pub fn value(&self) -> f64 {
        match self {
            Self::Entry(text) => parse_float(text),
            Self::Value(value) => *value,
        }
    }
}

impl Default for Operand {
    fn default() -> Self {
        Self::Entry("0".to_string())
    }
}

/// A binary operator awaiting its second operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    /// Any symbol without arithmetic meaning. Folding it yields the second
    /// operand unchanged.
    Other(char),
}

impl Operator {
    /// Map a key symbol to an operator. ASCII `*` and `/` are accepted as
    /// aliases for `×` and `÷`.
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            '+' => Self::Add,
            '-' => Self::Subtract,
            '×' | '*' => Self::Multiply,
            '÷' | '/' => Self::Divide,
            '%' => Self::Modulo,
            other => Self::Other(other),
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
            Self::Modulo => '%',
            Self::Other(symbol) => *symbol,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// What an operator key asks the calculator to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Fold the pending operation, then wait for the next operand of `op`.
    Apply(Operator),
    /// Fold the pending operation and resolve it completely.
    Equals,
}

/// Snapshot handed to the display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CalculatorState {
    pub current_value: String,
    pub expression: String,
}

/// Arithmetic state machine holding the operand being entered, the pending
/// operator and the running result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Calculator {
    current: Operand,
    previous_value: Option<f64>,
    operator: Option<Operator>,
    waiting_for_operand: bool,
    expression: String,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a digit, or start a new operand after an operator.
    ///
    /// Non-digit characters are ignored.
    pub fn input_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() {
            tracing::debug!("Ignoring non-digit input {:?}", digit);
            return;
        }

        if self.waiting_for_operand {
            self.current = Operand::Entry(digit.to_string());
            self.waiting_for_operand = false;
            return;
        }

        let text = self.current.text();
        self.current = if text == "0" {
            Operand::Entry(digit.to_string())
        } else {
            Operand::Entry(format!("{}{}", text, digit))
        };
    }

    /// Append a decimal point unless the operand already has one.
    pub fn input_decimal(&mut self) {
        if self.waiting_for_operand {
            self.current = Operand::Entry("0.".to_string());
            self.waiting_for_operand = false;
            return;
        }

        let text = self.current.text();
        if !text.contains('.') {
            self.current = Operand::Entry(format!("{}.", text));
        }
    }

    /// Reset every field to its initial value.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Remove the last character of the current operand.
    pub fn delete(&mut self) {
        let mut text = self.current.text();
        if text.chars().count() > 1 {
            text.pop();
            self.current = Operand::Entry(text);
        } else {
            self.current = Operand::default();
        }
    }

    /// Fold the pending operation with the current operand, then either
    /// queue `operation` or resolve everything on [`Operation::Equals`].
    ///
    /// On error the state is left as it was before the call.
    pub fn perform_operation(&mut self, operation: Operation) -> Result<(), CalcError> {
        let input_value = self.current.value();

        match (self.previous_value, self.operator) {
            (None, _) => self.previous_value = Some(input_value),
            (Some(previous), Some(operator)) => {
                let result = Self::calculate(operator, previous, input_value)?;
                tracing::debug!(
                    "Folded {} {} {} = {}",
                    previous,
                    operator,
                    input_value,
                    result
                );
                self.current = Operand::Value(result);
                self.previous_value = Some(result);
            }
            (Some(_), None) => {}
        }

        self.waiting_for_operand = true;

        match operation {
            Operation::Apply(operator) => {
                self.operator = Some(operator);
                let previous = self.previous_value.unwrap_or(input_value);
                self.expression = format!("{} {}", number_to_string(previous), operator);
            }
            Operation::Equals => {
                self.operator = None;
                self.previous_value = None;
                self.expression.clear();
            }
        }

        Ok(())
    }

    /// Apply `operator` to `a` and `b`.
    pub fn calculate(operator: Operator, a: f64, b: f64) -> Result<f64, CalcError> {
        match operator {
            Operator::Add => Ok(a + b),
            Operator::Subtract => Ok(a - b),
            Operator::Multiply => Ok(a * b),
            Operator::Divide if b == 0.0 => Err(CalcError::DivisionByZero),
            Operator::Divide => Ok(a / b),
            Operator::Modulo => Ok(a % b),
            Operator::Other(_) => Ok(b),
        }
    }

    /// Replace the current operand with a computed value.
    ///
    /// Whether the next digit starts a new operand is left unchanged.
    pub fn set_value(&mut self, value: f64) {
        self.current = Operand::Value(value);
    }

    /// Enter a complete value, such as a constant, as the current operand.
    pub fn enter_value(&mut self, value: f64) {
        self.current = Operand::Value(value);
        self.waiting_for_operand = false;
    }

    /// Place previously produced result text into the current operand.
    pub fn load_text(&mut self, text: &str) {
        self.current = Operand::Entry(text.to_string());
    }

    pub fn state(&self) -> CalculatorState {
        CalculatorState {
            current_value: self.current.text(),
            expression: self.expression.clone(),
        }
    }

    pub fn current(&self) -> &Operand {
        &self.current
    }

    pub fn current_text(&self) -> String {
        self.current.text()
    }

    pub fn previous_value(&self) -> Option<f64> {
        self.previous_value
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    pub fn is_waiting_for_operand(&self) -> bool {
        self.waiting_for_operand
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enter(calc: &mut Calculator, text: &str) {
        for c in text.chars() {
            if c == '.' {
                calc.input_decimal();
            } else {
                calc.input_digit(c);
            }
        }
    }

    fn evaluate(a: &str, operator: Operator, b: &str) -> Result<String, CalcError> {
        let mut calc = Calculator::new();
        enter(&mut calc, a);
        calc.perform_operation(Operation::Apply(operator))?;
        enter(&mut calc, b);
        calc.perform_operation(Operation::Equals)?;
        Ok(calc.current_text())
    }

    #[test]
    fn test_initial_state() {
        let calc = Calculator::new();
        assert_eq!(calc.current_text(), "0");
        assert_eq!(calc.previous_value(), None);
        assert_eq!(calc.operator(), None);
        assert!(!calc.is_waiting_for_operand());
        assert_eq!(calc.expression(), "");
    }

    #[test]
    fn test_digits_concatenate() {
        let mut calc = Calculator::new();
        enter(&mut calc, "0");
        assert_eq!(calc.current_text(), "0");
        enter(&mut calc, "1205");
        assert_eq!(calc.current_text(), "1205");
    }

    #[test]
    fn test_single_decimal_point() {
        let mut calc = Calculator::new();
        enter(&mut calc, "3.1.4");
        assert_eq!(calc.current_text(), "3.14");

        let mut calc = Calculator::new();
        calc.input_decimal();
        assert_eq!(calc.current_text(), "0.");
    }

    #[test]
    fn test_decimal_starts_new_operand() {
        let mut calc = Calculator::new();
        enter(&mut calc, "7");
        calc.perform_operation(Operation::Apply(Operator::Add)).unwrap();
        calc.input_decimal();
        assert_eq!(calc.current_text(), "0.");
        assert!(!calc.is_waiting_for_operand());
    }

    #[test]
    fn test_binary_operations() {
        assert_eq!(evaluate("2", Operator::Add, "3").unwrap(), "5");
        assert_eq!(evaluate("10", Operator::Subtract, "4").unwrap(), "6");
        assert_eq!(evaluate("5", Operator::Multiply, "2").unwrap(), "10");
        assert_eq!(evaluate("7", Operator::Divide, "2").unwrap(), "3.5");
        assert_eq!(evaluate("10", Operator::Modulo, "3").unwrap(), "1");
        assert_eq!(
            evaluate("0.1", Operator::Add, "0.2").unwrap(),
            "0.30000000000000004"
        );
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            evaluate("8", Operator::Divide, "0"),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_failed_fold_keeps_state() {
        let mut calc = Calculator::new();
        enter(&mut calc, "8");
        calc.perform_operation(Operation::Apply(Operator::Divide)).unwrap();
        enter(&mut calc, "0");
        let before = calc.clone();
        assert!(calc.perform_operation(Operation::Equals).is_err());
        assert_eq!(calc, before);
    }

    #[test]
    fn test_unknown_operator_yields_second_operand() {
        assert_eq!(evaluate("2", Operator::Other('^'), "8").unwrap(), "8");
    }

    #[test]
    fn test_left_to_right_fold() {
        let mut calc = Calculator::new();
        enter(&mut calc, "2");
        calc.perform_operation(Operation::Apply(Operator::Add)).unwrap();
        enter(&mut calc, "3");
        calc.perform_operation(Operation::Apply(Operator::Multiply)).unwrap();
        assert_eq!(calc.current_text(), "5");
        assert_eq!(calc.expression(), "5 ×");
        enter(&mut calc, "4");
        calc.perform_operation(Operation::Equals).unwrap();
        assert_eq!(calc.current_text(), "20");
        assert_eq!(calc.expression(), "");
        assert_eq!(calc.operator(), None);
        assert_eq!(calc.previous_value(), None);
    }

    #[test]
    fn test_pending_expression() {
        let mut calc = Calculator::new();
        enter(&mut calc, "12.50");
        calc.perform_operation(Operation::Apply(Operator::Subtract)).unwrap();
        assert_eq!(calc.expression(), "12.5 -");
        assert_eq!(calc.previous_value(), Some(12.5));
        assert!(calc.is_waiting_for_operand());
        assert_eq!(calc.current_text(), "12.50");
    }

    #[test]
    fn test_repeated_operator_press() {
        let mut calc = Calculator::new();
        enter(&mut calc, "6");
        calc.perform_operation(Operation::Apply(Operator::Add)).unwrap();
        calc.perform_operation(Operation::Apply(Operator::Add)).unwrap();
        assert_eq!(calc.current_text(), "12");
        assert_eq!(calc.previous_value(), Some(12.0));
    }

    #[test]
    fn test_equals_without_pending_operation() {
        let mut calc = Calculator::new();
        enter(&mut calc, "42");
        calc.perform_operation(Operation::Equals).unwrap();
        assert_eq!(calc.current_text(), "42");
        assert_eq!(calc.previous_value(), None);
        assert!(calc.is_waiting_for_operand());
        enter(&mut calc, "7");
        assert_eq!(calc.current_text(), "7");
    }

    #[test]
    fn test_delete() {
        let mut calc = Calculator::new();
        enter(&mut calc, "123");
        calc.delete();
        assert_eq!(calc.current_text(), "12");
        calc.delete();
        calc.delete();
        assert_eq!(calc.current_text(), "0");
        calc.delete();
        assert_eq!(calc.current_text(), "0");
    }

    #[test]
    fn test_delete_computed_value() {
        let mut calc = Calculator::new();
        calc.set_value(-5.0);
        calc.delete();
        assert_eq!(calc.current_text(), "-");
        assert!(calc.current().value().is_nan());
    }

    #[test]
    fn test_clear_restores_initial_state() {
        let mut calc = Calculator::new();
        enter(&mut calc, "9");
        calc.perform_operation(Operation::Apply(Operator::Multiply)).unwrap();
        enter(&mut calc, "3");
        calc.clear();
        assert_eq!(calc, Calculator::new());
        assert_eq!(
            calc.state(),
            CalculatorState {
                current_value: "0".to_string(),
                expression: String::new(),
            }
        );
    }

    #[test]
    fn test_value_hooks() {
        let mut calc = Calculator::new();
        enter(&mut calc, "4");
        calc.perform_operation(Operation::Apply(Operator::Add)).unwrap();
        calc.set_value(2.0);
        assert!(calc.is_waiting_for_operand());
        calc.enter_value(3.0);
        assert!(!calc.is_waiting_for_operand());
        enter(&mut calc, "1");
        assert_eq!(calc.current_text(), "31");

        calc.load_text("0.5");
        assert_eq!(calc.current_text(), "0.5");
    }

    #[test]
    fn test_operator_symbols() {
        assert_eq!(Operator::from_symbol('*'), Operator::Multiply);
        assert_eq!(Operator::from_symbol('÷'), Operator::Divide);
        assert_eq!(Operator::from_symbol('^'), Operator::Other('^'));
        assert_eq!(Operator::Multiply.to_string(), "×");
    }
}
