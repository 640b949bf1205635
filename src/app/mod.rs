//! Application controller.
//!
//! Routes key presses into the calculator, memory and history, turns
//! errors into display messages and produces the [`Screen`] to render.

mod action;
mod keys;

pub use action::{Action, Constant, Function};
pub use keys::{KeyError, parse_key, parse_keys};

use serde::Serialize;

use crate::calculator::format::{format_display, group_digits, number_to_string};
use crate::calculator::{Calculator, Operation, Operator, copy_to_clipboard};
use crate::config::{CalcConfig, DisplayConfig};
use crate::error::CalcError;
use crate::history::History;
use crate::memory::Memory;

/// What the display shows after an action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Screen {
    /// The formatted result line, or an error message.
    pub result: String,
    /// The pending operation, e.g. `12 +`.
    pub expression: String,
    /// Whether `result` is an error message.
    pub is_error: bool,
    /// Whether the memory register holds a value.
    pub memory: bool,
    /// The unformatted current operand.
    #[serde(skip)]
    raw: Option<String>,
}

impl Screen {
    /// Text to place on the clipboard: the raw operand for results, or the
    /// message itself for errors.
    pub fn text_for_clipboard(&self) -> &str {
        self.raw.as_deref().unwrap_or(&self.result)
    }
}

/// The calculator application without any user interface attached.
#[derive(Clone, Debug)]
pub struct App {
    calculator: Calculator,
    memory: Memory,
    history: History,
    display: DisplayConfig,
    copy_on_equals: bool,
    error: Option<CalcError>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(&CalcConfig::default())
    }
}

impl App {
    pub fn new(config: &CalcConfig) -> Self {
        Self {
            calculator: Calculator::new(),
            memory: Memory::new(),
            history: History::new(config.history.max_items),
            display: config.display.clone(),
            copy_on_equals: config.clipboard.copy_on_equals,
            error: None,
        }
    }

    /// Handle one key press.
    ///
    /// A failing action shows its error message and resets the calculator.
    /// Memory and history are left alone.
    pub fn press(&mut self, action: Action) -> Screen {
        self.error = None;

        if let Err(err) = self.apply(action) {
            tracing::warn!("{:?} failed: {}", action, err);
            self.error = Some(err);
            self.calculator.clear();
        }

        self.screen()
    }

    /// Parse a line of keys and press each one in turn.
    ///
    /// Nothing is pressed if any key on the line is unknown.
    pub fn press_keys(&mut self, input: &str) -> Result<Screen, KeyError> {
        let actions = parse_keys(input)?;
        for action in actions {
            self.press(action);
        }
        Ok(self.screen())
    }

    fn apply(&mut self, action: Action) -> Result<(), CalcError> {
        let current = self.calculator.current().value();

        match action {
            Action::Digit(digit) => self.calculator.input_digit(digit),
            Action::Decimal => self.calculator.input_decimal(),
            Action::Constant(constant) => self.calculator.enter_value(constant.value()),
            Action::Clear => self.calculator.clear(),
            Action::Delete => self.calculator.delete(),
            Action::Operation(operation) => self.perform(operation)?,
            Action::Function(function) => {
                let result = function.apply(current)?;
                self.calculator.set_value(result);
            }
            Action::MemoryClear => self.memory.clear(),
            Action::MemoryRecall => self.calculator.set_value(self.memory.recall()),
            Action::MemoryAdd => self.memory.add(&self.calculator.current_text()),
            Action::MemorySubtract => self.memory.subtract(&self.calculator.current_text()),
            Action::Parenthesis => {}
            Action::Power => self
                .calculator
                .perform_operation(Operation::Apply(Operator::Other('^')))?,
        }

        Ok(())
    }

    /// Run an operator key and record completed calculations.
    fn perform(&mut self, operation: Operation) -> Result<(), CalcError> {
        let operand = self.calculator.current_text();
        let pending = self
            .calculator
            .operator()
            .zip(self.calculator.previous_value());

        self.calculator.perform_operation(operation)?;

        if operation == Operation::Equals
            && let Some((operator, previous)) = pending
        {
            let expression = format!("{} {} {}", number_to_string(previous), operator, operand);
            let result = self.calculator.current_text();

            if self.copy_on_equals
                && let Err(err) = copy_to_clipboard(&result)
            {
                tracing::warn!("{:#}", err);
            }
            self.history.add(expression, result);
        }

        Ok(())
    }

    /// Load the result of history entry `index` into the calculator.
    ///
    /// Returns `false` if there is no such entry.
    pub fn load_history(&mut self, index: usize) -> bool {
        match self.history.get(index) {
            Some(entry) => {
                let result = entry.result.clone();
                self.calculator.load_text(&result);
                true
            }
            None => false,
        }
    }

    pub fn screen(&self) -> Screen {
        let state = self.calculator.state();

        if let Some(err) = self.error {
            return Screen {
                result: err.user_message().to_string(),
                expression: String::new(),
                is_error: true,
                memory: self.memory.has_value(),
                raw: None,
            };
        }

        let mut result = format_display(&state.current_value, self.display.max_digits);
        if self.display.group_digits {
            result = group_digits(&result);
        }

        Screen {
            result,
            expression: state.expression,
            is_error: false,
            memory: self.memory.has_value(),
            raw: Some(state.current_value),
        }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }
}
