//! Calculator core.
//!
//! This module provides:
//! - The left-to-right arithmetic state machine
//! - Scientific functions over a single operand
//! - Number formatting shared by the display and history
//! - Copying results to the clipboard

mod clipboard;
pub mod format;
pub mod scientific;
mod state;

pub use clipboard::copy_to_clipboard;
pub use state::{Calculator, CalculatorState, Operand, Operation, Operator};
