//! A desk calculator.
//!
//! The core is a left-to-right arithmetic state machine ([`Calculator`])
//! with scientific functions, a memory register and a bounded history.
//! [`App`] wires them to key presses and produces what a display shows.

pub mod app;
pub mod calculator;
pub mod config;
pub mod converter;
pub mod error;
pub mod history;
pub mod memory;

pub use app::{Action, App, Screen};
pub use calculator::{Calculator, CalculatorState, Operation, Operator};
pub use config::CalcConfig;
pub use error::CalcError;
pub use history::{History, HistoryEntry};
pub use memory::Memory;
