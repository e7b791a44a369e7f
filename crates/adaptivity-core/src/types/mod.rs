//! Type system for the adaptivity engine
//!
//! This module contains:
//! - The runtime `Value` type shared by state maps, operators and scripts
//! - Declared variable types and the typed variable wrapper

pub mod value;
pub mod variable;

pub use value::{FlattenedState, Value};
pub use variable::{TypedValue, VariableType};
