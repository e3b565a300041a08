//! Reversible arithmetic operations over fixed-width registers.
//!
//! Each operation is a pure mapping from a tuple of register values to a
//! tuple of the same arity:
//! - [`constant`] - one register against a constant (`AddConstant`, modular add/multiply)
//! - [`binary`] - two registers (`AddQuantum`, `SubtractQuantum`, `Comparator`)
//! - [`ternary`] - three registers (`QuantumDivision`, `QuantumMultiplication`)
//!
//! [`Operation`] ties them together with equality, hashing, names and inverses.

pub mod constant;
pub mod binary;
pub mod ternary;
mod operation;
mod parse;
mod error;
pub mod verify;

pub use operation::Operation;
pub use parse::{ParseError, OPERATION_NAMES};
pub use error::OpError;
pub use constant::{AddConstant, AddConstantModN, MultiplyByConstantModN};
pub use binary::{AddQuantum, SubtractQuantum, Comparator};
pub use ternary::{QuantumDivision, QuantumMultiplication};
