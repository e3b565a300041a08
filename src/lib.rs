//! # revmath
//!
//! Reversible fixed-width integer arithmetic.
//!
//! Every operation is a pure function over a tuple of fixed-width unsigned
//! registers (bits stored LSB first). A host that emulates registers in
//! superposition calls the forward mapping on basis-state values, compares
//! operations by kind and parameters to pick a decomposition, and asks for
//! an inverse where one exists.

pub mod register;
pub mod ops;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use register::{Register, RegisterError, CarryState, MAX_WIDTH};
pub use ops::{Operation, OpError, ParseError};
pub use ops::verify::{truth_table, check_round_trip, check_injective, TableRow, Mismatch, Collision};
