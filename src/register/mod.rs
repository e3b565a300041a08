//! Register model shared by every operation.
//!
//! This module provides:
//! - [`Register`] - a fixed-width unsigned register (bits LSB first)
//! - [`CarryState`] - the four-state carry attached to register addition
//! - [`modular`] - gcd and modular-inverse helpers

mod value;
mod carry;
pub mod modular;

pub use value::{Register, RegisterError, MAX_WIDTH, modulus_for};
pub use carry::CarryState;
