//! Operations on two registers (plus an optional carry or flag).
//!
//! - [`AddQuantum`] - `(a, b[, c]) → (a, a + b[, c'])`
//! - [`SubtractQuantum`] - `(a, b) → (a, b − a)`
//! - [`Comparator`] - `(a, b, f) → (a, b, f ⊕ [b < a])`

use std::fmt;
use crate::ops::OpError;
use crate::register::{CarryState, Register};

/// Add register `a` into register `b`, optionally tracking overflow in a
/// carry register.
///
/// When `a + b` needs more than `n` bits the sum is reduced mod `2^n` and the
/// carry advances one step through [`CarryState::advance`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AddQuantum;

/// Result of [`AddQuantum::map`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sum {
    pub a: u64,
    pub sum: u64,
    pub carry: Option<CarryState>,
    /// Whether the reduction mod `2^n` fired.
    pub overflowed: bool,
}

impl AddQuantum {
    pub fn map(&self, a: &Register, b: &Register, carry: Option<&Register>) -> Result<Sum, OpError> {
        if a.width() != b.width() {
            return Err(OpError::WidthMismatch {
                op: self.to_string(),
                widths: vec![a.width(), b.width()],
            });
        }

        let carry = carry
            .map(|c| CarryState::from_value(c.value()).ok_or_else(|| {
                OpError::precondition(self, format!("carry value {} outside 0..=3", c.value()))
            }))
            .transpose()?;

        let mut sum = u128::from(a.value()) + u128::from(b.value());
        let overflowed = sum >= b.modulus();
        if overflowed {
            sum %= b.modulus();
        }

        Ok(Sum {
            a: a.value(),
            sum: sum as u64,
            carry: carry.map(|c| if overflowed { c.advance() } else { c }),
            overflowed,
        })
    }
}

impl fmt::Display for AddQuantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AddQuantum")
    }
}

/// Subtract register `a` from register `b`.
///
/// The difference is exact and may be negative; it wraps when written back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SubtractQuantum;

impl SubtractQuantum {
    #[inline]
    pub fn map(&self, a: &Register, b: &Register) -> (u64, i128) {
        (a.value(), i128::from(b.value()) - i128::from(a.value()))
    }
}

impl fmt::Display for SubtractQuantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubtractQuantum")
    }
}

/// Toggle a one-bit flag when `b < a`. Ties leave the flag alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Comparator;

impl Comparator {
    pub fn map(&self, a: &Register, b: &Register, flag: &Register) -> Result<(u64, u64, u64), OpError> {
        let f = flag.value();
        if f > 1 {
            return Err(OpError::precondition(self, format!("flag value {} outside 0..=1", f)));
        }

        let f = if b.value() < a.value() { 1 - f } else { f };
        Ok((a.value(), b.value(), f))
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Comparator")
    }
}
