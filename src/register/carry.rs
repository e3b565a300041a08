//! Carry state for register addition.
//!
//! A carry register attached to an addition can sit in one of four states.
//! Each overflowing addition moves it through a fixed transition table:
//! - `0 → 1`
//! - `1 → 0`
//! - `2 → 3`
//! - `3 → 2`

use std::fmt;
use serde::{Serialize, Deserialize};

/// The four carry states, stored as the carry register's integer value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CarryState {
    Zero = 0,
    One = 1,
    Two = 2,
    Three = 3,
}

impl CarryState {
    /// All carry states in ascending order.
    pub const ALL: [CarryState; 4] = [
        CarryState::Zero,
        CarryState::One,
        CarryState::Two,
        CarryState::Three,
    ];

    /// Read a carry state from a register value, if it is one of `0..=3`.
    #[inline]
    pub const fn from_value(value: u64) -> Option<Self> {
        match value {
            0 => Some(CarryState::Zero),
            1 => Some(CarryState::One),
            2 => Some(CarryState::Two),
            3 => Some(CarryState::Three),
            _ => None,
        }
    }

    /// Integer value written back to the carry register.
    #[inline]
    pub const fn value(self) -> u64 {
        self as u64
    }

    /// Next state after an overflowing addition.
    #[inline]
    pub const fn advance(self) -> Self {
        match self {
            CarryState::Zero => CarryState::One,
            CarryState::One => CarryState::Zero,
            CarryState::Two => CarryState::Three,
            CarryState::Three => CarryState::Two,
        }
    }
}

impl Default for CarryState {
    fn default() -> Self {
        CarryState::Zero
    }
}

impl fmt::Display for CarryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        assert_eq!(CarryState::Zero.advance(), CarryState::One);
        assert_eq!(CarryState::One.advance(), CarryState::Zero);
        assert_eq!(CarryState::Two.advance(), CarryState::Three);
        assert_eq!(CarryState::Three.advance(), CarryState::Two);
    }

    #[test]
    fn test_advance_twice_is_identity() {
        for state in CarryState::ALL {
            assert_eq!(state.advance().advance(), state, "advance twice from {:?}", state);
        }
    }

    #[test]
    fn test_value_roundtrip() {
        for state in CarryState::ALL {
            assert_eq!(CarryState::from_value(state.value()), Some(state));
        }
        assert_eq!(CarryState::from_value(4), None);
    }

    #[test]
    fn test_single_bit_carry_toggles() {
        // A one-bit carry register only ever holds 0 or 1.
        assert_eq!(CarryState::from_value(0).map(CarryState::advance), Some(CarryState::One));
        assert_eq!(CarryState::from_value(1).map(CarryState::advance), Some(CarryState::Zero));
    }
}
