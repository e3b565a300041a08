//! Fixed-width unsigned registers.
//!
//! A register is an ordered run of bits, index 0 being the least
//! significant. Its width is chosen by the caller when it is allocated and
//! never changes afterwards; operations only ever replace its content.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Widest register this crate models.
pub const MAX_WIDTH: u32 = 64;

/// `2^width` for any width up to [`MAX_WIDTH`].
#[inline]
pub const fn modulus_for(width: u32) -> u128 {
    1u128 << width
}

/// An n-bit unsigned register holding a value in `[0, 2^n)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRegister")]
pub struct Register {
    width: u32,
    value: u64,
}

/// Unchecked wire form, validated on the way in.
#[derive(Deserialize)]
struct RawRegister {
    width: u32,
    value: u64,
}

impl TryFrom<RawRegister> for Register {
    type Error = RegisterError;

    fn try_from(raw: RawRegister) -> Result<Self, Self::Error> {
        Register::new(raw.width, raw.value)
    }
}

impl Register {
    /// Create a register of the given width holding `value`.
    pub fn new(width: u32, value: u64) -> Result<Self, RegisterError> {
        check_width(width)?;
        if (value as u128) >= modulus_for(width) {
            return Err(RegisterError::ValueOutOfRange { width, value: value as i128 });
        }
        Ok(Self { width, value })
    }

    /// Create a register with every bit cleared.
    pub fn zero(width: u32) -> Result<Self, RegisterError> {
        Self::new(width, 0)
    }

    /// Build a register from bits given LSB first.
    pub fn from_bits(bits: &[bool]) -> Result<Self, RegisterError> {
        let width = u32::try_from(bits.len())
            .map_err(|_| RegisterError::InvalidWidth(u32::MAX))?;
        check_width(width)?;

        let mut value = 0u64;
        for (i, &bit) in bits.iter().enumerate() {
            if bit {
                value |= 1u64 << i;
            }
        }

        Ok(Self { width, value })
    }

    /// Reduce an exact integer into a register of `width` bits (mod `2^width`).
    ///
    /// Negative values wrap the way a two's-complement register would.
    pub fn wrapping(width: u32, value: i128) -> Result<Self, RegisterError> {
        check_width(width)?;
        Ok(Self { width, value: wrap(width, value) })
    }

    /// Same width, new content reduced mod `2^width`.
    #[inline]
    pub fn with_value(&self, value: i128) -> Self {
        Self { width: self.width, value: wrap(self.width, value) }
    }

    /// Number of bits.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Current integer content.
    #[inline]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// `2^width`, one past the largest representable value.
    #[inline]
    pub const fn modulus(&self) -> u128 {
        modulus_for(self.width)
    }

    /// Largest value this register can hold.
    #[inline]
    pub const fn max_value(&self) -> u64 {
        (self.modulus() - 1) as u64
    }

    /// Get a single bit by index (0 = LSB).
    ///
    /// # Panics
    /// Panics if `index` is not below the register width.
    #[inline]
    pub fn bit(&self, index: u32) -> bool {
        assert!(index < self.width, "bit {} out of range for {}-bit register", index, self.width);
        (self.value >> index) & 1 == 1
    }

    /// All bits, LSB first.
    pub fn bits(&self) -> Vec<bool> {
        (0..self.width).map(|i| self.bit(i)).collect()
    }

    /// Returns true if every bit is clear.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Parse from a bit string written MSB first, like "0b0101" or "0101".
    ///
    /// The number of digits fixes the width. Underscores are ignored.
    pub fn parse(s: &str) -> Result<Self, RegisterError> {
        let s = s.trim();
        let s = s.strip_prefix("0b").unwrap_or(s);

        let mut bits = Vec::with_capacity(s.len());
        for c in s.chars().rev() {
            match c {
                '0' => bits.push(false),
                '1' => bits.push(true),
                '_' => continue,
                _ => return Err(RegisterError::InvalidChar(c)),
            }
        }

        if bits.is_empty() {
            return Err(RegisterError::Empty);
        }
        Self::from_bits(&bits)
    }
}

fn check_width(width: u32) -> Result<(), RegisterError> {
    if width == 0 || width > MAX_WIDTH {
        return Err(RegisterError::InvalidWidth(width));
    }
    Ok(())
}

#[inline]
fn wrap(width: u32, value: i128) -> u64 {
    // modulus_for(64) still fits in i128
    value.rem_euclid(modulus_for(width) as i128) as u64
}

impl fmt::Debug for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Register({} = {})", self, self.value)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0b{:0width$b}", self.value, width = self.width as usize)
    }
}

/// Accepts either the bit form ("0b0101") or "width:value" ("4:5").
impl FromStr for Register {
    type Err = RegisterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once(':') {
            Some((width, value)) => {
                let width = width.trim().parse::<u32>()
                    .map_err(|_| RegisterError::InvalidNumber(width.trim().to_string()))?;
                let value = value.trim().parse::<u64>()
                    .map_err(|_| RegisterError::InvalidNumber(value.trim().to_string()))?;
                Self::new(width, value)
            }
            None => Self::parse(s),
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur when building or parsing registers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("register width {0} outside 1..=64")]
    InvalidWidth(u32),

    #[error("value {value} does not fit in a {width}-bit register")]
    ValueOutOfRange { width: u32, value: i128 },

    #[error("invalid bit character: '{0}' (expected 0 or 1)")]
    InvalidChar(char),

    #[error("invalid number: '{0}'")]
    InvalidNumber(String),

    #[error("empty register literal")]
    Empty,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_register_new_bounds() {
        assert!(Register::new(4, 15).is_ok());
        assert_eq!(
            Register::new(4, 16),
            Err(RegisterError::ValueOutOfRange { width: 4, value: 16 })
        );
        assert_eq!(Register::new(0, 0), Err(RegisterError::InvalidWidth(0)));
        assert_eq!(Register::new(65, 0), Err(RegisterError::InvalidWidth(65)));
        assert_eq!(Register::new(64, u64::MAX).unwrap().max_value(), u64::MAX);
    }

    #[test]
    fn test_bits_are_lsb_first() {
        // bit 1 set => value 2
        let reg = Register::from_bits(&[false, true, false, false, false]).unwrap();
        assert_eq!(reg.width(), 5);
        assert_eq!(reg.value(), 2);
        assert!(reg.bit(1));
        assert!(!reg.bit(0));
        assert_eq!(reg.bits(), vec![false, true, false, false, false]);
    }

    #[test]
    fn test_wrapping() {
        assert_eq!(Register::wrapping(4, 18).unwrap().value(), 2);
        assert_eq!(Register::wrapping(4, -1).unwrap().value(), 15);
        assert_eq!(Register::wrapping(5, -2).unwrap().value(), 30);
        assert_eq!(Register::wrapping(64, -1).unwrap().value(), u64::MAX);

        let reg = Register::new(3, 5).unwrap();
        assert_eq!(reg.with_value(9).value(), 1);
        assert_eq!(reg.with_value(9).width(), 3);
    }

    #[test]
    fn test_display_and_parse() {
        let reg = Register::new(5, 5).unwrap();
        assert_eq!(reg.to_string(), "0b00101");
        assert_eq!(format!("{:?}", reg), "Register(0b00101 = 5)");

        assert_eq!(Register::parse("0b00101").unwrap(), reg);
        assert_eq!(Register::parse("0010_1").unwrap(), reg);
        assert_eq!("5:5".parse::<Register>().unwrap(), reg);
        assert_eq!(Register::parse("0b012"), Err(RegisterError::InvalidChar('2')));
        assert_eq!(Register::parse("0b"), Err(RegisterError::Empty));
        assert!("x:1".parse::<Register>().is_err());
        assert!("3:8".parse::<Register>().is_err());
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        let reg = Register::new(4, 9).unwrap();
        let json = serde_json::to_string(&reg).unwrap();
        assert_eq!(json, r#"{"width":4,"value":9}"#);
        assert_eq!(serde_json::from_str::<Register>(&json).unwrap(), reg);
        assert!(serde_json::from_str::<Register>(r#"{"width":4,"value":16}"#).is_err());
    }

    proptest! {
        #[test]
        fn prop_text_form_round_trips(width in 1u32..=MAX_WIDTH, raw in any::<u64>()) {
            let reg = Register::wrapping(width, raw as i128).unwrap();
            prop_assert_eq!(Register::parse(&reg.to_string()).unwrap(), reg);
        }

        #[test]
        fn prop_wrapping_matches_euclidean_remainder(width in 1u32..=32, value in any::<i64>()) {
            let reg = Register::wrapping(width, value as i128).unwrap();
            let expected = (value as i128).rem_euclid(1i128 << width) as u64;
            prop_assert_eq!(reg.value(), expected);
        }
    }
}
