//! Operations on three registers with cross-register dependencies.

use std::fmt;
use crate::ops::OpError;
use crate::register::Register;

/// Divide `dividend` by `divisor` over three equal-width registers
/// `(divisor, remainder, dividend)`.
///
/// With the remainder register cleared and `divisor ≤ dividend` the result
/// is `(divisor, dividend div divisor, dividend mod divisor)`. A zero
/// divisor, or one larger than the dividend, leaves every register as is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct QuantumDivision;

impl QuantumDivision {
    pub fn map(
        &self,
        divisor: &Register,
        remainder: &Register,
        dividend: &Register,
    ) -> Result<(u64, i128, i128), OpError> {
        let widths = [divisor.width(), remainder.width(), dividend.width()];
        if widths.iter().any(|&w| w != widths[0]) {
            return Err(OpError::WidthMismatch { op: self.to_string(), widths: widths.to_vec() });
        }

        let (d, r, x) = (divisor.value(), remainder.value(), dividend.value());
        if d == 0 || d > x {
            return Ok((d, i128::from(r), i128::from(x)));
        }

        let quotient = i128::from(r) + i128::from(x / d);
        Ok((d, quotient, i128::from(x) - quotient * i128::from(d)))
    }
}

impl fmt::Display for QuantumDivision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuantumDivision")
    }
}

/// Accumulate `a · b` into the product register: `(a, b, c) → (a, b, c + a·b)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct QuantumMultiplication;

impl QuantumMultiplication {
    pub fn map(&self, a: &Register, b: &Register, c: &Register) -> Result<(u64, u64, i128), OpError> {
        let product = u128::from(a.value()) * u128::from(b.value());
        let total = product
            .checked_add(u128::from(c.value()))
            .and_then(|t| i128::try_from(t).ok())
            .ok_or_else(|| OpError::Overflow(self.to_string()))?;
        Ok((a.value(), b.value(), total))
    }
}

impl fmt::Display for QuantumMultiplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuantumMultiplication")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reg(width: u32, value: u64) -> Register {
        Register::new(width, value).unwrap()
    }

    #[test]
    fn test_division() {
        // 7 / 2 = 3 remainder 1
        let out = QuantumDivision.map(&reg(4, 2), &reg(4, 0), &reg(4, 7)).unwrap();
        assert_eq!(out, (2, 3, 1));

        // 9 / 4 = 2 remainder 1
        let out = QuantumDivision.map(&reg(5, 4), &reg(5, 0), &reg(5, 9)).unwrap();
        assert_eq!(out, (4, 2, 1));
    }

    #[test]
    fn test_division_identity_branches() {
        assert_eq!(QuantumDivision.map(&reg(4, 0), &reg(4, 3), &reg(4, 7)).unwrap(), (0, 3, 7));
        assert_eq!(QuantumDivision.map(&reg(4, 9), &reg(4, 0), &reg(4, 7)).unwrap(), (9, 0, 7));
    }

    #[test]
    fn test_division_equal_operands() {
        assert_eq!(QuantumDivision.map(&reg(4, 7), &reg(4, 0), &reg(4, 7)).unwrap(), (7, 1, 0));
    }

    #[test]
    fn test_division_with_nonzero_remainder_register() {
        // quotient = 1 + 7 div 2 = 4, third = 7 - 8 = -1
        let out = QuantumDivision.map(&reg(4, 2), &reg(4, 1), &reg(4, 7)).unwrap();
        assert_eq!(out, (2, 4, -1));
    }

    #[test]
    fn test_division_width_mismatch() {
        assert!(matches!(
            QuantumDivision.map(&reg(4, 2), &reg(3, 0), &reg(4, 7)),
            Err(OpError::WidthMismatch { .. })
        ));
    }

    #[test]
    fn test_multiplication_accumulates() {
        let out = QuantumMultiplication.map(&reg(4, 4), &reg(4, 8), &reg(9, 0)).unwrap();
        assert_eq!(out, (4, 8, 32));
        let out = QuantumMultiplication.map(&reg(4, 4), &reg(4, 8), &reg(9, 32)).unwrap();
        assert_eq!(out, (4, 8, 64));
    }

    #[test]
    fn test_multiplication_overflow() {
        let max = reg(64, u64::MAX);
        assert!(QuantumMultiplication.map(&max, &max, &reg(64, 0)).is_err());
        assert!(QuantumMultiplication.map(&reg(64, 1 << 62), &reg(64, 1 << 62), &reg(64, 0)).is_ok());
    }
}
