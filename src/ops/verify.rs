//! Exhaustive checks of an operation's contract over small registers.
//!
//! Every input tuple in the operation's valid domain is enumerated:
//! - modular operations only see register values below `N`
//! - the `AddQuantum` carry register only sees `0..=3`
//! - the `Comparator` flag only sees `0` and `1`
//! - everything else sees the full `[0, 2^n)`

use std::collections::HashMap;
use serde::Serialize;
use tracing::debug;
use crate::ops::{OpError, Operation};
use crate::register::{Register, modulus_for};

/// Largest number of input tuples a single check will enumerate.
pub const DOMAIN_LIMIT: u128 = 1 << 20;

/// One line of a truth table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub input: Vec<u64>,
    pub output: Vec<u64>,
}

/// An input that the inverse failed to restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub input: Vec<u64>,
    pub output: Vec<u64>,
    pub restored: Vec<u64>,
}

/// Two distinct inputs mapped to the same output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub first: Vec<u64>,
    pub second: Vec<u64>,
    pub output: Vec<u64>,
}

/// Every valid input tuple for an operation over registers of fixed widths.
#[derive(Debug, Clone)]
pub struct Domain {
    zeros: Vec<Register>,
    bounds: Vec<u64>,
    len: u64,
}

impl Domain {
    /// Build the domain of `op` for registers of the given widths.
    pub fn new(op: &Operation, widths: &[u32]) -> Result<Self, OpError> {
        let zeros = widths.iter()
            .map(|&w| Register::zero(w))
            .collect::<Result<Vec<_>, _>>()?;

        let bounds: Vec<u128> = widths.iter()
            .enumerate()
            .map(|(i, &w)| input_bound(op, i, w))
            .collect();

        let combinations = bounds.iter().try_fold(1u128, |acc, &b| acc.checked_mul(b));
        let len = match combinations {
            Some(c) if c <= DOMAIN_LIMIT => c as u64,
            Some(c) => return Err(OpError::DomainTooLarge { combinations: c, limit: DOMAIN_LIMIT }),
            None => return Err(OpError::DomainTooLarge { combinations: u128::MAX, limit: DOMAIN_LIMIT }),
        };

        // Each bound is at most `len`, which fits in u64.
        let bounds = bounds.into_iter().map(|b| b as u64).collect();
        Ok(Self { zeros, bounds, len })
    }

    /// Number of input tuples.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Input tuples in mixed-radix order, first register varying fastest.
    pub fn iter(&self) -> impl Iterator<Item = Vec<Register>> + '_ {
        (0..self.len).map(move |mut index| {
            self.zeros.iter()
                .zip(&self.bounds)
                .map(|(zero, &bound)| {
                    let value = index % bound;
                    index /= bound;
                    zero.with_value(i128::from(value))
                })
                .collect()
        })
    }
}

/// Exclusive upper bound on valid values for register `index`.
fn input_bound(op: &Operation, index: usize, width: u32) -> u128 {
    let full = modulus_for(width);
    match (op, index) {
        (Operation::AddConstantModN(op), 0) => full.min(u128::from(op.modulus())),
        (Operation::MultiplyByConstantModN(op), 0) => full.min(u128::from(op.modulus())),
        (Operation::AddQuantum(_), 2) => full.min(4),
        (Operation::Comparator(_), 2) => full.min(2),
        _ => full,
    }
}

fn values(regs: &[Register]) -> Vec<u64> {
    regs.iter().map(Register::value).collect()
}

/// Apply `op` to every valid input.
pub fn truth_table(op: &Operation, widths: &[u32]) -> Result<Vec<TableRow>, OpError> {
    let domain = Domain::new(op, widths)?;
    debug!(op = %op, rows = domain.len(), "building truth table");

    domain.iter()
        .map(|input| {
            let output = op.apply(&input)?;
            Ok(TableRow { input: values(&input), output: values(&output) })
        })
        .collect()
}

/// Find the first valid input that `op.inverse()` does not restore.
///
/// Fails with [`OpError::NotInvertible`] if `op` has no inverse.
pub fn check_round_trip(op: &Operation, widths: &[u32]) -> Result<Option<Mismatch>, OpError> {
    let inverse = op.inverse()?;
    let domain = Domain::new(op, widths)?;
    debug!(op = %op, inverse = %inverse, inputs = domain.len(), "checking round trip");

    for input in domain.iter() {
        let output = op.apply(&input)?;
        let restored = inverse.apply(&output)?;
        if restored != input {
            return Ok(Some(Mismatch {
                input: values(&input),
                output: values(&output),
                restored: values(&restored),
            }));
        }
    }
    Ok(None)
}

/// Find two distinct valid inputs that `op` maps to the same output.
pub fn check_injective(op: &Operation, widths: &[u32]) -> Result<Option<Collision>, OpError> {
    let domain = Domain::new(op, widths)?;
    debug!(op = %op, inputs = domain.len(), "checking injectivity");

    let mut seen: HashMap<Vec<u64>, Vec<u64>> = HashMap::new();
    for input in domain.iter() {
        let output = values(&op.apply(&input)?);
        let input = values(&input);
        if let Some(first) = seen.get(&output) {
            return Ok(Some(Collision { first: first.clone(), second: input, output }));
        }
        seen.insert(output, input);
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_bounds() {
        let op = Operation::add_constant_mod_n(3, 5).unwrap();
        assert_eq!(Domain::new(&op, &[4]).unwrap().len(), 5);
        assert_eq!(Domain::new(&op, &[2]).unwrap().len(), 4);

        assert_eq!(Domain::new(&Operation::ADD_QUANTUM, &[3, 3, 2]).unwrap().len(), 8 * 8 * 4);
        assert_eq!(Domain::new(&Operation::ADD_QUANTUM, &[3, 3, 1]).unwrap().len(), 8 * 8 * 2);
        assert_eq!(Domain::new(&Operation::COMPARATOR, &[3, 3, 4]).unwrap().len(), 8 * 8 * 2);
    }

    #[test]
    fn test_domain_enumeration_order() {
        let domain = Domain::new(&Operation::SUBTRACT_QUANTUM, &[1, 2]).unwrap();
        let tuples: Vec<Vec<u64>> = domain.iter().map(|t| values(&t)).collect();
        assert_eq!(tuples, vec![
            vec![0, 0], vec![1, 0],
            vec![0, 1], vec![1, 1],
            vec![0, 2], vec![1, 2],
            vec![0, 3], vec![1, 3],
        ]);
    }

    #[test]
    fn test_domain_limits() {
        assert!(matches!(
            Domain::new(&Operation::QUANTUM_MULTIPLICATION, &[16, 16, 32]),
            Err(OpError::DomainTooLarge { .. })
        ));
        assert!(matches!(
            Domain::new(&Operation::SUBTRACT_QUANTUM, &[64, 64]),
            Err(OpError::DomainTooLarge { .. })
        ));
        assert!(matches!(
            Domain::new(&Operation::SUBTRACT_QUANTUM, &[0, 4]),
            Err(OpError::Register(_))
        ));
    }

    #[test]
    fn test_round_trip_of_invertible_operations() {
        let cases = [
            (Operation::add_constant(3), 4),
            (Operation::add_constant(-11), 5),
            (Operation::sub_constant(100).unwrap(), 6),
            (Operation::add_constant_mod_n(3, 5).unwrap(), 3),
            (Operation::sub_constant_mod_n(0, 13).unwrap(), 4),
            (Operation::multiply_by_constant_mod_n(7, 15).unwrap(), 4),
            (Operation::multiply_by_constant_mod_n(2, 21).unwrap(), 5),
        ];
        for (op, width) in cases {
            assert_eq!(check_round_trip(&op, &[width]).unwrap(), None, "{} on {} bits", op, width);
        }
    }

    #[test]
    fn test_round_trip_reports_too_narrow_register() {
        // Results up to 99 do not fit in three bits
        let op = Operation::add_constant_mod_n(50, 100).unwrap();
        let mismatch = check_round_trip(&op, &[3]).unwrap().unwrap();
        assert_eq!(mismatch.input, vec![0]);
        assert_eq!(mismatch.output, vec![50 % 8]);
    }

    #[test]
    fn test_round_trip_requires_inverse() {
        assert_eq!(
            check_round_trip(&Operation::ADD_QUANTUM, &[3, 3]),
            Err(OpError::NotInvertible("AddQuantum".into()))
        );
    }

    #[test]
    fn test_register_operations_are_injective() {
        let cases = [
            (Operation::ADD_QUANTUM, vec![3, 3]),
            (Operation::ADD_QUANTUM, vec![3, 3, 1]),
            (Operation::ADD_QUANTUM, vec![3, 3, 2]),
            (Operation::SUBTRACT_QUANTUM, vec![3, 3]),
            (Operation::COMPARATOR, vec![3, 3, 1]),
            (Operation::QUANTUM_MULTIPLICATION, vec![2, 2, 5]),
            (Operation::multiply_by_constant_mod_n(5, 16).unwrap(), vec![4]),
        ];
        for (op, widths) in cases {
            assert_eq!(check_injective(&op, &widths).unwrap(), None, "{} on {:?}", op, widths);
        }
    }

    #[test]
    fn test_division_collides_outside_cleared_remainder() {
        // (2, 0, 7) -> (2, 3, 1), and (2, 3, 1) is left alone since 2 > 1
        let collision = check_injective(&Operation::QUANTUM_DIVISION, &[4, 4, 4]).unwrap();
        assert!(collision.is_some());
    }

    #[test]
    fn test_truth_table() {
        let op = Operation::add_constant_mod_n(1, 3).unwrap();
        let rows = truth_table(&op, &[2]).unwrap();
        assert_eq!(rows, vec![
            TableRow { input: vec![0], output: vec![1] },
            TableRow { input: vec![1], output: vec![2] },
            TableRow { input: vec![2], output: vec![0] },
        ]);
    }

    #[test]
    fn test_truth_table_arity_error() {
        assert!(matches!(
            truth_table(&Operation::COMPARATOR, &[3, 3]),
            Err(OpError::ArityMismatch { .. })
        ));
    }
}
