//! The closed catalogue of operations.
//!
//! [`Operation`] is what a host hands around: it compares and hashes by kind
//! and parameters, has a stable display name, evaluates its mapping on a
//! tuple of registers, and builds its inverse where one exists.

use std::fmt;
use serde::{Serialize, Deserialize};
use tracing::trace;
use crate::ops::{OpError, ParseError};
use crate::ops::constant::{AddConstant, AddConstantModN, MultiplyByConstantModN};
use crate::ops::binary::{AddQuantum, SubtractQuantum, Comparator};
use crate::ops::ternary::{QuantumDivision, QuantumMultiplication};
use crate::register::Register;

/// A reversible arithmetic operation together with its parameters.
///
/// Two operations are equal exactly when they are the same kind with the
/// same parameters, and equal operations hash identically, so an
/// `Operation` can key a rule cache directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Operation {
    AddConstant(AddConstant),
    AddConstantModN(AddConstantModN),
    MultiplyByConstantModN(MultiplyByConstantModN),
    AddQuantum(AddQuantum),
    SubtractQuantum(SubtractQuantum),
    Comparator(Comparator),
    QuantumDivision(QuantumDivision),
    QuantumMultiplication(QuantumMultiplication),
}

impl Operation {
    /// `AddQuantum` with or without a carry register.
    pub const ADD_QUANTUM: Operation = Operation::AddQuantum(AddQuantum);
    pub const SUBTRACT_QUANTUM: Operation = Operation::SubtractQuantum(SubtractQuantum);
    pub const COMPARATOR: Operation = Operation::Comparator(Comparator);
    pub const QUANTUM_DIVISION: Operation = Operation::QuantumDivision(QuantumDivision);
    pub const QUANTUM_MULTIPLICATION: Operation = Operation::QuantumMultiplication(QuantumMultiplication);

    // ==================== Constructors ====================

    pub const fn add_constant(a: i64) -> Self {
        Operation::AddConstant(AddConstant::new(a))
    }

    /// `AddConstant(-a)`.
    pub fn sub_constant(a: i64) -> Result<Self, OpError> {
        AddConstant::subtract(a).map(Operation::AddConstant)
    }

    pub fn add_constant_mod_n(a: u64, n: u64) -> Result<Self, OpError> {
        AddConstantModN::new(a, n).map(Operation::AddConstantModN)
    }

    /// `AddConstantModN(N - a, N)`.
    pub fn sub_constant_mod_n(a: u64, n: u64) -> Result<Self, OpError> {
        AddConstantModN::subtract(a, n).map(Operation::AddConstantModN)
    }

    pub fn multiply_by_constant_mod_n(a: u64, n: u64) -> Result<Self, OpError> {
        MultiplyByConstantModN::new(a, n).map(Operation::MultiplyByConstantModN)
    }

    // ==================== Identity ====================

    /// Stable human-readable name, e.g. `AddConstantModN(3, 5)`.
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Accepted register counts, as shown in error messages.
    pub fn arity(&self) -> &'static str {
        match self {
            Operation::AddConstant(_)
            | Operation::AddConstantModN(_)
            | Operation::MultiplyByConstantModN(_) => "1",
            Operation::AddQuantum(_) => "2 or 3",
            Operation::SubtractQuantum(_) => "2",
            Operation::Comparator(_)
            | Operation::QuantumDivision(_)
            | Operation::QuantumMultiplication(_) => "3",
        }
    }

    // ==================== Inversion ====================

    /// Whether [`Operation::inverse`] can succeed.
    pub fn is_invertible(&self) -> bool {
        matches!(
            self,
            Operation::AddConstant(_)
                | Operation::AddConstantModN(_)
                | Operation::MultiplyByConstantModN(_)
        )
    }

    /// The operation that undoes this one on its valid domain.
    ///
    /// Register-to-register operations declare no inverse and return
    /// [`OpError::NotInvertible`].
    pub fn inverse(&self) -> Result<Operation, OpError> {
        match self {
            Operation::AddConstant(op) => op.inverse().map(Operation::AddConstant),
            Operation::AddConstantModN(op) => Ok(Operation::AddConstantModN(op.inverse())),
            Operation::MultiplyByConstantModN(op) => op.inverse().map(Operation::MultiplyByConstantModN),
            Operation::AddQuantum(_)
            | Operation::SubtractQuantum(_)
            | Operation::Comparator(_)
            | Operation::QuantumDivision(_)
            | Operation::QuantumMultiplication(_) => Err(OpError::NotInvertible(self.name())),
        }
    }

    // ==================== Evaluation ====================

    /// Evaluate the exact mapping on the registers' current values.
    ///
    /// Returns one integer per register. Values are not reduced to the
    /// register widths; see [`Operation::apply`] for that.
    pub fn forward(&self, regs: &[Register]) -> Result<Vec<i128>, OpError> {
        let out = match (self, regs) {
            (Operation::AddConstant(op), [x]) => vec![op.map(x.value())],
            (Operation::AddConstantModN(op), [x]) => vec![i128::from(op.map(x.value())?)],
            (Operation::MultiplyByConstantModN(op), [x]) => vec![i128::from(op.map(x.value())?)],

            (Operation::AddQuantum(op), [a, b]) => {
                let out = op.map(a, b, None)?;
                vec![i128::from(out.a), i128::from(out.sum)]
            }
            (Operation::AddQuantum(op), [a, b, c]) => {
                let out = op.map(a, b, Some(c))?;
                let carry = out.carry.map_or(c.value(), |s| s.value());
                vec![i128::from(out.a), i128::from(out.sum), i128::from(carry)]
            }
            (Operation::SubtractQuantum(op), [a, b]) => {
                let (a, diff) = op.map(a, b);
                vec![i128::from(a), diff]
            }
            (Operation::Comparator(op), [a, b, flag]) => {
                let (a, b, flag) = op.map(a, b, flag)?;
                vec![i128::from(a), i128::from(b), i128::from(flag)]
            }

            (Operation::QuantumDivision(op), [divisor, remainder, dividend]) => {
                let (d, q, r) = op.map(divisor, remainder, dividend)?;
                vec![i128::from(d), q, r]
            }
            (Operation::QuantumMultiplication(op), [a, b, c]) => {
                let (a, b, c) = op.map(a, b, c)?;
                vec![i128::from(a), i128::from(b), c]
            }

            _ => {
                return Err(OpError::ArityMismatch {
                    op: self.name(),
                    expected: self.arity(),
                    got: regs.len(),
                })
            }
        };
        Ok(out)
    }

    /// Evaluate the mapping and write each result back into a register of
    /// the corresponding input's width, wrapping mod `2^n`.
    pub fn apply(&self, regs: &[Register]) -> Result<Vec<Register>, OpError> {
        let values = self.forward(regs)?;
        let out: Vec<Register> = regs.iter()
            .zip(values)
            .map(|(reg, value)| reg.with_value(value))
            .collect();
        trace!(op = %self, input = ?regs, output = ?out, "applied");
        Ok(out)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::AddConstant(op) => op.fmt(f),
            Operation::AddConstantModN(op) => op.fmt(f),
            Operation::MultiplyByConstantModN(op) => op.fmt(f),
            Operation::AddQuantum(op) => op.fmt(f),
            Operation::SubtractQuantum(op) => op.fmt(f),
            Operation::Comparator(op) => op.fmt(f),
            Operation::QuantumDivision(op) => op.fmt(f),
            Operation::QuantumMultiplication(op) => op.fmt(f),
        }
    }
}

impl From<Operation> for String {
    fn from(op: Operation) -> Self {
        op.to_string()
    }
}

impl TryFrom<String> for Operation {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
