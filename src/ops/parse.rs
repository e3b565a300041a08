//! Parsing operations back from their display names.
//!
//! Syntax:
//! ```text
//! AddConstant(-3)
//! SubConstant(3)              ; same as AddConstant(-3)
//! AddConstantModN(3, 5)
//! SubConstantModN(3, 5)       ; same as AddConstantModN(2, 5)
//! MultiplyByConstantModN(3, 5)
//! AddQuantum
//! SubtractQuantum
//! Comparator
//! QuantumDivision             ; alias DivideQuantum
//! QuantumMultiplication       ; alias MultiplyQuantum
//! ```
//!
//! Parsed operations go through the validating constructors, so a string
//! naming an operation with bad parameters is rejected.

use std::str::FromStr;
use thiserror::Error;
use crate::ops::{OpError, Operation};

/// Canonical operation names, in catalogue order.
pub const OPERATION_NAMES: [&str; 8] = [
    "AddConstant",
    "AddConstantModN",
    "MultiplyByConstantModN",
    "AddQuantum",
    "SubtractQuantum",
    "Comparator",
    "QuantumDivision",
    "QuantumMultiplication",
];

impl FromStr for Operation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseError::Empty);
        }

        let (name, args) = split_call(s)?;

        match name {
            "AddConstant" => {
                let [a] = signed_args::<1>(name, &args)?;
                Ok(Operation::add_constant(a))
            }
            "SubConstant" => {
                let [a] = signed_args::<1>(name, &args)?;
                Ok(Operation::sub_constant(a)?)
            }
            "AddConstantModN" => {
                let [a, n] = unsigned_args::<2>(name, &args)?;
                Ok(Operation::add_constant_mod_n(a, n)?)
            }
            "SubConstantModN" => {
                let [a, n] = unsigned_args::<2>(name, &args)?;
                Ok(Operation::sub_constant_mod_n(a, n)?)
            }
            "MultiplyByConstantModN" => {
                let [a, n] = unsigned_args::<2>(name, &args)?;
                Ok(Operation::multiply_by_constant_mod_n(a, n)?)
            }
            "AddQuantum" => no_args(name, &args).map(|_| Operation::ADD_QUANTUM),
            "SubtractQuantum" => no_args(name, &args).map(|_| Operation::SUBTRACT_QUANTUM),
            "Comparator" => no_args(name, &args).map(|_| Operation::COMPARATOR),
            "QuantumDivision" | "DivideQuantum" => {
                no_args(name, &args).map(|_| Operation::QUANTUM_DIVISION)
            }
            "QuantumMultiplication" | "MultiplyQuantum" => {
                no_args(name, &args).map(|_| Operation::QUANTUM_MULTIPLICATION)
            }
            _ => Err(ParseError::UnknownOperation(name.to_string())),
        }
    }
}

/// Split `Name(a, b)` into `("Name", ["a", "b"])`. A bare `Name` or `Name()`
/// has no arguments.
fn split_call(s: &str) -> Result<(&str, Vec<&str>), ParseError> {
    let (name, args) = match s.find('(') {
        Some(open) => {
            let inner = s[open + 1..]
                .strip_suffix(')')
                .ok_or_else(|| ParseError::Syntax(format!("missing ')' in '{}'", s)))?;
            if inner.contains('(') || inner.contains(')') {
                return Err(ParseError::Syntax(format!("unbalanced parentheses in '{}'", s)));
            }
            let args: Vec<&str> = if inner.trim().is_empty() {
                Vec::new()
            } else {
                inner.split(',').map(str::trim).collect()
            };
            (s[..open].trim_end(), args)
        }
        None => (s, Vec::new()),
    };

    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ParseError::Syntax(format!("invalid operation name '{}'", name)));
    }
    Ok((name, args))
}

fn no_args(name: &str, args: &[&str]) -> Result<(), ParseError> {
    check_count(name, args, 0)
}

fn signed_args<const N: usize>(name: &str, args: &[&str]) -> Result<[i64; N], ParseError> {
    check_count(name, args, N)?;
    let mut out = [0i64; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg.parse().map_err(|_| ParseError::InvalidNumber(arg.to_string()))?;
    }
    Ok(out)
}

fn unsigned_args<const N: usize>(name: &str, args: &[&str]) -> Result<[u64; N], ParseError> {
    check_count(name, args, N)?;
    let mut out = [0u64; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg.parse().map_err(|_| ParseError::InvalidNumber(arg.to_string()))?;
    }
    Ok(out)
}

fn check_count(name: &str, args: &[&str], expected: usize) -> Result<(), ParseError> {
    if args.len() != expected {
        return Err(ParseError::WrongArgCount {
            name: name.to_string(),
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

/// Errors that can occur when parsing an operation name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty operation name")]
    Empty,

    #[error("unknown operation: '{0}'")]
    UnknownOperation(String),

    #[error("{name} takes {expected} argument(s), got {got}")]
    WrongArgCount { name: String, expected: usize, got: usize },

    #[error("invalid integer argument: '{0}'")]
    InvalidNumber(String),

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error(transparent)]
    Invalid(#[from] OpError),
}
