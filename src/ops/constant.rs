//! Operations on a single register against a compile-time constant.
//!
//! - [`AddConstant`] - `x → x + a` (subtraction is addition of `-a`)
//! - [`AddConstantModN`] - `x → (x + a) mod N`
//! - [`MultiplyByConstantModN`] - `x → (a · x) mod N` with `gcd(a, N) = 1`
//!
//! Parameters are checked when the operation is built and inputs when it is
//! evaluated, so a value of any of these types always satisfies its
//! preconditions.

use std::fmt;
use crate::ops::OpError;
use crate::register::modular::{self, add_mod, mul_mod};

/// Add a constant to a register.
///
/// The mapping is exact integer addition; the result is reduced mod `2^n`
/// when it is written back into an n-bit register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AddConstant {
    a: i64,
}

impl AddConstant {
    /// Add `a` to the register.
    #[inline]
    pub const fn new(a: i64) -> Self {
        Self { a }
    }

    /// Subtract `a` from the register. This is `AddConstant(-a)`, not a
    /// separate operation.
    pub fn subtract(a: i64) -> Result<Self, OpError> {
        a.checked_neg()
            .map(Self::new)
            .ok_or_else(|| OpError::precondition(
                format!("SubConstant({})", a),
                "constant has no 64-bit negation",
            ))
    }

    /// The constant added.
    #[inline]
    pub const fn constant(&self) -> i64 {
        self.a
    }

    /// `x + a`.
    #[inline]
    pub fn map(&self, x: u64) -> i128 {
        i128::from(x) + i128::from(self.a)
    }

    /// `AddConstant(-a)`.
    pub fn inverse(&self) -> Result<Self, OpError> {
        self.a.checked_neg()
            .map(Self::new)
            .ok_or_else(|| OpError::precondition(self, "constant has no 64-bit negation"))
    }
}

impl fmt::Display for AddConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AddConstant({})", self.a)
    }
}

/// Add a constant to a register modulo `N`.
///
/// Preconditions: `N ≥ 1`, `a < N`, and the register value is below `N`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AddConstantModN {
    a: u64,
    n: u64,
}

impl AddConstantModN {
    /// Add `a` modulo `n`.
    pub fn new(a: u64, n: u64) -> Result<Self, OpError> {
        check_modulus(a, n, || format!("AddConstantModN({}, {})", a, n))?;
        Ok(Self { a, n })
    }

    /// Subtract `a` modulo `n`, i.e. `AddConstantModN(n - a, n)`.
    ///
    /// `a == 0` gives `AddConstantModN(0, n)`, the identity.
    pub fn subtract(a: u64, n: u64) -> Result<Self, OpError> {
        check_modulus(a, n, || format!("SubConstantModN({}, {})", a, n))?;
        Ok(Self { a: (n - a) % n, n })
    }

    /// The constant added.
    #[inline]
    pub const fn constant(&self) -> u64 {
        self.a
    }

    /// The modulus `N`.
    #[inline]
    pub const fn modulus(&self) -> u64 {
        self.n
    }

    /// `(x + a) mod N`. Fails if `x ≥ N`.
    pub fn map(&self, x: u64) -> Result<u64, OpError> {
        check_input(self, x, self.n)?;
        Ok(add_mod(x, self.a, self.n))
    }

    /// `AddConstantModN(N - a, N)`, reduced so that `a == 0` stays the identity.
    #[inline]
    pub fn inverse(&self) -> Self {
        Self { a: (self.n - self.a) % self.n, n: self.n }
    }
}

impl fmt::Display for AddConstantModN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AddConstantModN({}, {})", self.a, self.n)
    }
}

/// Multiply a register by a constant modulo `N`.
///
/// Preconditions: `N ≥ 1`, `a < N`, `gcd(a, N) = 1`, and the register value
/// is below `N`. Under these the mapping is a bijection on `[0, N)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MultiplyByConstantModN {
    a: u64,
    n: u64,
}

impl MultiplyByConstantModN {
    /// Multiply by `a` modulo `n`.
    pub fn new(a: u64, n: u64) -> Result<Self, OpError> {
        let name = || format!("MultiplyByConstantModN({}, {})", a, n);
        check_modulus(a, n, name)?;

        let g = modular::gcd(a, n);
        if g != 1 {
            return Err(OpError::precondition(name(), format!("gcd({}, {}) = {}, must be 1", a, n, g)));
        }
        Ok(Self { a, n })
    }

    /// The constant multiplier.
    #[inline]
    pub const fn constant(&self) -> u64 {
        self.a
    }

    /// The modulus `N`.
    #[inline]
    pub const fn modulus(&self) -> u64 {
        self.n
    }

    /// `(a · x) mod N`. Fails if `x ≥ N`.
    pub fn map(&self, x: u64) -> Result<u64, OpError> {
        check_input(self, x, self.n)?;
        Ok(mul_mod(self.a, x, self.n))
    }

    /// Multiplication by `a⁻¹ mod N`.
    pub fn inverse(&self) -> Result<Self, OpError> {
        let inv = modular::mod_inverse(self.a, self.n)
            .ok_or_else(|| OpError::precondition(self, "constant has no inverse modulo N"))?;
        Ok(Self { a: inv, n: self.n })
    }
}

impl fmt::Display for MultiplyByConstantModN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MultiplyByConstantModN({}, {})", self.a, self.n)
    }
}

fn check_modulus(a: u64, n: u64, name: impl Fn() -> String) -> Result<(), OpError> {
    if n == 0 {
        return Err(OpError::precondition(name(), "modulus N must be at least 1"));
    }
    if a >= n {
        return Err(OpError::precondition(name(), format!("constant {} must be below N = {}", a, n)));
    }
    Ok(())
}

fn check_input(op: &impl fmt::Display, x: u64, n: u64) -> Result<(), OpError> {
    if x >= n {
        return Err(OpError::precondition(op, format!("input {} must be below N = {}", x, n)));
    }
    Ok(())
}
