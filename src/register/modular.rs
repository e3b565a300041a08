//! Modular arithmetic helpers for the constant operations.
//!
//! Provides gcd and modular inverses over `u64` moduli. Intermediate
//! products are computed in 128 bits so nothing here can overflow.

/// Greatest common divisor. `gcd(0, 0) == 0`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Returns true if `a` and `n` share no factor other than 1.
#[inline]
pub fn coprime(a: u64, n: u64) -> bool {
    gcd(a, n) == 1
}

/// `(a + b) mod n` without overflow.
///
/// # Panics
/// Panics if `n` is zero.
#[inline]
pub fn add_mod(a: u64, b: u64, n: u64) -> u64 {
    ((a as u128 + b as u128) % n as u128) as u64
}

/// `(a * b) mod n` without overflow.
///
/// # Panics
/// Panics if `n` is zero.
#[inline]
pub fn mul_mod(a: u64, b: u64, n: u64) -> u64 {
    ((a as u128 * b as u128) % n as u128) as u64
}

/// Multiplicative inverse of `a` modulo `n`, via the extended Euclidean
/// algorithm. `None` when `n == 0` or `gcd(a, n) != 1`.
///
/// Every value is its own inverse modulo 1, so `mod_inverse(0, 1) == Some(0)`.
pub fn mod_inverse(a: u64, n: u64) -> Option<u64> {
    if n == 0 {
        return None;
    }
    if n == 1 {
        return Some(0);
    }

    // Invariant: old_r = old_s * a (mod n), r = s * a (mod n)
    let (mut old_r, mut r) = (i128::from(a % n), i128::from(n));
    let (mut old_s, mut s) = (1i128, 0i128);

    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }

    if old_r != 1 {
        return None;
    }
    Some(old_s.rem_euclid(i128::from(n)) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(17, 5), 1);
        assert_eq!(gcd(0, 7), 7);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(gcd(0, 0), 0);
    }

    #[test]
    fn test_mod_inverse_small() {
        assert_eq!(mod_inverse(3, 5), Some(2));
        assert_eq!(mod_inverse(7, 15), Some(13));
        assert_eq!(mod_inverse(1, 2), Some(1));
        assert_eq!(mod_inverse(0, 1), Some(0));
        assert_eq!(mod_inverse(6, 15), None);
        assert_eq!(mod_inverse(0, 5), None);
        assert_eq!(mod_inverse(3, 0), None);
    }

    #[test]
    fn test_wide_moduli_do_not_overflow() {
        let n = u64::MAX;
        assert_eq!(add_mod(n - 1, n - 1, n), n - 2);
        assert_eq!(mul_mod(n - 1, n - 1, n), 1);
        assert_eq!(mod_inverse(n - 1, n), Some(n - 1));
    }

    proptest! {
        #[test]
        fn prop_inverse_multiplies_to_one(n in 2u64..1_000_000, a in any::<u64>()) {
            let a = a % n;
            match mod_inverse(a, n) {
                Some(inv) => {
                    prop_assert!(coprime(a, n));
                    prop_assert_eq!(mul_mod(a, inv, n), 1);
                }
                None => prop_assert!(!coprime(a, n)),
            }
        }
    }
}
