//! Checked factorials and binomial coefficients.
//!
//! Ranks in every family are built from these two quantities, so they are
//! computed with overflow checks and report [`Error::Overflow`] instead of
//! wrapping.

use crate::cs::error::{Error, Result};

/// Returns `n!`.
///
/// `20!` is the largest factorial that fits in a `u64`.
pub fn i4_factorial(n: usize) -> Result<u64> {
    (1..=n as u64).try_fold(1u64, |acc, i| {
        acc.checked_mul(i).ok_or(Error::Overflow("factorial"))
    })
}

/// Returns the binomial coefficient `C(n, k)`, or 0 when `k > n`.
///
/// # Example
/// ```
/// use combrank::cs::combinatorial::i4_choose;
///
/// assert_eq!(i4_choose(5, 3).unwrap(), 10);
/// assert_eq!(i4_choose(3, 5).unwrap(), 0);
/// ```
pub fn i4_choose(n: usize, k: usize) -> Result<u64> {
    if k > n {
        return Ok(0);
    }
    let k = k.min(n - k) as u128;
    let n = n as u128;
    let mut value: u128 = 1;
    for i in 1..=k {
        // Each partial product is itself a binomial coefficient C(n-k+i, i).
        value = value * (n - k + i) / i;
        if value > u64::MAX as u128 {
            return Err(Error::Overflow("binomial coefficient"));
        }
    }
    Ok(value as u64)
}

/// Checked `a + b` for rank accumulation.
pub(crate) fn add(a: u64, b: u64) -> Result<u64> {
    a.checked_add(b).ok_or(Error::Overflow("rank"))
}
