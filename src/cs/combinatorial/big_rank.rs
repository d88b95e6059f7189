//! Arbitrary-precision ranks.
//!
//! The `u64` rank functions stop at `n = 20` for permutations and at
//! binomial coefficients below `2^64` for subsets. These variants use
//! [`BigUint`] and follow the same orders: lexicographic for permutations and
//! the combinatorial number system for k-subsets.

use num_bigint::BigUint;
use num_integer::binomial;
use num_traits::{One, ToPrimitive, Zero};

use super::ksubset::ksub_check;
use super::permutation::perm0_check;
use crate::cs::error::{Error, Result};

/// Returns `n!`.
pub fn factorial_big(n: usize) -> BigUint {
    (1..=n).fold(BigUint::one(), |acc, i| acc * BigUint::from(i))
}

/// Lexicographic rank of `p`, as in [`super::permutation::perm0_rank`].
pub fn perm0_rank_big(n: usize, p: &[usize]) -> Result<BigUint> {
    perm0_check(n, p)?;
    // Horner evaluation of the factorial-base Lehmer code.
    let mut rank = BigUint::zero();
    for i in 0..n {
        let digit = p[i + 1..].iter().filter(|&&v| v < p[i]).count();
        rank = rank * BigUint::from(n - i) + BigUint::from(digit);
    }
    Ok(rank + BigUint::one())
}

/// Permutation with lexicographic rank `rank`, for `1 <= rank <= n!`.
pub fn perm0_unrank_big(n: usize, rank: &BigUint) -> Result<Vec<usize>> {
    let total = factorial_big(n);
    if rank.is_zero() || *rank > total {
        return Err(Error::invalid(format!("rank {rank} is outside 1..={total}")));
    }
    let mut remaining = rank - BigUint::one();
    let mut digits = vec![0usize; n];
    for radix in 1..=n {
        let digit = (&remaining % BigUint::from(radix))
            .to_usize()
            .ok_or(Error::Overflow("factorial digit"))?;
        digits[n - radix] = digit;
        remaining /= BigUint::from(radix);
    }
    let mut unused: Vec<usize> = (0..n).collect();
    Ok(digits.into_iter().map(|d| unused.remove(d)).collect())
}

/// Combinatorial-number-system rank of `a`, as in [`super::ksubset::ksub_rank`].
pub fn ksub_rank_big(k: usize, a: &[usize]) -> Result<BigUint> {
    ksub_check(None, k, a)?;
    let rank = a
        .iter()
        .enumerate()
        .map(|(i, &x)| binomial(BigUint::from(x - 1), BigUint::from(i + 1)))
        .fold(BigUint::one(), |acc, term| acc + term);
    Ok(rank)
}

fn choose(c: usize, i: usize) -> BigUint {
    binomial(BigUint::from(c), BigUint::from(i))
}

/// Largest `c >= i - 1` with `C(c, i) <= budget`.
fn largest_with_choose_at_most(i: usize, budget: &BigUint) -> Result<usize> {
    let mut lo = i - 1;
    let mut step = 1usize;
    loop {
        let next = lo
            .checked_add(step)
            .ok_or(Error::Overflow("subset element"))?;
        if choose(next, i) > *budget {
            break;
        }
        lo = next;
        step = step
            .checked_mul(2)
            .ok_or(Error::Overflow("subset element"))?;
    }
    let mut hi = lo + step;
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if choose(mid, i) <= *budget {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Ok(lo)
}

/// The `k`-subset with combinatorial-number-system rank `rank`.
pub fn ksub_unrank_big(k: usize, rank: &BigUint) -> Result<Vec<usize>> {
    if rank.is_zero() {
        return Err(Error::invalid("subset ranks start at 1"));
    }
    if k == 0 {
        if !rank.is_one() {
            return Err(Error::invalid(format!("rank {rank} is outside 1..=1")));
        }
        return Ok(Vec::new());
    }
    let mut remaining = rank - BigUint::one();
    let mut a = vec![0; k];
    for i in (1..=k).rev() {
        let c = largest_with_choose_at_most(i, &remaining)?;
        a[i - 1] = c + 1;
        remaining -= choose(c, i);
    }
    Ok(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::combinatorial::ksubset::{ksub_rank, ksub_unrank};
    use crate::cs::combinatorial::permutation::{perm0_rank, perm0_unrank};

    #[test]
    fn test_factorial_big() {
        assert_eq!(factorial_big(0), BigUint::one());
        assert_eq!(factorial_big(20), BigUint::from(2_432_902_008_176_640_000u64));
        assert_eq!(
            factorial_big(25).to_string(),
            "15511210043330985984000000"
        );
    }

    #[test]
    fn test_perm_agrees_with_u64() {
        for rank in 1..=120u64 {
            let p = perm0_unrank(5, rank).unwrap();
            assert_eq!(perm0_rank_big(5, &p).unwrap(), BigUint::from(rank));
            assert_eq!(perm0_unrank_big(5, &BigUint::from(rank)).unwrap(), p);
            assert_eq!(perm0_rank(5, &p).unwrap(), rank);
        }
    }

    #[test]
    fn test_perm_beyond_u64() {
        let reversed: Vec<usize> = (0..25).rev().collect();
        let total = factorial_big(25);
        assert_eq!(perm0_rank_big(25, &reversed).unwrap(), total);
        assert_eq!(perm0_unrank_big(25, &total).unwrap(), reversed);
        let identity: Vec<usize> = (0..25).collect();
        assert_eq!(perm0_unrank_big(25, &BigUint::one()).unwrap(), identity);
        assert!(perm0_unrank_big(25, &(total + BigUint::one())).is_err());
        assert!(perm0_unrank_big(3, &BigUint::zero()).is_err());
    }

    #[test]
    fn test_ksub_agrees_with_u64() {
        for rank in 1..=56u64 {
            let a = ksub_unrank(3, rank).unwrap();
            assert_eq!(ksub_rank_big(3, &a).unwrap(), BigUint::from(rank));
            assert_eq!(ksub_unrank_big(3, &BigUint::from(rank)).unwrap(), a);
            assert_eq!(ksub_rank(3, &a).unwrap(), rank);
        }
    }

    #[test]
    fn test_ksub_beyond_u64() {
        let last: Vec<usize> = (51..=100).collect();
        let rank = ksub_rank_big(50, &last).unwrap();
        assert_eq!(rank, binomial(BigUint::from(100u32), BigUint::from(50u32)));
        assert_eq!(ksub_unrank_big(50, &rank).unwrap(), last);
    }
}
