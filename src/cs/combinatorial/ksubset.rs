//! K-element subsets of `{1, ..., n}`.
//!
//! Subsets are strictly increasing vectors of 1-based elements and ranks are
//! 1-based. Two rank functions are provided:
//!
//! - [`ksub_rank`] / [`ksub_unrank`] use the combinatorial number system,
//!   `rank = 1 + sum_i C(a[i] - 1, i + 1)`. This is co-lexicographic order and
//!   does not depend on `n`.
//! - [`ksub_lex_rank`] / [`ksub_lex_unrank`] use lexicographic order within
//!   the subsets of a fixed `n`-set.
//!
//! Successors come in a lexicographic flavour ([`ksub_next`]) and a
//! revolving-door flavour ([`ksub_next2`]) in which consecutive subsets
//! exchange exactly one element.
//!
//! # Example
//! ```
//! use combrank::cs::combinatorial::ksubset::{ksub_rank, ksub_unrank};
//!
//! assert_eq!(ksub_unrank(3, 1).unwrap(), vec![1, 2, 3]);
//! assert_eq!(ksub_unrank(3, 10).unwrap(), vec![3, 4, 5]);
//! assert_eq!(ksub_rank(3, &[3, 4, 5]).unwrap(), 10);
//! ```

use std::collections::BTreeSet;

use log::{debug, trace};
use rand::Rng;

use super::counting::{add, i4_choose};
use crate::cs::error::{Error, Result};

/// Checks that `a` is a strictly increasing `k`-vector of elements `>= 1`,
/// and, when `n` is given, that every element is `<= n`.
pub(crate) fn ksub_check(n: Option<usize>, k: usize, a: &[usize]) -> Result<()> {
    if a.len() != k {
        return Err(Error::invalid(format!(
            "subset has {} elements, expected {}",
            a.len(),
            k
        )));
    }
    if let Some(n) = n {
        if k > n {
            return Err(Error::invalid(format!("subset size {k} exceeds n = {n}")));
        }
    }
    let mut prev = 0;
    for &x in a {
        if x <= prev {
            return Err(Error::invalid(format!(
                "subset {a:?} is not strictly increasing from 1"
            )));
        }
        prev = x;
    }
    if let (Some(n), Some(&last)) = (n, a.last()) {
        if last > n {
            return Err(Error::invalid(format!("element {last} exceeds n = {n}")));
        }
    }
    Ok(())
}

/// Largest `c >= i - 1` with `C(c, i) <= budget`.
pub(crate) fn largest_with_choose_at_most(i: usize, budget: u64) -> usize {
    let fits = |c: usize| matches!(i4_choose(c, i), Ok(v) if v <= budget);
    let mut lo = i - 1;
    let mut step = 1usize;
    while let Some(next) = lo.checked_add(step).filter(|&c| fits(c)) {
        lo = next;
        step = step.saturating_mul(2);
    }
    let mut hi = lo.saturating_add(step);
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if fits(mid) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Returns the combinatorial-number-system rank of the `k`-subset `a`.
pub fn ksub_rank(k: usize, a: &[usize]) -> Result<u64> {
    ksub_check(None, k, a)?;
    let mut rank = 1u64;
    for (i, &x) in a.iter().enumerate() {
        rank = add(rank, i4_choose(x - 1, i + 1)?)?;
    }
    Ok(rank)
}

/// Returns the `k`-subset with combinatorial-number-system rank `rank`.
///
/// Elements are chosen greedily from the largest down: `a[i-1]` is one more
/// than the largest `c` whose `C(c, i)` still fits in the remaining rank.
pub fn ksub_unrank(k: usize, rank: u64) -> Result<Vec<usize>> {
    if rank < 1 {
        return Err(Error::RankOutOfRange {
            rank,
            max: u64::MAX,
        });
    }
    if k == 0 {
        if rank != 1 {
            return Err(Error::RankOutOfRange { rank, max: 1 });
        }
        return Ok(Vec::new());
    }
    let mut remaining = rank - 1;
    let mut a = vec![0; k];
    for i in (1..=k).rev() {
        let c = largest_with_choose_at_most(i, remaining);
        a[i - 1] = c + 1;
        remaining -= i4_choose(c, i)?;
    }
    Ok(a)
}

/// Returns the lexicographic rank of `a` among the `k`-subsets of `{1, ..., n}`.
pub fn ksub_lex_rank(n: usize, k: usize, a: &[usize]) -> Result<u64> {
    ksub_check(Some(n), k, a)?;
    let mut rank = 1u64;
    let mut prev = 0;
    for (i, &x) in a.iter().enumerate() {
        // Subsets agreeing on a[..i] but with a smaller i-th element.
        for j in prev + 1..x {
            rank = add(rank, i4_choose(n - j, k - i - 1)?)?;
        }
        prev = x;
    }
    Ok(rank)
}

/// Returns the `k`-subset of `{1, ..., n}` with lexicographic rank `rank`.
pub fn ksub_lex_unrank(n: usize, k: usize, rank: u64) -> Result<Vec<usize>> {
    if k > n {
        return Err(Error::invalid(format!("subset size {k} exceeds n = {n}")));
    }
    let total = i4_choose(n, k)?;
    if rank < 1 || rank > total {
        return Err(Error::RankOutOfRange { rank, max: total });
    }
    let mut remaining = rank - 1;
    let mut a = Vec::with_capacity(k);
    let mut x = 1;
    for i in 0..k {
        loop {
            let block = i4_choose(n - x, k - i - 1)?;
            if block > remaining {
                break;
            }
            remaining -= block;
            x += 1;
        }
        a.push(x);
        x += 1;
    }
    Ok(a)
}

/// Bookkeeping for [`ksub_next`].
///
/// `m2` is the value the regenerated tail starts after and `m` its length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KsubNextState {
    pub a: Vec<usize>,
    pub more: bool,
    pub m: usize,
    pub m2: usize,
}

/// Advances `state` to the lexicographic successor among the `k`-subsets
/// of `{1, ..., n}`.
///
/// The first call yields `{1, ..., k}`; `more` turns false once
/// `{n-k+1, ..., n}` has been produced.
pub fn ksub_next(n: usize, k: usize, state: &mut KsubNextState) -> Result<()> {
    if k > n {
        return Err(Error::invalid(format!("subset size {k} exceeds n = {n}")));
    }
    if !state.more {
        state.a = vec![0; k];
        state.m2 = 0;
        state.m = k;
        debug!("ksub_next: starting lexicographic sequence for n={n}, k={k}");
    } else {
        if state.a.len() != k {
            return Err(Error::state(format!(
                "ksub_next called with {} elements for k={}",
                state.a.len(),
                k
            )));
        }
        if state.m2 < n - state.m {
            state.m = 0;
        }
        state.m += 1;
        if state.m > k {
            return Err(Error::state("ksub_next called past the last subset"));
        }
        state.m2 = state.a[k - state.m];
    }
    for j in 1..=state.m {
        state.a[k + j - state.m - 1] = state.m2 + j;
    }
    state.more = k > 0 && state.a[0] != n - k + 1;
    Ok(())
}

/// Bookkeeping for [`ksub_next2`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KsubRevolvingState {
    pub a: Vec<usize>,
    pub more: bool,
    /// Element that entered the subset on the last step.
    pub inn: Option<usize>,
    /// Element that left the subset on the last step.
    pub out: Option<usize>,
}

/// One revolving-door step on `a` (1-based, length `k >= 1`).
/// Returns `(entered, left)`.
fn revolving_door_step(n: usize, k: usize, a: &mut [usize]) -> (usize, usize) {
    let mut j = 0;
    loop {
        if j > 0 || k % 2 == 0 {
            j += 1;
            if j > k {
                a[k - 1] = k;
                return (k, n);
            }
            if a[j - 1] != j {
                let out = a[j - 1];
                let mut inn = out - 1;
                a[j - 1] = inn;
                if j != 1 {
                    inn = j - 1;
                    a[j - 2] = inn;
                }
                return (inn, out);
            }
        }
        j += 1;
        let m = if j < k { a[j] - 1 } else { n };
        if m != a[j - 1] {
            break;
        }
    }
    let inn = a[j - 1] + 1;
    a[j - 1] = inn;
    let mut out = inn - 1;
    if j != 1 {
        a[j - 2] = out;
        out = j - 1;
    }
    (inn, out)
}

/// Advances `state` to the next `k`-subset of `{1, ..., n}` in revolving-door
/// order.
///
/// Each successor is obtained by removing one element (`out`) and adding one
/// (`inn`). The sequence starts at `{1, ..., k}` and ends at
/// `{1, ..., k-1, n}`, where `more` turns false.
pub fn ksub_next2(n: usize, k: usize, state: &mut KsubRevolvingState) -> Result<()> {
    if k > n {
        return Err(Error::invalid(format!("subset size {k} exceeds n = {n}")));
    }
    if !state.more {
        state.a = (1..=k).collect();
        state.inn = None;
        state.out = None;
        state.more = k > 0 && k < n;
        debug!("ksub_next2: starting revolving-door sequence for n={n}, k={k}");
        return Ok(());
    }
    if k == 0 || state.a.len() != k {
        return Err(Error::state(format!(
            "ksub_next2 called with {} elements for k={}",
            state.a.len(),
            k
        )));
    }

    if is_last_revolving(n, &state.a) {
        return Err(Error::state("ksub_next2 called past the last subset"));
    }

    let (inn, out) = revolving_door_step(n, k, &mut state.a);
    state.inn = Some(inn);
    state.out = Some(out);
    state.more = !is_last_revolving(n, &state.a);
    Ok(())
}

/// The revolving-door order ends at `{1, ..., k-1, n}`.
fn is_last_revolving(n: usize, a: &[usize]) -> bool {
    let k = a.len();
    a[k - 1] == n && (0..k - 1).all(|i| a[i] == i + 1)
}

/// Returns a uniformly random `k`-subset of `{1, ..., n}`, sorted.
///
/// Floyd's algorithm: for `j` from `n-k+1` to `n`, draw `t` from `1..=j`
/// and keep `t`, or `j` if `t` was already chosen.
pub fn ksub_random<R: Rng + ?Sized>(n: usize, k: usize, rng: &mut R) -> Result<Vec<usize>> {
    if k > n {
        return Err(Error::invalid(format!("subset size {k} exceeds n = {n}")));
    }
    let mut chosen = BTreeSet::new();
    for j in n - k + 1..=n {
        let t = rng.gen_range(1..=j);
        if !chosen.insert(t) {
            chosen.insert(j);
        }
    }
    let a: Vec<usize> = chosen.into_iter().collect();
    trace!("ksub_random: drew {a:?}");
    Ok(a)
}

/// Iterator over the `k`-subsets of `{1, ..., n}` in lexicographic order.
#[derive(Debug, Clone)]
pub struct LexSubsets {
    n: usize,
    k: usize,
    state: KsubNextState,
    finished: bool,
}

impl LexSubsets {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            state: KsubNextState::default(),
            finished: false,
        }
    }
}

impl Iterator for LexSubsets {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if ksub_next(self.n, self.k, &mut self.state).is_err() {
            self.finished = true;
            return None;
        }
        self.finished = !self.state.more;
        Some(self.state.a.clone())
    }
}

/// Iterator over the `k`-subsets of `{1, ..., n}` in revolving-door order.
#[derive(Debug, Clone)]
pub struct RevolvingDoorSubsets {
    n: usize,
    k: usize,
    state: KsubRevolvingState,
    finished: bool,
}

impl RevolvingDoorSubsets {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            state: KsubRevolvingState::default(),
            finished: false,
        }
    }
}

impl Iterator for RevolvingDoorSubsets {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if ksub_next2(self.n, self.k, &mut self.state).is_err() {
            self.finished = true;
            return None;
        }
        self.finished = !self.state.more;
        Some(self.state.a.clone())
    }
}
