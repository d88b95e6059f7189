//! Compositions: ordered `k`-tuples of nonnegative integers.
//!
//! A composition of `nc` into `kc` parts corresponds to a `(kc-1)`-subset of
//! `{1, ..., nc+kc-1}` through its offset prefix sums ("stars and bars"), see
//! [`comp_to_ksub`]. Ranking in graded lexicographic order reduces to that
//! subset's lexicographic rank plus the number of compositions of smaller
//! degree.
//!
//! Graded lexicographic order for `kc = 3` begins
//! `000, 001, 010, 100, 002, 011, 020, 101, 110, 200, 003, ...`.

use log::{debug, trace};
use rand::Rng;

use super::counting::{add, i4_choose};
use super::ksubset::{
    ksub_check, ksub_lex_rank, ksub_lex_unrank, ksub_random, largest_with_choose_at_most,
};
use crate::cs::error::{Error, Result};

/// Maps a composition `ac` of `nc` into `kc` parts to the `(kc-1)`-subset of
/// `{1, ..., nc+kc-1}` formed by its offset prefix sums.
///
/// Returns `(ns, ks, as)`.
pub fn comp_to_ksub(nc: usize, kc: usize, ac: &[usize]) -> Result<(usize, usize, Vec<usize>)> {
    if kc < 1 {
        return Err(Error::invalid("a composition needs at least one part"));
    }
    if ac.len() != kc {
        return Err(Error::invalid(format!(
            "composition has {} parts, expected {}",
            ac.len(),
            kc
        )));
    }
    if ac.iter().sum::<usize>() != nc {
        return Err(Error::invalid(format!("composition {ac:?} does not sum to {nc}")));
    }
    let ns = nc + kc - 1;
    let ks = kc - 1;
    let mut subset = Vec::with_capacity(ks);
    let mut prev = 0;
    for &part in &ac[..ks] {
        prev += part + 1;
        subset.push(prev);
    }
    Ok((ns, ks, subset))
}

/// Inverse of [`comp_to_ksub`]: maps a `ks`-subset of `{1, ..., ns}` to a
/// composition of `ns - ks` into `ks + 1` parts.
///
/// Returns `(nc, kc, ac)`.
pub fn ksub_to_comp(ns: usize, ks: usize, subset: &[usize]) -> Result<(usize, usize, Vec<usize>)> {
    ksub_check(Some(ns), ks, subset)?;
    let nc = ns - ks;
    let kc = ks + 1;
    let mut ac = Vec::with_capacity(kc);
    let mut prev = 0;
    for &x in subset {
        ac.push(x - prev - 1);
        prev = x;
    }
    ac.push(ns - prev);
    Ok((nc, kc, ac))
}

/// Number of compositions into `kc` parts with degree below `nc`.
///
/// Summing `C(d + kc - 1, kc - 1)` over `d < nc` gives `C(nc + kc - 1, kc)`.
fn compositions_below_degree(kc: usize, nc: usize) -> Result<u64> {
    let top = nc
        .checked_add(kc - 1)
        .ok_or(Error::Overflow("composition degree"))?;
    i4_choose(top, kc)
}

/// Returns the graded lexicographic rank (1-based) of the composition `xc`.
///
/// # Example
/// ```
/// use combrank::cs::combinatorial::composition::{comp_rank_grlex, comp_unrank_grlex};
///
/// assert_eq!(comp_rank_grlex(3, &[1, 0, 1]).unwrap(), 8);
/// assert_eq!(comp_unrank_grlex(3, 8).unwrap(), vec![1, 0, 1]);
/// ```
pub fn comp_rank_grlex(kc: usize, xc: &[usize]) -> Result<u64> {
    let nc = xc.iter().sum::<usize>();
    let (ns, ks, subset) = comp_to_ksub(nc, kc, xc)?;
    let within = ksub_lex_rank(ns, ks, &subset)?;
    add(compositions_below_degree(kc, nc)?, within)
}

/// Returns the composition into `kc` parts with graded lexicographic rank `rank`.
pub fn comp_unrank_grlex(kc: usize, rank: u64) -> Result<Vec<usize>> {
    if kc < 1 {
        return Err(Error::invalid("a composition needs at least one part"));
    }
    if rank < 1 {
        return Err(Error::RankOutOfRange {
            rank,
            max: u64::MAX,
        });
    }
    // The degree is the largest `nc` with fewer than `rank` compositions
    // below it, i.e. the largest `c = nc + kc - 1` with C(c, kc) <= rank - 1.
    let nc = largest_with_choose_at_most(kc, rank - 1) + 1 - kc;
    let within = rank - compositions_below_degree(kc, nc)?;
    let ns = nc + kc - 1;
    let subset = ksub_lex_unrank(ns, kc - 1, within)?;
    let (_, _, xc) = ksub_to_comp(ns, kc - 1, &subset)?;
    Ok(xc)
}

/// Replaces `xc` by its successor in graded lexicographic order.
///
/// The last composition of each degree, `(d, 0, ..., 0)`, is followed by the
/// first of the next degree, `(0, ..., 0, d+1)`.
pub fn comp_next_grlex(kc: usize, xc: &mut [usize]) -> Result<()> {
    if kc < 1 || xc.len() != kc {
        return Err(Error::invalid(format!(
            "composition has {} parts, expected {} >= 1",
            xc.len(),
            kc
        )));
    }
    let Some(i) = xc.iter().rposition(|&x| x > 0) else {
        xc[kc - 1] = 1;
        return Ok(());
    };
    let t = xc[i];
    xc[i] = 0;
    if i == 0 {
        xc[kc - 1] = t + 1;
    } else {
        xc[i - 1] += 1;
        xc[kc - 1] = t - 1;
    }
    Ok(())
}

/// Bookkeeping for [`comp_next`].
///
/// `h` is the position most recently emptied and `t` the value taken from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompNextState {
    pub a: Vec<usize>,
    pub more: bool,
    pub h: usize,
    pub t: usize,
}

/// Advances `state` to the next composition of `n` into `k` nonnegative parts.
///
/// The sequence starts at `(n, 0, ..., 0)` and ends at `(0, ..., 0, n)`.
/// For `k == 1` the single composition `(n)` is produced with `more == false`.
///
/// # Example
/// ```
/// use combrank::cs::combinatorial::composition::{comp_next, CompNextState};
///
/// let mut state = CompNextState::default();
/// comp_next(2, 2, &mut state).unwrap();
/// assert_eq!(state.a, vec![2, 0]);
/// comp_next(2, 2, &mut state).unwrap();
/// assert_eq!(state.a, vec![1, 1]);
/// comp_next(2, 2, &mut state).unwrap();
/// assert_eq!(state.a, vec![0, 2]);
/// assert!(!state.more);
/// ```
pub fn comp_next(n: usize, k: usize, state: &mut CompNextState) -> Result<()> {
    if k < 1 {
        return Err(Error::invalid("a composition needs at least one part"));
    }
    if !state.more {
        state.t = n;
        state.h = 0;
        state.a = vec![0; k];
        state.a[0] = n;
        debug!("comp_next: starting sequence for n={n}, k={k}");
    } else {
        if state.a.len() != k || state.h >= k {
            return Err(Error::state(format!(
                "comp_next called with {} parts for k={}",
                state.a.len(),
                k
            )));
        }
        if state.a[k - 1] == n {
            return Err(Error::state("comp_next called past the last composition"));
        }
        if state.t > 1 {
            state.h = 0;
        }
        state.h += 1;
        if state.h >= k || state.a[state.h - 1] == 0 {
            return Err(Error::state(format!(
                "comp_next found no part to move in {:?}",
                state.a
            )));
        }
        state.t = state.a[state.h - 1];
        state.a[state.h - 1] = 0;
        state.a[0] = state.t - 1;
        state.a[state.h] += 1;
    }
    state.more = state.a[k - 1] != n;
    Ok(())
}

/// Returns a uniformly random composition of `n` into `k` nonnegative parts.
pub fn comp_random<R: Rng + ?Sized>(n: usize, k: usize, rng: &mut R) -> Result<Vec<usize>> {
    if k < 1 {
        return Err(Error::invalid("a composition needs at least one part"));
    }
    let subset = ksub_random(n + k - 1, k - 1, rng)?;
    let (_, _, a) = ksub_to_comp(n + k - 1, k - 1, &subset)?;
    Ok(a)
}

/// Draws a rank uniformly from `rank1..=rank2` and returns the composition
/// into `kc` parts with that graded lexicographic rank, along with the rank.
pub fn comp_random_grlex<R: Rng + ?Sized>(
    kc: usize,
    rank1: u64,
    rank2: u64,
    rng: &mut R,
) -> Result<(Vec<usize>, u64)> {
    if rank1 < 1 || rank2 < rank1 {
        return Err(Error::invalid(format!(
            "rank bounds {rank1}..={rank2} are not a nonempty range starting at 1 or later"
        )));
    }
    let rank = rng.gen_range(rank1..=rank2);
    trace!("comp_random_grlex: drew rank {rank}");
    Ok((comp_unrank_grlex(kc, rank)?, rank))
}

/// Iterator over the compositions of `n` into `k` parts, in [`comp_next`] order.
#[derive(Debug, Clone)]
pub struct Compositions {
    n: usize,
    k: usize,
    state: CompNextState,
    finished: bool,
}

impl Compositions {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            state: CompNextState::default(),
            finished: false,
        }
    }
}

impl Iterator for Compositions {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if comp_next(self.n, self.k, &mut self.state).is_err() {
            self.finished = true;
            return None;
        }
        self.finished = !self.state.more;
        Some(self.state.a.clone())
    }
}
