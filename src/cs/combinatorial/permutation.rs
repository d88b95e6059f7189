//! Permutations of `{0, ..., n-1}`.
//!
//! Ranks are 1-based positions in lexicographic order, so the identity has
//! rank 1 and the fully descending permutation has rank `n!`. Ranks are
//! `u64`, which limits ranking and unranking to `n <= 20`; see
//! [`super::big_rank`] for larger `n`.
//!
//! Two successor generators are provided:
//! - [`perm0_next`]: Nijenhuis and Wilf's minimal-change order, where each
//!   permutation differs from the previous one by a single transposition.
//! - [`perm0_lex_next`]: plain lexicographic order.
//!
//! # Example
//! ```
//! use combrank::cs::combinatorial::permutation::{perm0_rank, perm0_unrank};
//!
//! let p = perm0_unrank(4, 24).unwrap();
//! assert_eq!(p, vec![3, 2, 1, 0]);
//! assert_eq!(perm0_rank(4, &p).unwrap(), 24);
//! ```

use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;

use super::counting::{add, i4_factorial};
use crate::cs::error::{Error, Result};

/// Checks that `p` is a permutation of `{0, ..., n-1}`.
pub fn perm0_check(n: usize, p: &[usize]) -> Result<()> {
    if p.len() != n {
        return Err(Error::invalid(format!(
            "permutation has length {}, expected {}",
            p.len(),
            n
        )));
    }
    let mut seen = vec![false; n];
    for &value in p {
        if value >= n {
            return Err(Error::invalid(format!("entry {value} is not in 0..{n}")));
        }
        if seen[value] {
            return Err(Error::invalid(format!("entry {value} appears more than once")));
        }
        seen[value] = true;
    }
    Ok(())
}

/// Returns `q` with `q[p[i]] == i` for every `i`.
pub fn perm0_inverse(n: usize, p: &[usize]) -> Result<Vec<usize>> {
    perm0_check(n, p)?;
    let mut inverse = vec![0; n];
    for (i, &value) in p.iter().enumerate() {
        inverse[value] = i;
    }
    Ok(inverse)
}

/// Returns the lexicographic rank of `p`, in `1..=n!`.
///
/// The rank is read off the Lehmer code: position `i` contributes the number
/// of later entries smaller than `p[i]`, weighted by `(n-1-i)!`.
pub fn perm0_rank(n: usize, p: &[usize]) -> Result<u64> {
    perm0_check(n, p)?;
    let mut rank = 0u64;
    for i in 0..n {
        let digit = p[i + 1..].iter().filter(|&&v| v < p[i]).count() as u64;
        if digit == 0 {
            continue;
        }
        let term = i4_factorial(n - 1 - i)?
            .checked_mul(digit)
            .ok_or(Error::Overflow("permutation rank"))?;
        rank = add(rank, term)?;
    }
    add(rank, 1)
}

/// Returns the permutation with lexicographic rank `rank`, for `1 <= rank <= n!`.
pub fn perm0_unrank(n: usize, rank: u64) -> Result<Vec<usize>> {
    let total = i4_factorial(n)?;
    if rank < 1 || rank > total {
        return Err(Error::RankOutOfRange { rank, max: total });
    }
    let mut remaining = rank - 1;
    let mut unused: Vec<usize> = (0..n).collect();
    let mut p = Vec::with_capacity(n);
    for i in 0..n {
        let weight = i4_factorial(n - 1 - i)?;
        let digit = (remaining / weight) as usize;
        remaining %= weight;
        p.push(unused.remove(digit));
    }
    Ok(p)
}

/// Bookkeeping for [`perm0_next`].
///
/// Start from the default value (`more == false`). After the final
/// permutation has been produced `more` is false again, so the next call
/// restarts the sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Perm0NextState {
    pub p: Vec<usize>,
    pub more: bool,
    /// Set when the next step is the swap of the first two entries.
    pub even: bool,
}

/// The last permutation of the minimal-change order is
/// `(1 + n % 2, 2 + n % 2, ..., ?, 0)`: the final entry is 0 and the first
/// `n-2` entries are consecutive.
fn is_last_minimal_change(p: &[usize]) -> bool {
    let n = p.len();
    if p[n - 1] != 0 || p[0] != 1 + n % 2 {
        return false;
    }
    (0..n.saturating_sub(3)).all(|i| p[i + 1] == p[i] + 1)
}

/// Advances `state` to the next permutation in minimal-change order.
///
/// Steps alternate between swapping `p[0]` and `p[1]` and a general
/// transposition located from the inversion counts of `p`, so every
/// permutation differs from its predecessor in exactly two positions.
/// All `n!` permutations are produced, the identity first.
///
/// # Example
/// ```
/// use combrank::cs::combinatorial::permutation::{perm0_next, Perm0NextState};
///
/// let mut state = Perm0NextState::default();
/// let mut seen = Vec::new();
/// loop {
///     perm0_next(3, &mut state).unwrap();
///     seen.push(state.p.clone());
///     if !state.more {
///         break;
///     }
/// }
/// assert_eq!(seen.len(), 6);
/// assert_eq!(seen[1], vec![1, 0, 2]);
/// ```
pub fn perm0_next(n: usize, state: &mut Perm0NextState) -> Result<()> {
    if !state.more {
        state.p = (0..n).collect();
        state.even = true;
        state.more = n > 1 && !is_last_minimal_change(&state.p);
        debug!("perm0_next: starting minimal-change sequence for n={n}");
        return Ok(());
    }
    if n < 2 || state.p.len() != n {
        return Err(Error::state(format!(
            "perm0_next called with {} entries for n={}",
            state.p.len(),
            n
        )));
    }

    let p = &mut state.p;
    if state.even {
        p.swap(0, 1);
        state.even = false;
        state.more = !is_last_minimal_change(p);
        if !state.more {
            debug!("perm0_next: sequence for n={n} exhausted");
        }
        return Ok(());
    }

    // Find the first position whose count of larger predecessors breaks
    // the alternating pattern; its entry is the one that moves.
    let mut inversions = 0usize;
    let mut pivot = None;
    for i1 in 1..n {
        let value = p[i1];
        let larger_before = p[..i1].iter().filter(|&&v| v > value).count();
        inversions += larger_before;
        if larger_before != i1 * (inversions % 2) {
            pivot = Some((i1, value));
            break;
        }
    }
    let Some((i1, value)) = pivot else {
        state.more = false;
        return Ok(());
    };

    // Sentinel lies below every entry when the inversion count is odd and
    // above every entry when it is even.
    let mut target: isize = if inversions % 2 == 1 { -1 } else { n as isize };
    let mut swap_with = None;
    for (j, &v) in p[..i1].iter().enumerate() {
        let v = v as isize;
        if (v > value as isize) != (v > target) {
            target = v;
            swap_with = Some(j);
        }
    }
    let Some(l) = swap_with else {
        return Err(Error::state("perm0_next found no transposition partner"));
    };
    p[l] = value;
    p[i1] = target as usize;
    state.even = true;
    Ok(())
}

/// Bookkeeping for [`perm0_lex_next`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Perm0LexState {
    pub p: Vec<usize>,
    pub more: bool,
}

/// Advances `state` to the lexicographic successor of `state.p`.
///
/// The first call (with `more == false`) yields the identity. `more` turns
/// false once the fully descending permutation has been produced.
pub fn perm0_lex_next(n: usize, state: &mut Perm0LexState) -> Result<()> {
    if !state.more {
        state.p = (0..n).collect();
        state.more = n > 1;
        debug!("perm0_lex_next: starting lexicographic sequence for n={n}");
        return Ok(());
    }
    if n < 2 || state.p.len() != n {
        return Err(Error::state(format!(
            "perm0_lex_next called with {} entries for n={}",
            state.p.len(),
            n
        )));
    }

    let p = &mut state.p;
    // Rightmost ascent.
    let Some(i) = (0..n - 1).rev().find(|&i| p[i] < p[i + 1]) else {
        state.more = false;
        return Ok(());
    };
    let j = (i + 1..n).rev().find(|&j| p[j] > p[i]).unwrap_or(i + 1);
    p.swap(i, j);
    p[i + 1..].reverse();

    state.more = p.windows(2).any(|w| w[0] < w[1]);
    if !state.more {
        debug!("perm0_lex_next: sequence for n={n} exhausted");
    }
    Ok(())
}

/// Cycle structure of a permutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermCycles {
    /// Each cycle starts at its smallest element and follows `i -> p[i]`;
    /// cycles appear in increasing order of that element. Fixed points are
    /// cycles of length one.
    pub cycles: Vec<Vec<usize>>,
    /// `+1` for an even permutation, `-1` for an odd one.
    pub sign: i32,
}

impl PermCycles {
    pub fn ncycle(&self) -> usize {
        self.cycles.len()
    }
}

/// Decomposes `p` into disjoint cycles and reports its sign.
pub fn perm0_cycle(n: usize, p: &[usize]) -> Result<PermCycles> {
    perm0_check(n, p)?;
    let mut visited = vec![false; n];
    let mut cycles = Vec::new();
    for start in 0..n {
        if visited[start] {
            continue;
        }
        let mut cycle = Vec::new();
        let mut i = start;
        while !visited[i] {
            visited[i] = true;
            cycle.push(i);
            i = p[i];
        }
        cycles.push(cycle);
    }
    let sign = if (n - cycles.len()) % 2 == 0 { 1 } else { -1 };
    Ok(PermCycles { cycles, sign })
}

/// Returns a uniformly random permutation of `{0, ..., n-1}`.
pub fn perm0_random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut p: Vec<usize> = (0..n).collect();
    p.shuffle(rng);
    trace!("perm0_random: drew {p:?}");
    p
}

/// Iterator over all permutations of `{0, ..., n-1}` in minimal-change order.
#[derive(Debug, Clone)]
pub struct MinimalChangePermutations {
    n: usize,
    state: Perm0NextState,
    finished: bool,
}

impl MinimalChangePermutations {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            state: Perm0NextState::default(),
            finished: false,
        }
    }
}

impl Iterator for MinimalChangePermutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if perm0_next(self.n, &mut self.state).is_err() {
            self.finished = true;
            return None;
        }
        self.finished = !self.state.more;
        Some(self.state.p.clone())
    }
}

/// Iterator over all permutations of `{0, ..., n-1}` in lexicographic order.
#[derive(Debug, Clone)]
pub struct LexPermutations {
    n: usize,
    state: Perm0LexState,
    finished: bool,
}

impl LexPermutations {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            state: Perm0LexState::default(),
            finished: false,
        }
    }
}

impl Iterator for LexPermutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if perm0_lex_next(self.n, &mut self.state).is_err() {
            self.finished = true;
            return None;
        }
        self.finished = !self.state.more;
        Some(self.state.p.clone())
    }
}
