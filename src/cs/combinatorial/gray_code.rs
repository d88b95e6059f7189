//! Reflected binary Gray codes and the Gray-code order on subsets.
//!
//! `gray_unrank2(i) = i ^ (i >> 1)` is the `i`-th Gray code and
//! [`gray_rank2`] undoes it. Subsets of `{0, ..., n-1}` are bit vectors with
//! entry 0 as the least significant bit, which makes
//! [`subset_gray_next`], [`subset_gray_rank`] and [`subset_gray_unrank`]
//! describe the same order.
//!
//! # Example
//! ```
//! use combrank::cs::combinatorial::gray_code;
//!
//! let codes = gray_code(2).unwrap();
//! // For n=2, the sequence is [0, 1, 3, 2].
//! assert_eq!(codes, vec![0, 1, 3, 2]);
//! ```

use bitvec::prelude::*;
use log::debug;

use crate::cs::error::{Error, Result};

/// Returns a vector of 2^n Gray codes, each stored as a `u64`.
///
/// Fails with [`Error::Overflow`] for `n >= 64`.
pub fn gray_code(n: usize) -> Result<Vec<u64>> {
    if n >= 64 {
        return Err(Error::Overflow("number of Gray codes"));
    }
    Ok((0..1u64 << n).map(gray_unrank2).collect())
}

/// Returns the position of the Gray code `gray` in the Gray sequence.
pub fn gray_rank2(gray: u64) -> u64 {
    let mut rank = gray;
    let mut shift = gray >> 1;
    while shift != 0 {
        rank ^= shift;
        shift >>= 1;
    }
    rank
}

/// Returns the Gray code at position `rank`.
pub fn gray_unrank2(rank: u64) -> u64 {
    rank ^ (rank >> 1)
}

/// Reads a bit vector as an integer, entry 0 being the least significant bit.
pub fn ubvec_to_ui4(bits: &BitSlice) -> Result<u64> {
    if bits.len() > 64 {
        return Err(Error::Overflow("bit vector value"));
    }
    Ok(bits
        .iter()
        .by_vals()
        .rev()
        .fold(0u64, |acc, bit| (acc << 1) | bit as u64))
}

/// Writes the low `n` bits of `value` into a bit vector, entry 0 being the
/// least significant bit.
pub fn ui4_to_ubvec(value: u64, n: usize) -> Result<BitVec> {
    if n < 64 && value >> n != 0 {
        return Err(Error::invalid(format!("{value} does not fit in {n} bits")));
    }
    let mut bits = bitvec![0; n];
    for i in 0..n.min(64) {
        bits.set(i, (value >> i) & 1 == 1);
    }
    Ok(bits)
}

/// Returns the 1-based rank of the subset `a` in Gray-code order.
pub fn subset_gray_rank(a: &BitSlice) -> Result<u64> {
    let gray = ubvec_to_ui4(a)?;
    gray_rank2(gray)
        .checked_add(1)
        .ok_or(Error::Overflow("subset rank"))
}

/// Returns the subset of `{0, ..., n-1}` with 1-based Gray-code rank `rank`.
pub fn subset_gray_unrank(rank: u64, n: usize) -> Result<BitVec> {
    if n >= 64 {
        return Err(Error::Overflow("number of subsets"));
    }
    let total = 1u64 << n;
    if rank < 1 || rank > total {
        return Err(Error::RankOutOfRange { rank, max: total });
    }
    ui4_to_ubvec(gray_unrank2(rank - 1), n)
}

/// Bookkeeping for [`subset_gray_next`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubsetGrayState {
    pub a: BitVec,
    pub more: bool,
    /// Number of elements in `a`.
    pub ncard: usize,
    /// Entry flipped by the last call; `None` after the first call.
    pub iadd: Option<usize>,
}

/// Advances `state` to the next subset of `{0, ..., n-1}` in Gray-code order.
///
/// The first call yields the empty set. Afterwards, entry 0 flips when the
/// subset has even size; otherwise the entry just after the first member
/// flips. `more` turns false at `{n-1}`, the last of the `2^n` subsets.
///
/// # Example
/// ```
/// use bitvec::prelude::*;
/// use combrank::cs::combinatorial::gray_code::{subset_gray_next, SubsetGrayState};
///
/// let mut state = SubsetGrayState::default();
/// subset_gray_next(3, &mut state).unwrap();
/// assert_eq!(state.a, bitvec![0, 0, 0]);
/// subset_gray_next(3, &mut state).unwrap();
/// assert_eq!(state.a, bitvec![1, 0, 0]);
/// assert_eq!(state.iadd, Some(0));
/// ```
pub fn subset_gray_next(n: usize, state: &mut SubsetGrayState) -> Result<()> {
    if !state.more {
        state.a = bitvec![0; n];
        state.ncard = 0;
        state.iadd = None;
        state.more = n > 0;
        debug!("subset_gray_next: starting Gray sequence for n={n}");
        return Ok(());
    }
    if n == 0 || state.a.len() != n {
        return Err(Error::state(format!(
            "subset_gray_next called with {} entries for n={}",
            state.a.len(),
            n
        )));
    }

    let i = if state.ncard % 2 == 0 {
        0
    } else {
        match state.a.first_one() {
            Some(first) if first + 1 < n => first + 1,
            _ => return Err(Error::state("subset_gray_next called past the last subset")),
        }
    };
    let bit = state.a[i];
    state.a.set(i, !bit);
    if bit {
        state.ncard -= 1;
    } else {
        state.ncard += 1;
    }
    state.iadd = Some(i);
    state.more = !(state.ncard == 1 && state.a[n - 1]);
    if !state.more {
        debug!("subset_gray_next: sequence for n={n} exhausted");
    }
    Ok(())
}

/// Iterator over the subsets of `{0, ..., n-1}` in Gray-code order.
#[derive(Debug, Clone)]
pub struct GraySubsets {
    n: usize,
    state: SubsetGrayState,
    finished: bool,
}

impl GraySubsets {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            state: SubsetGrayState::default(),
            finished: false,
        }
    }
}

impl Iterator for GraySubsets {
    type Item = BitVec;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if subset_gray_next(self.n, &mut self.state).is_err() {
            self.finished = true;
            return None;
        }
        self.finished = !self.state.more;
        Some(self.state.a.clone())
    }
}
