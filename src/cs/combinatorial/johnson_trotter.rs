//! Trotter-Johnson (adjacent-swap) order on permutations.
//!
//! Consecutive permutations differ by swapping two neighbouring entries. The
//! iterator walks the order with the classic mobile-element rule; ranks are
//! 1-based and agree with the iterator, so the k-th permutation it yields has
//! rank k.
//!
//! # Example
//! ```
//! use combrank::cs::combinatorial::johnson_trotter;
//!
//! let data = vec![1, 2, 3];
//! let perms = johnson_trotter(&data);
//! assert_eq!(perms, vec![
//!     vec![1, 2, 3],
//!     vec![1, 3, 2],
//!     vec![3, 1, 2],
//!     vec![3, 2, 1],
//!     vec![2, 3, 1],
//!     vec![2, 1, 3],
//! ]);
//! ```

use super::counting::i4_factorial;
use super::permutation::perm0_check;
use crate::cs::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

/// Iterator over the permutations of `{0, ..., n-1}` in Trotter-Johnson order.
#[derive(Debug, Clone)]
pub struct TrotterJohnson {
    p: Vec<usize>,
    dirs: Vec<Direction>,
    started: bool,
    finished: bool,
}

impl TrotterJohnson {
    pub fn new(n: usize) -> Self {
        Self {
            p: (0..n).collect(),
            dirs: vec![Direction::Left; n],
            started: false,
            finished: false,
        }
    }

    /// Position of the largest entry whose neighbour in its direction is smaller.
    fn largest_mobile(&self) -> Option<usize> {
        let n = self.p.len();
        let mut best: Option<usize> = None;
        for i in 0..n {
            let neighbour = match self.dirs[i] {
                Direction::Left if i > 0 => i - 1,
                Direction::Right if i + 1 < n => i + 1,
                _ => continue,
            };
            if self.p[i] > self.p[neighbour] && best.map_or(true, |b| self.p[i] > self.p[b]) {
                best = Some(i);
            }
        }
        best
    }
}

impl Iterator for TrotterJohnson {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.p.clone());
        }

        let Some(i) = self.largest_mobile() else {
            self.finished = true;
            return None;
        };
        let j = match self.dirs[i] {
            Direction::Left => i - 1,
            Direction::Right => i + 1,
        };
        let moved = self.p[i];
        self.p.swap(i, j);
        self.dirs.swap(i, j);

        for (value, dir) in self.p.iter().zip(self.dirs.iter_mut()) {
            if *value > moved {
                *dir = match *dir {
                    Direction::Left => Direction::Right,
                    Direction::Right => Direction::Left,
                };
            }
        }
        Some(self.p.clone())
    }
}

/// Returns every ordering of `items` in Trotter-Johnson order.
/// The items are treated as distinct by position.
pub fn johnson_trotter<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    TrotterJohnson::new(items.len())
        .map(|p| p.iter().map(|&i| items[i].clone()).collect())
        .collect()
}

/// Returns the 1-based rank of `p` in Trotter-Johnson order.
pub fn perm0_tj_rank(n: usize, p: &[usize]) -> Result<u64> {
    perm0_check(n, p)?;
    i4_factorial(n)?;
    let mut rank = 0u64;
    for j in 1..n {
        // `k` is the 1-based position of `j` among the entries `0..=j`.
        let mut k = 1u64;
        for &value in p.iter().take_while(|&&v| v != j) {
            if value < j {
                k += 1;
            }
        }
        let size = j as u64 + 1;
        rank = if rank % 2 == 0 {
            size * rank + size - k
        } else {
            size * rank + k - 1
        };
    }
    Ok(rank + 1)
}

/// Returns the permutation with 1-based rank `rank` in Trotter-Johnson order.
pub fn perm0_tj_unrank(n: usize, rank: u64) -> Result<Vec<usize>> {
    let total = i4_factorial(n)?;
    if rank < 1 || rank > total {
        return Err(Error::RankOutOfRange { rank, max: total });
    }
    if n == 0 {
        return Ok(Vec::new());
    }
    let r = rank - 1;

    // Built with 1-based values in slots 1..=n.
    let mut q = vec![0usize; n + 2];
    q[1] = 1;
    let mut prev = 0u64;
    for j in 2..=n {
        let block: u64 = (j as u64 + 1..=n as u64).product();
        let current = r / block;
        let k = (current - j as u64 * prev) as usize;
        if prev % 2 == 0 {
            for i in (j - k..j).rev() {
                q[i + 1] = q[i];
            }
            q[j - k] = j;
        } else {
            for i in (k + 1..j).rev() {
                q[i + 1] = q[i];
            }
            q[k + 1] = j;
        }
        prev = current;
    }
    Ok(q[1..=n].iter().map(|&v| v - 1).collect())
}

/// Returns the Trotter-Johnson successor of `p`, or `None` if `p` is last.
pub fn perm0_tj_next(n: usize, p: &[usize]) -> Result<Option<Vec<usize>>> {
    let rank = perm0_tj_rank(n, p)?;
    if rank == i4_factorial(n)? {
        return Ok(None);
    }
    perm0_tj_unrank(n, rank + 1).map(Some)
}
