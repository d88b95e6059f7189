//! Partitions of a positive integer `n`.
//!
//! A [`Partition`] stores its distinct part values in decreasing order in
//! `a`, with the multiplicity of `a[i]` in `mult[i]`, so `(3, 1, 1)` is
//! `a = [3, 1]`, `mult = [1, 2]`. [`i4_partition_next2`] works on the plain
//! nonincreasing list of parts instead.
//!
//! Counts use `u64` and overflow past `P(416)`.

use log::{debug, trace};
use rand::Rng;

use crate::cs::error::{Error, Result};

/// Returns the generalized pentagonal number `k (3k - 1) / 2`.
///
/// Positive and negative `k` together give 1, 2, 5, 7, 12, 15, ...
pub fn pent_enum(k: i64) -> u64 {
    (k * (3 * k - 1) / 2) as u64
}

/// Returns `P(0), ..., P(n)`, the number of partitions of each integer up to `n`.
///
/// Uses Euler's pentagonal number recurrence
/// `P(i) = sum_{k >= 1} (-1)^(k+1) [P(i - g(k)) + P(i - g(-k))]`.
///
/// # Example
/// ```
/// use combrank::cs::combinatorial::partition::i4_partition_count;
///
/// let p = i4_partition_count(10).unwrap();
/// assert_eq!(p[10], 42);
/// ```
pub fn i4_partition_count(n: usize) -> Result<Vec<u64>> {
    let mut p = vec![0u64; n + 1];
    p[0] = 1;
    for i in 1..=n {
        let mut sum: i128 = 0;
        for k in 1i64.. {
            let g = pent_enum(k) as usize;
            if g > i {
                break;
            }
            let sign: i128 = if k % 2 == 1 { 1 } else { -1 };
            sum += sign * p[i - g] as i128;
            let g = pent_enum(-k) as usize;
            if g <= i {
                sum += sign * p[i - g] as i128;
            }
        }
        p[i] = u64::try_from(sum).map_err(|_| Error::Overflow("partition count"))?;
    }
    Ok(p)
}

/// Returns `P(1), ..., P(n)` by the divisor-sum recurrence
/// `m P(m) = sum_{k=1}^{m} sigma(k) P(m - k)`.
///
/// This is the table [`i4_partition_random`] expects.
pub fn i4_partition_count2(n: usize) -> Result<Vec<u64>> {
    let mut sigma = vec![0u64; n + 1];
    for d in 1..=n {
        for m in (d..=n).step_by(d) {
            sigma[m] += d as u64;
        }
    }
    let mut p = Vec::with_capacity(n + 1);
    p.push(1u64);
    for m in 1..=n {
        let total: u128 = (1..=m)
            .map(|k| sigma[k] as u128 * p[m - k] as u128)
            .sum();
        let value =
            u64::try_from(total / m as u128).map_err(|_| Error::Overflow("partition count"))?;
        p.push(value);
    }
    p.remove(0);
    Ok(p)
}

/// A partition as distinct parts with multiplicities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Partition {
    /// Distinct parts, largest first.
    pub a: Vec<usize>,
    /// `mult[i]` is the number of times `a[i]` occurs.
    pub mult: Vec<usize>,
}

impl Partition {
    /// Builds a partition from parts in any order.
    pub fn from_parts(parts: &[usize]) -> Result<Self> {
        if parts.contains(&0) {
            return Err(Error::invalid("partition parts must be positive"));
        }
        let mut sorted = parts.to_vec();
        sorted.sort_unstable_by(|x, y| y.cmp(x));
        let mut partition = Partition::default();
        for part in sorted {
            if partition.a.last() == Some(&part) {
                if let Some(m) = partition.mult.last_mut() {
                    *m += 1;
                }
            } else {
                partition.a.push(part);
                partition.mult.push(1);
            }
        }
        Ok(partition)
    }

    /// Number of distinct parts.
    pub fn npart(&self) -> usize {
        self.a.len()
    }

    /// The integer being partitioned.
    pub fn total(&self) -> usize {
        self.a.iter().zip(&self.mult).map(|(a, m)| a * m).sum()
    }

    /// All parts, largest first.
    pub fn parts(&self) -> Vec<usize> {
        self.a
            .iter()
            .zip(&self.mult)
            .flat_map(|(&a, &m)| std::iter::repeat(a).take(m))
            .collect()
    }
}

/// Bookkeeping for [`i4_partition_next`].
///
/// `done == true` on entry starts the sequence; it is true again after the
/// final partition `1 + 1 + ... + 1` has been produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionState {
    pub partition: Partition,
    pub done: bool,
}

impl Default for PartitionState {
    fn default() -> Self {
        Self {
            partition: Partition::default(),
            done: true,
        }
    }
}

/// Advances `state` to the next partition of `n` in reverse lexicographic order.
///
/// The sequence starts at `(n)`. Each step removes the trailing ones,
/// lowers the smallest remaining part `r` by one, and refills the freed
/// amount with as many parts `r - 1` as fit plus a remainder.
pub fn i4_partition_next(n: usize, state: &mut PartitionState) -> Result<()> {
    if n < 1 {
        return Err(Error::invalid("partitions are defined for n >= 1"));
    }
    if state.done {
        state.partition = Partition {
            a: vec![n],
            mult: vec![1],
        };
        state.done = n == 1;
        debug!("i4_partition_next: starting sequence for n={n}");
        return Ok(());
    }
    if state.partition.total() != n || state.partition.a.len() != state.partition.mult.len() {
        return Err(Error::state(format!(
            "i4_partition_next called with a partition of {} for n={}",
            state.partition.total(),
            n
        )));
    }
    if state.partition.a == [1] {
        return Err(Error::state("i4_partition_next called past the last partition"));
    }

    let Partition { a, mult } = &mut state.partition;
    let mut freed = 1;
    if a.last() == Some(&1) {
        freed += mult.pop().unwrap_or(0);
        a.pop();
    }
    let d = a.len() - 1;
    let smaller = a[d] - 1;
    if mult[d] != 1 {
        mult[d] -= 1;
        a.push(smaller);
        mult.push(0);
    }
    let d = a.len() - 1;
    a[d] = smaller;
    mult[d] = 1 + freed / smaller;
    let remainder = freed % smaller;
    if remainder != 0 {
        a.push(remainder);
        mult.push(1);
    }

    state.done = state.partition.a == [1];
    if state.done {
        debug!("i4_partition_next: sequence for n={n} exhausted");
    }
    Ok(())
}

/// Bookkeeping for [`i4_partition_next2`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionVecState {
    /// Parts in nonincreasing order.
    pub parts: Vec<usize>,
    pub more: bool,
}

/// Advances `state` to the next partition of `n`, represented as a
/// nonincreasing list of parts.
///
/// Produces the same sequence as [`i4_partition_next`].
pub fn i4_partition_next2(n: usize, state: &mut PartitionVecState) -> Result<()> {
    if n < 1 {
        return Err(Error::invalid("partitions are defined for n >= 1"));
    }
    if !state.more {
        state.parts = vec![n];
        state.more = n > 1;
        return Ok(());
    }
    if state.parts.iter().sum::<usize>() != n {
        return Err(Error::state(format!(
            "i4_partition_next2 called with parts {:?} for n={}",
            state.parts, n
        )));
    }
    let Some(i) = state.parts.iter().rposition(|&x| x > 1) else {
        return Err(Error::state("i4_partition_next2 called past the last partition"));
    };

    let parts = &mut state.parts;
    let smaller = parts[i] - 1;
    let mut rest: usize = parts[i..].iter().sum();
    parts.truncate(i);
    while rest > 0 {
        let part = smaller.min(rest);
        parts.push(part);
        rest -= part;
    }
    state.more = state.parts[0] > 1;
    Ok(())
}

/// Returns a uniformly random partition of `n`.
///
/// `table` must hold `P(1), ..., P(n)` as produced by [`i4_partition_count2`].
/// While `m > 0` remain, a pair `(d, j)` is drawn with probability
/// `d P(m - jd) / (m P(m))` and `j` parts of size `d` are added.
pub fn i4_partition_random<R: Rng + ?Sized>(
    n: usize,
    table: &[u64],
    rng: &mut R,
) -> Result<Partition> {
    if n < 1 {
        return Err(Error::invalid("partitions are defined for n >= 1"));
    }
    if table.len() < n {
        return Err(Error::invalid(format!(
            "partition count table has {} entries, need {}",
            table.len(),
            n
        )));
    }
    if table[..n].contains(&0) {
        return Err(Error::invalid("partition count table is inconsistent"));
    }
    let count = |m: usize| -> u128 {
        if m == 0 {
            1
        } else {
            table[m - 1] as u128
        }
    };

    let mut mult = vec![0usize; n + 1];
    let mut m = n;
    while m > 0 {
        let mut z = rng.gen_range(0..m as u128 * count(m));
        let mut chosen = None;
        'search: for d in 1..=m {
            let mut j = 1;
            while j * d <= m {
                let weight = d as u128 * count(m - j * d);
                if z < weight {
                    chosen = Some((d, j));
                    break 'search;
                }
                z -= weight;
                j += 1;
            }
        }
        let Some((d, j)) = chosen else {
            return Err(Error::invalid("partition count table is inconsistent"));
        };
        trace!("i4_partition_random: {j} parts of size {d}");
        mult[d] += j;
        m -= j * d;
    }

    let mut partition = Partition::default();
    for d in (1..=n).rev() {
        if mult[d] > 0 {
            partition.a.push(d);
            partition.mult.push(mult[d]);
        }
    }
    Ok(partition)
}

/// Returns the conjugate partition, whose `i`-th part counts the parts of
/// `partition` that are at least `i`.
pub fn i4_partition_conj(partition: &Partition) -> Partition {
    let parts = partition.parts();
    let largest = parts.first().copied().unwrap_or(0);
    let mut conj = Partition::default();
    for i in 1..=largest {
        let size = parts.iter().take_while(|&&p| p >= i).count();
        if conj.a.last() == Some(&size) {
            if let Some(m) = conj.mult.last_mut() {
                *m += 1;
            }
        } else {
            conj.a.push(size);
            conj.mult.push(1);
        }
    }
    conj
}

/// Iterator over the partitions of `n` in [`i4_partition_next`] order.
#[derive(Debug, Clone)]
pub struct Partitions {
    n: usize,
    state: PartitionState,
    finished: bool,
}

impl Partitions {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            state: PartitionState::default(),
            finished: false,
        }
    }
}

impl Iterator for Partitions {
    type Item = Partition;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if i4_partition_next(self.n, &mut self.state).is_err() {
            self.finished = true;
            return None;
        }
        self.finished = self.state.done;
        Some(self.state.partition.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_pentagonal_numbers() {
        let values: Vec<u64> = [1, -1, 2, -2, 3, -3].iter().map(|&k| pent_enum(k)).collect();
        assert_eq!(values, vec![1, 2, 5, 7, 12, 15]);
    }

    #[test]
    fn test_partition_count_known_values() {
        let p = i4_partition_count(10).unwrap();
        assert_eq!(p, vec![1, 1, 2, 3, 5, 7, 11, 15, 22, 30, 42]);
        assert_eq!(i4_partition_count(30).unwrap()[30], 5604);
        assert_eq!(i4_partition_count(100).unwrap()[100], 190_569_292);
    }

    #[test]
    fn test_partition_count_overflow() {
        assert!(i4_partition_count(416).is_ok());
        assert_eq!(
            i4_partition_count(417),
            Err(Error::Overflow("partition count"))
        );
    }

    #[test]
    fn test_partition_count2_agrees() {
        let p = i4_partition_count(60).unwrap();
        assert_eq!(i4_partition_count2(60).unwrap(), p[1..].to_vec());
        assert!(i4_partition_count2(0).unwrap().is_empty());
    }

    #[test]
    fn test_partition_next_n5() {
        let partitions: Vec<_> = Partitions::new(5).collect();
        let expected = vec![
            (vec![5], vec![1]),
            (vec![4, 1], vec![1, 1]),
            (vec![3, 2], vec![1, 1]),
            (vec![3, 1], vec![1, 2]),
            (vec![2, 1], vec![2, 1]),
            (vec![2, 1], vec![1, 3]),
            (vec![1], vec![5]),
        ];
        let actual: Vec<_> = partitions
            .into_iter()
            .map(|p| (p.a, p.mult))
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_partition_next_counts() {
        let p = i4_partition_count(12).unwrap();
        for n in 1..=12 {
            let partitions: Vec<_> = Partitions::new(n).collect();
            assert_eq!(partitions.len() as u64, p[n]);
            assert!(partitions.iter().all(|q| q.total() == n));
        }
    }

    #[test]
    fn test_partition_next_single() {
        let mut state = PartitionState::default();
        i4_partition_next(1, &mut state).unwrap();
        assert_eq!(state.partition.parts(), vec![1]);
        assert!(state.done);
        assert!(i4_partition_next(0, &mut state).is_err());
    }

    #[test]
    fn test_partition_next_rejects_corrupted_state() {
        let mut state = PartitionState {
            partition: Partition::from_parts(&[3, 1]).unwrap(),
            done: false,
        };
        assert!(matches!(
            i4_partition_next(5, &mut state),
            Err(Error::InvalidState(_))
        ));
    }

    #[test]
    fn test_partition_next2_matches_next() {
        for n in 1..=9 {
            let mut state = PartitionVecState::default();
            let mut listed = Vec::new();
            loop {
                i4_partition_next2(n, &mut state).unwrap();
                listed.push(state.parts.clone());
                if !state.more {
                    break;
                }
            }
            let expected: Vec<_> = Partitions::new(n).map(|p| p.parts()).collect();
            assert_eq!(listed, expected);
        }
    }

    #[test]
    fn test_from_parts_and_conjugate() {
        let partition = Partition::from_parts(&[1, 4, 2]).unwrap();
        assert_eq!(partition.a, vec![4, 2, 1]);
        assert_eq!(partition.mult, vec![1, 1, 1]);
        let conj = i4_partition_conj(&partition);
        assert_eq!(conj.parts(), vec![3, 2, 1, 1]);
        assert_eq!(i4_partition_conj(&conj), partition);
        assert!(Partition::from_parts(&[2, 0]).is_err());
    }

    #[test]
    fn test_random_partition_totals() {
        let table = i4_partition_count2(20).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for n in 1..=20 {
            let partition = i4_partition_random(n, &table, &mut rng).unwrap();
            assert_eq!(partition.total(), n);
            assert!(partition.a.windows(2).all(|w| w[0] > w[1]));
        }
        assert!(i4_partition_random(21, &table, &mut rng).is_err());
    }

    #[test]
    fn test_random_partition_rejects_zero_counts() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            i4_partition_random(3, &[0, 0, 0], &mut rng),
            Err(Error::invalid("partition count table is inconsistent"))
        );
        assert!(matches!(
            i4_partition_random(3, &[1, 2, 0], &mut rng),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_random_partition_roughly_uniform() {
        let table = i4_partition_count2(4).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let mut counts: HashMap<Partition, usize> = HashMap::new();
        for _ in 0..5000 {
            *counts
                .entry(i4_partition_random(4, &table, &mut rng).unwrap())
                .or_default() += 1;
        }
        assert_eq!(counts.len(), 5);
        for &count in counts.values() {
            assert!((850..=1150).contains(&count), "count {count} too far from 1000");
        }
    }
}
