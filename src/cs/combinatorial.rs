//! Ranking, unranking and successor generation for combinatorial families.
//!
//! Each submodule covers one family: permutations of `{0, ..., n-1}`,
//! k-subsets of `{1, ..., n}`, compositions into nonnegative parts, subsets in
//! Gray-code order and integer partitions. Ranks are 1-based `u64` values;
//! [`big_rank`] lifts the permutation and subset ranks to [`num_bigint::BigUint`].
//!
//! Generators follow one pattern. A public state struct carries the current
//! object plus a `more` flag (`done` for partitions). Passing a fresh state
//! yields the first object, and the state returns to its starting value after
//! the last one, so a sequence can be replayed with the same struct.
//!
//! # Example
//! ```
//! use combrank::cs::combinatorial::{perm0_rank, perm0_unrank};
//!
//! let p = perm0_unrank(4, 24).unwrap();
//! assert_eq!(p, vec![3, 2, 1, 0]);
//! assert_eq!(perm0_rank(4, &p).unwrap(), 24);
//! ```

pub mod big_rank;
pub mod composition;
pub mod counting;
pub mod gray_code;
pub mod johnson_trotter;
pub mod ksubset;
pub mod partition;
pub mod permutation;

pub use big_rank::{
    factorial_big, ksub_rank_big, ksub_unrank_big, perm0_rank_big, perm0_unrank_big,
};
pub use composition::{
    comp_next, comp_next_grlex, comp_random, comp_random_grlex, comp_rank_grlex, comp_to_ksub,
    comp_unrank_grlex, ksub_to_comp, CompNextState, Compositions,
};
pub use counting::{i4_choose, i4_factorial};
pub use gray_code::{
    gray_code, gray_rank2, gray_unrank2, subset_gray_next, subset_gray_rank, subset_gray_unrank,
    ubvec_to_ui4, ui4_to_ubvec, GraySubsets, SubsetGrayState,
};
pub use johnson_trotter::{
    johnson_trotter, perm0_tj_next, perm0_tj_rank, perm0_tj_unrank, TrotterJohnson,
};
pub use ksubset::{
    ksub_lex_rank, ksub_lex_unrank, ksub_next, ksub_next2, ksub_random, ksub_rank, ksub_unrank,
    KsubNextState, KsubRevolvingState, LexSubsets, RevolvingDoorSubsets,
};
pub use partition::{
    i4_partition_conj, i4_partition_count, i4_partition_count2, i4_partition_next,
    i4_partition_next2, i4_partition_random, pent_enum, Partition, PartitionState,
    PartitionVecState, Partitions,
};
pub use permutation::{
    perm0_check, perm0_cycle, perm0_inverse, perm0_lex_next, perm0_next, perm0_random, perm0_rank,
    perm0_unrank, LexPermutations, MinimalChangePermutations, Perm0LexState, Perm0NextState,
    PermCycles,
};
