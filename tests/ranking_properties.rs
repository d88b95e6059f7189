use combrank::cs::combinatorial::{
    comp_rank_grlex, comp_unrank_grlex, gray_rank2, gray_unrank2, i4_factorial,
    i4_partition_count, i4_partition_count2, i4_partition_random, ksub_next2, ksub_rank,
    ksub_unrank, perm0_cycle, perm0_inverse, perm0_next, perm0_random, perm0_rank,
    perm0_rank_big, perm0_tj_rank, perm0_tj_unrank, perm0_unrank, subset_gray_rank,
    subset_gray_unrank, KsubRevolvingState, MinimalChangePermutations, Partitions,
    Perm0NextState,
};
use num_bigint::BigUint;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::collections::HashSet;

fn perm_rank_strategy() -> impl Strategy<Value = (usize, u64)> {
    (1usize..=10).prop_flat_map(|n| (Just(n), 1..=i4_factorial(n).unwrap()))
}

proptest! {
    #[test]
    fn perm_rank_round_trip((n, rank) in perm_rank_strategy()) {
        let p = perm0_unrank(n, rank).unwrap();
        prop_assert_eq!(perm0_rank(n, &p).unwrap(), rank);
        prop_assert_eq!(perm0_rank_big(n, &p).unwrap(), BigUint::from(rank));
    }

    #[test]
    fn trotter_johnson_round_trip((n, rank) in perm_rank_strategy()) {
        let p = perm0_tj_unrank(n, rank).unwrap();
        prop_assert_eq!(perm0_tj_rank(n, &p).unwrap(), rank);
    }

    #[test]
    fn inverse_and_cycles_agree(n in 0usize..40, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let p = perm0_random(n, &mut rng);
        let inv = perm0_inverse(n, &p).unwrap();
        for i in 0..n {
            prop_assert_eq!(inv[p[i]], i);
        }
        let cycles = perm0_cycle(n, &p).unwrap();
        prop_assert_eq!(cycles.cycles.iter().map(Vec::len).sum::<usize>(), n);
        prop_assert_eq!(perm0_cycle(n, &inv).unwrap().sign, cycles.sign);
    }

    #[test]
    fn ksub_rank_round_trip(k in 1usize..=8, rank in 1u64..=1_000_000) {
        let a = ksub_unrank(k, rank).unwrap();
        prop_assert_eq!(a.len(), k);
        prop_assert!(a[0] >= 1);
        prop_assert!(a.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(ksub_rank(k, &a).unwrap(), rank);
    }

    #[test]
    fn comp_rank_round_trip(xc in prop::collection::vec(0usize..8, 1..6)) {
        let rank = comp_rank_grlex(xc.len(), &xc).unwrap();
        prop_assert_eq!(comp_unrank_grlex(xc.len(), rank).unwrap(), xc);
    }

    #[test]
    fn gray_codes_are_adjacent(rank in 0u64..u64::MAX) {
        prop_assert_eq!(gray_rank2(gray_unrank2(rank)), rank);
        let flipped = gray_unrank2(rank) ^ gray_unrank2(rank + 1);
        prop_assert_eq!(flipped.count_ones(), 1);
    }

    #[test]
    fn subset_gray_round_trip(n in 1usize..=63, raw in any::<u64>()) {
        let rank = raw % (1u64 << n) + 1;
        let a = subset_gray_unrank(rank, n).unwrap();
        prop_assert_eq!(a.len(), n);
        prop_assert_eq!(subset_gray_rank(&a).unwrap(), rank);
    }

    #[test]
    fn random_partitions_sum_to_n(n in 1usize..=60, seed in any::<u64>()) {
        let table = i4_partition_count2(60).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let partition = i4_partition_random(n, &table, &mut rng).unwrap();
        prop_assert_eq!(partition.total(), n);
        prop_assert!(partition.mult.iter().all(|&m| m > 0));
    }
}

#[test]
fn test_minimal_change_generators_run_in_parallel() {
    let counts: Vec<u64> = (1..=8usize)
        .into_par_iter()
        .map(|n| {
            let mut state = Perm0NextState::default();
            let mut seen = HashSet::new();
            loop {
                perm0_next(n, &mut state).unwrap();
                seen.insert(state.p.clone());
                if !state.more {
                    break;
                }
            }
            seen.len() as u64
        })
        .collect();
    let expected: Vec<u64> = (1..=8).map(|n| i4_factorial(n).unwrap()).collect();
    assert_eq!(counts, expected);
}

#[test]
fn test_revolving_door_states_are_independent() {
    let results: Vec<usize> = (1..=6usize)
        .into_par_iter()
        .map(|k| {
            let mut state = KsubRevolvingState::default();
            let mut steps = 0;
            loop {
                ksub_next2(10, k, &mut state).unwrap();
                steps += 1;
                if !state.more {
                    break;
                }
            }
            steps
        })
        .collect();
    assert_eq!(results, vec![10, 45, 120, 210, 252, 210]);
}

#[test]
fn test_enumerations_match_counts() {
    let p = i4_partition_count(15).unwrap();
    let sizes: Vec<usize> = (1..=15usize)
        .into_par_iter()
        .map(|n| Partitions::new(n).count())
        .collect();
    for (n, size) in (1..=15).zip(sizes) {
        assert_eq!(size as u64, p[n]);
    }
    assert_eq!(MinimalChangePermutations::new(6).count(), 720);
}
