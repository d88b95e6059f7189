use combrank::cs::combinatorial::{
    comp_random, comp_unrank_grlex, i4_partition_count, i4_partition_count2, i4_partition_random,
    ksub_random, ksub_unrank, perm0_random, perm0_rank, subset_gray_unrank, GraySubsets,
    MinimalChangePermutations, Partitions, RevolvingDoorSubsets,
};
use combrank::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn main() -> Result<()> {
    println!("Permutations of 3 in minimal-change order, with lexicographic rank");
    for p in MinimalChangePermutations::new(3) {
        println!("  {:?}  rank {}", p, perm0_rank(3, &p)?);
    }

    println!("First six 3-subsets by rank");
    for rank in 1..=6 {
        println!("  {rank}: {:?}", ksub_unrank(3, rank)?);
    }

    println!("Revolving-door 2-subsets of 4");
    for a in RevolvingDoorSubsets::new(4, 2) {
        println!("  {a:?}");
    }

    println!("Compositions with 3 parts in graded lex order");
    for rank in 1..=10 {
        println!("  {rank}: {:?}", comp_unrank_grlex(3, rank)?);
    }

    println!("Subsets of 3 in Gray-code order");
    for (i, a) in GraySubsets::new(3).enumerate() {
        let bits: String = a.iter().by_vals().map(|b| if b { '1' } else { '0' }).collect();
        println!("  {}: {bits}", i + 1);
    }
    println!("  unrank 6 -> {:?}", subset_gray_unrank(6, 3)?);

    let counts = i4_partition_count(10)?;
    println!("Partition counts P(0..=10): {counts:?}");
    for partition in Partitions::new(4) {
        println!("  {:?}", partition.parts());
    }

    let mut rng = ChaCha20Rng::seed_from_u64(123);
    println!("Random samples (ChaCha20, seed 123)");
    println!("  permutation of 8: {:?}", perm0_random(8, &mut rng));
    println!("  5-subset of 20:   {:?}", ksub_random(20, 5, &mut rng)?);
    println!("  composition 10/4: {:?}", comp_random(10, 4, &mut rng)?);
    let table = i4_partition_count2(12)?;
    let partition = i4_partition_random(12, &table, &mut rng)?;
    println!("  partition of 12:  {:?}", partition.parts());

    Ok(())
}
