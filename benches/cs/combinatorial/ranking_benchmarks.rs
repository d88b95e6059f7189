use combrank::cs::combinatorial::{
    comp_rank_grlex, comp_unrank_grlex, i4_partition_count, ksub_rank, ksub_unrank,
    perm0_rank, perm0_rank_big, perm0_unrank, subset_gray_rank, subset_gray_unrank,
    GraySubsets, LexPermutations, MinimalChangePermutations, Partitions, RevolvingDoorSubsets,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_permutation_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("perm0_rank");
    for n in [5usize, 10, 20] {
        let p: Vec<usize> = (0..n).rev().collect();
        group.bench_with_input(BenchmarkId::new("u64", n), &p, |b, p| {
            b.iter(|| perm0_rank(n, black_box(p)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("big", n), &p, |b, p| {
            b.iter(|| perm0_rank_big(n, black_box(p)).unwrap())
        });
    }
    group.finish();

    c.bench_function("perm0_unrank_20", |b| {
        b.iter(|| perm0_unrank(20, black_box(1_000_000_000_000_000)).unwrap())
    });
}

fn bench_subset_ranking(c: &mut Criterion) {
    c.bench_function("ksub_unrank_rank_k10", |b| {
        b.iter(|| {
            let a = ksub_unrank(10, black_box(123_456_789)).unwrap();
            ksub_rank(10, &a).unwrap()
        })
    });
    c.bench_function("comp_unrank_rank_k6", |b| {
        b.iter(|| {
            let xc = comp_unrank_grlex(6, black_box(987_654)).unwrap();
            comp_rank_grlex(6, &xc).unwrap()
        })
    });
    c.bench_function("subset_gray_unrank_rank_n40", |b| {
        b.iter(|| {
            let a = subset_gray_unrank(black_box(555_555_555_555), 40).unwrap();
            subset_gray_rank(&a).unwrap()
        })
    });
}

fn bench_generators(c: &mut Criterion) {
    let mut group = c.benchmark_group("generators");
    group.bench_function("minimal_change_n8", |b| {
        b.iter(|| MinimalChangePermutations::new(black_box(8)).count())
    });
    group.bench_function("lex_n8", |b| {
        b.iter(|| LexPermutations::new(black_box(8)).count())
    });
    group.bench_function("revolving_door_20_5", |b| {
        b.iter(|| RevolvingDoorSubsets::new(black_box(20), 5).count())
    });
    group.bench_function("gray_subsets_n14", |b| {
        b.iter(|| GraySubsets::new(black_box(14)).count())
    });
    group.bench_function("partitions_n30", |b| {
        b.iter(|| Partitions::new(black_box(30)).count())
    });
    group.finish();

    c.bench_function("i4_partition_count_400", |b| {
        b.iter(|| i4_partition_count(black_box(400)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_permutation_ranking,
    bench_subset_ranking,
    bench_generators
);
criterion_main!(benches);
