use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use avl_alloc::{AvlTreeMultiset, AvlTreeSet};

const N: usize = 100_000;

pub fn benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (1..=N).map(|_| rng.gen()).collect();

    c.bench_function("set_insert", |b| {
        let mut set = AvlTreeSet::new();
        b.iter(|| {
            for value in &values {
                black_box(set.insert(*value).unwrap());
            }
        })
    });

    let mut set = AvlTreeSet::new();
    for value in &values {
        set.insert(*value).unwrap();
    }

    c.bench_function("set_get", |b| {
        b.iter(|| {
            for value in &values {
                black_box(set.get(value));
            }
        })
    });

    c.bench_function("set_iter", |b| {
        b.iter(|| {
            for value in &set {
                black_box(value);
            }
        })
    });

    c.bench_function("multiset_insert_remove", |b| {
        b.iter(|| {
            let mut bag = AvlTreeMultiset::new();
            for value in &values {
                bag.insert(*value % 1_000).unwrap();
            }
            for value in &values {
                black_box(bag.remove(&(*value % 1_000)));
            }
        })
    });
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
