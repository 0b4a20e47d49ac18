use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lingalign::{basic_align, edit_dist, BasicSettings, Scorer};

const ALPHABET: [&str; 6] = ["p", "t", "k", "a", "i", "u"];

fn random_tokens(rng: &mut StdRng, len: usize) -> Vec<&'static str> {
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}

fn bench_alignment(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let seq_a = random_tokens(&mut rng, 32);
    let seq_b = random_tokens(&mut rng, 32);
    let scorer: Scorer<&str> = Scorer::Simple;
    let settings = BasicSettings::default();

    c.bench_function("basic_align/global/32x32", |b| {
        b.iter(|| basic_align(black_box(&seq_a), black_box(&seq_b), &scorer, &settings))
    });

    c.bench_function("edit_dist/32x32", |b| {
        b.iter(|| edit_dist(black_box(&seq_a), black_box(&seq_b)))
    });
}

criterion_group!(benches, bench_alignment);
criterion_main!(benches);
