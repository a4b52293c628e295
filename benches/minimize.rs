use criterion::{criterion_group, criterion_main, Criterion};
use minidfa::prelude::*;
use std::hint::black_box;

/// A counting automaton with `n` chained states plus a reset symbol; it collapses to a
/// much smaller quotient, so minimization does real splitting work.
fn chain_dfa(n: usize) -> Dfa {
    let mut dfa = Dfa::default();
    dfa.alphabet = vec!["a".to_string(), "r".to_string()];
    for i in 0..n {
        dfa.add_state(format!("q{i}"), i == 0, i % 4 == 0, 0.0, 0.0);
    }
    for i in 0..n {
        dfa.add_transition(format!("q{i}"), "a", format!("q{}", (i + 1) % n));
        dfa.add_transition(format!("q{i}"), "r", "q0");
    }
    dfa
}

fn bench_minimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimize");
    for size in [16, 64, 128] {
        let dfa = chain_dfa(size);
        group.bench_function(format!("chain_{size}"), |b| {
            b.iter(|| black_box(&dfa).minimize())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_minimize);
criterion_main!(benches);
