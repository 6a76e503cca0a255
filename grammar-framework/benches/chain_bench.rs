use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use grammar_framework::{evaluate, EvalStep, Grammar, Position, PullSource};

fn sequenced_chain(n: usize) -> Grammar<char, String> {
    Grammar::sequence((0..n).map(|_| Grammar::literal(['a'])).collect())
}

fn bench_sequenced_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequenced_chain");
    for &n in &[1_000usize, 10_000, 100_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let grammar = sequenced_chain(n);
            let source = PullSource::new(vec!['a'; n]);
            b.iter(|| {
                let mut evaluation = evaluate(&grammar, &source, Position::start());
                let mut matched = 0usize;
                while let Ok(EvalStep::Match(_)) = evaluation.poll() {
                    matched += 1;
                }
                matched
            });
        });
    }
    group.finish();
}

fn bench_quantifier_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantifier_enumeration");
    for &n in &[100usize, 1_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let grammar: Grammar<char, ()> = Grammar::element(|c: &char| (*c == 'x').then_some(()))
                .repeat(1, None)
                .expect("bounds are valid");
            let source = PullSource::new(vec!['x'; n]);
            b.iter(|| grammar.matches(&source, Position::start()).count());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sequenced_chain, bench_quantifier_enumeration);
criterion_main!(benches);
