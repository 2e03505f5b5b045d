use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use strand_core::Sequence;

const SIZES: [usize; 3] = [64, 1_024, 16_384];

fn build(len: usize) -> Sequence<u64> {
    (0..len as u64).collect()
}

fn bench_prepend_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepend_chain");
    for &len in &SIZES {
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter(|| {
                let mut seq = Sequence::new();
                for value in 0..len as u64 {
                    seq = seq.prepend(value);
                }
                seq
            });
        });
    }
    group.finish();
}

fn bench_sibling_prepend(c: &mut Criterion) {
    let mut group = c.benchmark_group("sibling_prepend");
    for &len in &SIZES {
        let parent = build(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &parent, |b, parent| {
            b.iter(|| (parent.prepend(1), parent.prepend(2)));
        });
    }
    group.finish();
}

fn bench_concat(c: &mut Criterion) {
    let mut group = c.benchmark_group("concat");
    for &len in &SIZES {
        let left = build(len);
        let right = build(len);
        group.throughput(Throughput::Elements(2 * len as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(len),
            &(left, right),
            |b, (left, right)| {
                b.iter(|| left.concat(right));
            },
        );
    }
    group.finish();
}

fn bench_indexed_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexed_get");
    for &len in &SIZES {
        let parts: Vec<Sequence<u64>> = (0..16).map(|_| build(len / 16)).collect();
        let seq = Sequence::concat_all(&parts).expect("non-empty part list");
        group.throughput(Throughput::Elements(seq.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &seq, |b, seq| {
            b.iter(|| (0..seq.len()).filter_map(|i| seq.get(i).ok()).sum::<u64>());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_prepend_chain,
    bench_sibling_prepend,
    bench_concat,
    bench_indexed_get
);
criterion_main!(benches);
