//! Naive vs Strassen multiplication and block vs LU inversion.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strassen::strassen::multiply::strassen_multiply;
use strassen::{Config, Matrix, invert_via_lu, invert_with, naive_multiply};

fn random_matrix(n: usize, seed: u64) -> Matrix {
    let mut rng = StdRng::seed_from_u64(seed);
    Matrix::from_fn(n, n, |_, _| rng.gen_range(-1.0..1.0))
}

fn diagonally_dominant(n: usize, seed: u64) -> Matrix {
    let m = random_matrix(n, seed);
    Matrix::from_fn(n, n, |i, j| if i == j { m[(i, j)] + n as f64 } else { m[(i, j)] })
}

fn bench_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");
    group.sample_size(10);

    for size in [128, 256, 512] {
        let a = random_matrix(size, 1);
        let b = random_matrix(size, 2);

        group.bench_with_input(BenchmarkId::new("naive", size), &size, |bench, _| {
            bench.iter(|| naive_multiply(black_box(&a), black_box(&b)).unwrap())
        });

        for threshold in [32, 64, 128] {
            group.bench_with_input(
                BenchmarkId::new(format!("strassen_t{}", threshold), size),
                &size,
                |bench, _| {
                    bench.iter(|| strassen_multiply(black_box(&a), black_box(&b), threshold).unwrap())
                },
            );
        }
    }

    group.finish();
}

fn bench_invert(c: &mut Criterion) {
    let mut group = c.benchmark_group("invert");
    group.sample_size(10);

    for size in [64, 128, 256] {
        let a = diagonally_dominant(size, 3);
        let config = Config::default();

        group.bench_with_input(BenchmarkId::new("block", size), &size, |bench, _| {
            bench.iter(|| invert_with(black_box(&a), &config).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("lu", size), &size, |bench, _| {
            bench.iter(|| invert_via_lu(black_box(&a)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_multiply, bench_invert);
criterion_main!(benches);
