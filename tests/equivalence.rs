use saxpy::{AggregatorSpec, SaxpyReport, SaxpySpec, VectorStore};

const SIZE: usize = 10_007;
const ITERATIONS: usize = 25;
const SEED: u64 = 42;

fn run(workers: usize, aggregator: AggregatorSpec) -> SaxpyReport {
    saxpy::run(SaxpySpec {
        size: SIZE,
        seed: SEED,
        workers,
        iterations: ITERATIONS,
        aggregator,
    })
    .unwrap()
}

fn assert_close(lhs: &[f64], rhs: &[f64]) {
    assert_eq!(lhs.len(), rhs.len());

    for (i, (l, r)) in lhs.iter().zip(rhs).enumerate() {
        let tolerance = 1e-9 * l.abs().max(r.abs()).max(1.);
        assert!((l - r).abs() <= tolerance, "index {i}: {l} != {r}");
    }
}

#[test]
fn worker_count_does_not_change_results() {
    let reference = run(1, AggregatorSpec::Blocking);

    for workers in [2, 3, 8, 13] {
        for aggregator in [AggregatorSpec::Blocking, AggregatorSpec::Atomic] {
            let report = run(workers, aggregator);

            // Every element goes through the same updates whoever owns it.
            assert_eq!(report.y, reference.y, "n={workers} {aggregator:?}");
            assert_close(&report.averages, &reference.averages);
        }
    }
}

#[test]
fn single_worker_runs_are_bit_identical() {
    let first = run(1, AggregatorSpec::Blocking);
    let second = run(1, AggregatorSpec::Atomic);

    let bits = |values: &[f64]| values.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&first.y), bits(&second.y));
    assert_eq!(bits(&first.averages), bits(&second.averages));
}

#[test]
fn same_seed_same_initial_vectors() {
    let first = VectorStore::seeded(SIZE, SEED).unwrap();
    let second = VectorStore::seeded(SIZE, SEED).unwrap();

    assert_eq!(first.x(), second.x());
    assert_eq!(first.y().to_vec(), second.y().to_vec());
    assert_eq!(first.a().to_bits(), second.a().to_bits());
}

#[test]
fn final_vector_matches_closed_form() {
    let store = VectorStore::seeded(SIZE, SEED).unwrap();
    let (x, y0, a) = (store.x().to_vec(), store.y().to_vec(), store.a());
    let report = run(4, AggregatorSpec::Atomic);

    let mut expected = y0;
    for _ in 0..ITERATIONS {
        for (y, x) in expected.iter_mut().zip(&x) {
            *y += a * x;
        }
    }

    assert_eq!(report.y, expected);
}
