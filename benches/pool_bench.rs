//! Benchmarks for fastrm
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::fs;

fn benchmark_queue_operations(c: &mut Criterion) {
    use fastrm::pool::TaskQueue;

    c.bench_function("queue_push_pop", |b| {
        let queue = TaskQueue::new();

        b.iter(|| {
            queue.push(black_box(42u64)).unwrap();
            let item = queue.try_pop().unwrap();
            black_box(item);
        })
    });
}

fn benchmark_pool_lifecycle(c: &mut Criterion) {
    use fastrm::WorkerPool;

    c.bench_function("pool_1000_noop_units", |b| {
        b.iter(|| {
            let mut pool = WorkerPool::new(8).unwrap();
            for _ in 0..1000 {
                pool.submit(|| {}).unwrap();
            }
            pool.stop();
        })
    });
}

fn benchmark_tree_removal(c: &mut Criterion) {
    use fastrm::TreeWalker;

    let scratch = tempfile::tempdir().unwrap();
    let walker = TreeWalker::new(num_workers());

    c.bench_function("remove_tree_500_files", |b| {
        b.iter_batched(
            || {
                let root = tempfile::tempdir_in(scratch.path()).unwrap().into_path();
                for d in 0..10 {
                    let dir = root.join(format!("d{}", d));
                    fs::create_dir(&dir).unwrap();
                    for f in 0..50 {
                        fs::write(dir.join(format!("f{}", f)), b"x").unwrap();
                    }
                }
                root
            },
            |root| black_box(walker.remove(&root)),
            BatchSize::PerIteration,
        )
    });
}

fn num_workers() -> usize {
    (num_cpus::get() * 5).min(fastrm::config::MAX_WORKERS)
}

criterion_group!(
    benches,
    benchmark_queue_operations,
    benchmark_pool_lifecycle,
    benchmark_tree_removal
);
criterion_main!(benches);
