use std::{hint::black_box, time::Duration};

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use shelfmark::{LibraryStore, table::render_table};

fn custom_criterion() -> Criterion {
    Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(1))
        .warm_up_time(Duration::from_secs(1))
}

/// Store with `n` books, every other one borrowed
fn populated_store(n: usize) -> LibraryStore {
    let mut store = LibraryStore::new();
    for i in 0..n {
        drop(store.add(&format!("Title {i}"), &format!("Author {i}")));
        if i % 2 == 0 {
            drop(store.borrow(i));
        }
    }
    store
}

fn store_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("LibraryStore Operations");

    group.bench_function("add", |b| {
        b.iter_batched(
            LibraryStore::with_seed_books,
            |mut store| {
                drop(store.add(black_box("Dune"), black_box("Frank Herbert")));
                store
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("borrow_return_cycle", |b| {
        b.iter_batched(
            LibraryStore::with_seed_books,
            |mut store| {
                drop(store.borrow(black_box(1)));
                drop(store.return_book(black_box(1)));
                store
            },
            BatchSize::SmallInput,
        );
    });

    let store = populated_store(1_000);
    group.bench_function("list_all_1000", |b| b.iter(|| black_box(store.list_all())));
    group.bench_function("render_table_1000", |b| {
        b.iter(|| black_box(render_table(&store.list_all())));
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = custom_criterion();
    targets = store_bench
}
criterion_main!(benches);
