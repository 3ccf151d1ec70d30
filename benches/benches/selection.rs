// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use understory_selection::{
    CollectionChange, ListSelection, SelectedIndex, SelectionPolicy,
};

fn bench_commit_item_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/commit_item");

    // Item proposals are resolved with a linear scan of the collection.
    for len in [128usize, 2_048, 32_768] {
        let items: Vec<u32> = (0..(len as u32)).collect();
        let target = items[len - 1];
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::from_parameter(len), &items, |b, items| {
            b.iter_batched(
                || ListSelection::<u32>::new(SelectionPolicy::REQUIRED),
                |mut sel| {
                    sel.propose_item(target, items, true);
                    black_box(sel.commit(items, &mut ()));
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_structural_edits(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/structural_edits");

    for edits in [64usize, 1_024] {
        group.throughput(Throughput::Elements(edits as u64));
        group.bench_with_input(BenchmarkId::from_parameter(edits), &edits, |b, &edits| {
            b.iter_batched(
                || {
                    let mut sel = ListSelection::<u32>::new(SelectionPolicy::default());
                    sel.propose_index(SelectedIndex::Index(edits), false);
                    sel.commit(&vec![0; edits * 2], &mut ());
                    sel
                },
                |mut sel| {
                    for i in 0..edits {
                        sel.apply_collection_change(
                            CollectionChange::Add {
                                location: i,
                                count: 1,
                            },
                            edits * 2 + 1,
                        );
                        sel.apply_collection_change(
                            CollectionChange::Remove {
                                location: 0,
                                count: 1,
                            },
                            edits * 2,
                        );
                    }
                    black_box(sel);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_commit_item_lookup, bench_structural_edits);
criterion_main!(benches);
