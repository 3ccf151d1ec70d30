// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use understory_depth_queue::{CommitPass, DepthQueue, InvalidationClient, PassOrder};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }
}

#[derive(Copy, Clone, Debug)]
struct Client {
    id: u32,
    depth: usize,
}

impl InvalidationClient for Client {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn nest_level(&self) -> usize {
        self.depth
    }

    // Treat the id space as a heap-shaped tree: parent of `n` is `(n - 1) / 2`.
    fn is_ancestor_of(&self, other: &Self) -> bool {
        let mut cursor = other.id;
        while cursor > 0 {
            cursor = (cursor - 1) / 2;
            if cursor == self.id {
                return true;
            }
        }
        false
    }
}

fn heap_depth(id: u32) -> usize {
    (u32::BITS - (id + 1).leading_zeros() - 1) as usize
}

fn clients(n: u32, seed: u64) -> Vec<Client> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|_| {
            let id = rng.next_u32() % (n * 4);
            Client {
                id,
                depth: heap_depth(id),
            }
        })
        .collect()
}

fn filled(clients: &[Client]) -> DepthQueue<Client> {
    let mut queue = DepthQueue::new();
    for client in clients {
        queue.insert(*client);
    }
    queue
}

fn bench_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("depth_queue/drain");

    for n in [256_u32, 4_096, 65_536] {
        let clients = clients(n, 0xD1A7_0000_0000_0001);
        group.throughput(Throughput::Elements(u64::from(n)));

        group.bench_with_input(BenchmarkId::new("insert", n), &clients, |b, clients| {
            b.iter(|| black_box(filled(clients)));
        });

        group.bench_with_input(BenchmarkId::new("pop", n), &clients, |b, clients| {
            b.iter_batched(
                || filled(clients),
                |mut queue| {
                    while let Some(client) = queue.pop() {
                        black_box(client);
                    }
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("shift", n), &clients, |b, clients| {
            b.iter_batched(
                || filled(clients),
                |mut queue| {
                    while let Some(client) = queue.shift() {
                        black_box(client);
                    }
                },
                BatchSize::LargeInput,
            );
        });

        // Many targeted removals between pops: bounds go stale and are
        // tightened once by the next pop.
        group.bench_with_input(
            BenchmarkId::new("remove_then_pop", n),
            &clients,
            |b, clients| {
                b.iter_batched(
                    || filled(clients),
                    |mut queue| {
                        for client in clients.iter().step_by(2) {
                            black_box(queue.remove(client));
                        }
                        while let Some(client) = queue.pop() {
                            black_box(client);
                        }
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_cascading_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("depth_queue/cascading_pass");

    // Every commit dirties both children until `n` clients were committed.
    for n in [1_024_u32, 16_384] {
        group.throughput(Throughput::Elements(u64::from(n)));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || {
                    let mut queue = DepthQueue::new();
                    queue.insert(Client { id: 0, depth: 0 });
                    queue
                },
                |mut queue| {
                    let stats = CommitPass::new(PassOrder::ShallowestFirst)
                        .run(&mut queue, |client, queue| {
                            for child in [client.id * 2 + 1, client.id * 2 + 2] {
                                if child < n {
                                    queue.insert(Client {
                                        id: child,
                                        depth: client.depth + 1,
                                    });
                                }
                            }
                        })
                        .expect("unbounded pass never errors");
                    black_box(stats);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_remove_largest_child(c: &mut Criterion) {
    let mut group = c.benchmark_group("depth_queue/remove_largest_child");

    for n in [256_u32, 4_096] {
        let clients = clients(n, 0xD1A7_0000_0000_0002);
        let ancestor = Client { id: 1, depth: 1 };
        group.bench_with_input(BenchmarkId::from_parameter(n), &clients, |b, clients| {
            b.iter_batched(
                || filled(clients),
                |mut queue| {
                    while let Some(client) = queue.remove_largest_child(&ancestor) {
                        black_box(client);
                    }
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_drain,
    bench_cascading_pass,
    bench_remove_largest_child
);
criterion_main!(benches);
