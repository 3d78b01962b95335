// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_composable`.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use hashbrown::HashMap;

use understory_composable::{
    ComposeSet, Composable, PropRecords, ResolveOptions, Resolver, Whitelist, WhitelistMemo,
    compose_whitelisted,
};

#[derive(Clone, Copy, Default)]
struct RenderState {
    hovered: bool,
    pressed: bool,
}

const HOVERED: RenderState = RenderState {
    hovered: true,
    pressed: false,
};

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("composable/resolve");

    group.bench_function("literal", |b| {
        let resolver = Resolver::<RenderState, f64>::new(Composable::value(100.0));
        b.iter(|| black_box(resolver.resolve(black_box(&HOVERED))))
    });

    group.bench_function("computed", |b| {
        let resolver = Resolver::new(Composable::computed(|s: &RenderState, _| {
            Some(if s.hovered { 1.0_f64 } else { 0.5 })
        }));
        b.iter(|| black_box(resolver.resolve(black_box(&HOVERED))))
    });

    group.bench_function("fallback_transform", |b| {
        let resolver = Resolver::<RenderState, f64>::with_options(
            Composable::computed(|s: &RenderState, _| s.pressed.then_some(0.8)),
            ResolveOptions::new()
                .fallback(|s: &RenderState, _| s.hovered.then_some(0.9))
                .transform(|v: f64, _, _| v.clamp(0.0, 1.0)),
        );
        b.iter(|| black_box(resolver.resolve(black_box(&HOVERED))))
    });

    group.bench_function("default", |b| {
        let resolver = Resolver::<RenderState, f64>::with_options(
            Composable::unset(),
            ResolveOptions::new().with_default(1.0),
        );
        b.iter(|| black_box(resolver.resolve(black_box(&HOVERED))))
    });

    group.finish();

    let mut group = c.benchmark_group("composable/resolve_string");

    group.bench_function("literal_clone", |b| {
        let resolver = Resolver::<RenderState, String>::new(Composable::value(
            "hello world hello world hello world".to_string(),
        ));
        b.iter(|| black_box(resolver.resolve(black_box(&HOVERED))))
    });

    group.bench_function("computed_transform", |b| {
        let resolver = Resolver::<RenderState, String>::with_options(
            Composable::computed(|s: &RenderState, _| s.hovered.then(|| "hovered".to_string())),
            ResolveOptions::new().transform(|v: String, _, _| v.to_uppercase()),
        );
        b.iter(|| black_box(resolver.resolve(black_box(&HOVERED))))
    });

    group.finish();
}

fn prop_set(len: u32) -> ComposeSet<u32, RenderState, u32> {
    let mut set = ComposeSet::new();
    for key in 0..len {
        if key % 2 == 0 {
            set.insert(key, Composable::value(key));
        } else {
            set.insert(
                key,
                Composable::computed(move |s: &RenderState, _| s.hovered.then_some(key)),
            );
            set.set_options(key, ResolveOptions::new().with_default(0));
        }
    }
    set
}

fn prop_records(len: u32) -> PropRecords<u32, RenderState, u32> {
    prop_set(len).into_parts()
}

fn bench_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("composable/records");

    for len in [4_u32, 16, 64] {
        let set = prop_set(len);
        group.bench_function(BenchmarkId::new("resolve_all", len), |b| {
            b.iter(|| black_box(set.resolve_all(black_box(&HOVERED))))
        });

        let states: HashMap<u32, RenderState> = (0..len / 2).map(|key| (key, HOVERED)).collect();
        group.bench_function(BenchmarkId::new("resolve_each", len), |b| {
            b.iter(|| black_box(set.resolve_each(black_box(&states))))
        });

        let whitelist: Whitelist<u32> = (0..len).step_by(3).collect();
        group.bench_function(BenchmarkId::new("compose_whitelisted", len), |b| {
            b.iter_batched(
                || prop_records(len),
                |(props, options)| {
                    black_box(compose_whitelisted(props, options, &whitelist, &HOVERED))
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(BenchmarkId::new("whitelist_memo_hit", len), |b| {
            let mut memo = WhitelistMemo::new(whitelist.clone());
            memo.get_or_compose(0_u64, &HOVERED, || prop_records(len));
            b.iter(|| {
                black_box(
                    memo.get_or_compose(black_box(0_u64), &HOVERED, || prop_records(len))
                        .len(),
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_records);
criterion_main!(benches);
