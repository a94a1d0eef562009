// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Rect;
use understory_sticky::{
    ElementId, FrameReporter, HandoffPolicy, RegistryRef, ScrollContainer, SpaceRect,
    StickyContext, StickyOptions, resolve,
};

const HEADER_HEIGHT: f64 = 44.0;
const SECTION_HEIGHT: f64 = 600.0;

/// A context with `len` sticky headers, one per section, already committed.
fn populated(len: usize, scroll: f64) -> (StickyContext, Vec<FrameReporter>) {
    let content = SECTION_HEIGHT * len as f64;
    let container =
        ScrollContainer::new(Rect::new(0.0, 0.0, 320.0, 480.0)).with_content_extent(content);
    let mut cx = StickyContext::new(container);
    cx.scroll_to(scroll);
    let mut reporters: Vec<_> = (0..len)
        .map(|_| FrameReporter::new(ElementId::next()))
        .collect();
    report_all(&mut cx, &mut reporters);
    cx.commit();
    (cx, reporters)
}

fn report_all(cx: &mut StickyContext, reporters: &mut [FrameReporter]) {
    for (i, reporter) in reporters.iter_mut().enumerate() {
        let y = SECTION_HEIGHT * i as f64;
        cx.report(
            reporter,
            SpaceRect::content(Rect::new(0.0, y, 320.0, y + HEADER_HEIGHT)),
        );
    }
}

fn bench_scroll_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("sticky/scroll_pass");

    // One full pass per iteration: scroll, re-report every header, commit.
    for len in [8usize, 64, 512] {
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("report_commit", len), &len, |b, &len| {
            b.iter_batched(
                || populated(len, 0.0),
                |(mut cx, mut reporters)| {
                    cx.scroll_by(SECTION_HEIGHT * 0.5);
                    report_all(&mut cx, &mut reporters);
                    black_box(cx.commit());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("sticky/resolve");

    // Resolve every header while one section header is mid hand-off.
    for len in [8usize, 64, 512] {
        let scroll = SECTION_HEIGHT * (len / 2) as f64 - HEADER_HEIGHT * 0.5;
        let (cx, reporters) = populated(len, scroll);
        let ids: Vec<_> = reporters.iter().map(FrameReporter::id).collect();
        group.throughput(Throughput::Elements(len as u64));

        for policy in [HandoffPolicy::FirstEncountered, HandoffPolicy::Nearest] {
            let options = StickyOptions::default().with_handoff(policy);
            group.bench_with_input(
                BenchmarkId::new(format!("{policy:?}"), len),
                &ids,
                |b, ids| {
                    b.iter(|| {
                        for &id in ids {
                            black_box(resolve(id, RegistryRef::Provided(cx.registry()), &options));
                        }
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_scroll_pass, bench_resolve);
criterion_main!(benches);
