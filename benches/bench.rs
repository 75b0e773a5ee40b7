//! Criterion benchmarks for the assent classifier.
//!
//! Covers the two hot paths: full pipeline classification across the stage
//! spectrum, and the fuzzy similarity ratio that dominates the worst case.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use assent::fuzzy::similarity;
use assent::pipeline::ClassificationPipeline;

/// Utterances chosen so each deciding stage is represented.
fn sample_utterances() -> Vec<&'static str> {
    vec![
        "好的，开始吧",            // exact match
        "帮我启动烹饪",            // substring containment
        "我觉得可以这样：启动吧",  // lead-in + exact
        "不想",                    // context rule
        "随便啦",                  // statistical fallback
        "YES, go ahead",           // latin exact
    ]
}

fn bench_classification(c: &mut Criterion) {
    let pipeline = ClassificationPipeline::with_defaults().unwrap();
    let utterances = sample_utterances();

    let mut group = c.benchmark_group("classification");
    group.throughput(Throughput::Elements(utterances.len() as u64));
    group.bench_function("classify_mixed_stages", |b| {
        b.iter(|| {
            for utterance in &utterances {
                black_box(pipeline.classify(black_box(utterance)).unwrap());
            }
        })
    });
    group.finish();
}

fn bench_fuzzy_similarity(c: &mut Criterion) {
    let pairs = [
        ("不想", "我不想"),
        ("启动吧", "启动"),
        ("准备好了", "准备好了吗"),
        ("confirm", "confirmation"),
    ];

    c.bench_function("fuzzy_similarity", |b| {
        b.iter(|| {
            for (a, w) in &pairs {
                black_box(similarity(black_box(a), black_box(w)));
            }
        })
    });
}

criterion_group!(benches, bench_classification, bench_fuzzy_similarity);
criterion_main!(benches);
