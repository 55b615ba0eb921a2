//! 规则编译与谓词求值性能基准测试

use chrono::{Duration, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use segment_rules::{
    AudienceProfile, ComparisonOp, Condition, RuleCompiler, SegmentRules,
};
use std::hint::black_box;

fn typical_rules() -> SegmentRules {
    SegmentRules::all(vec![
        Condition::total_spend(ComparisonOp::Gt, 100.0),
        Condition::total_visits(ComparisonOp::Gte, 3),
        Condition::inactive_days(ComparisonOp::Gte, 30),
    ])
}

fn bench_compile(c: &mut Criterion) {
    let compiler = RuleCompiler::new();
    let rules = typical_rules();
    let now = Utc::now();

    c.bench_function("compile_three_conditions", |b| {
        b.iter(|| compiler.compile_at(black_box(&rules), black_box(now)))
    });
}

fn bench_predicate_match(c: &mut Criterion) {
    let compiler = RuleCompiler::new();
    let now = Utc::now();
    let predicate = compiler
        .compile_at(&typical_rules(), now)
        .expect("基准规则应当合法");

    let profile = AudienceProfile {
        total_spend: 250.0,
        total_visits: 5,
        last_visit: Some(now - Duration::days(45)),
    };

    c.bench_function("predicate_match", |b| {
        b.iter(|| black_box(&predicate).matches(black_box(&profile)))
    });
}

criterion_group!(benches, bench_compile, bench_predicate_match);
criterion_main!(benches);
