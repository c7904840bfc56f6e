//! Benchmarks for token issue and verification

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mesto_auth_core::{AuthConfig, AuthGuard, JwtCodec, TokenCodec};
use mesto_types::UserId;
use std::sync::Arc;

fn codec() -> JwtCodec {
    let config = AuthConfig::try_new("bench-secret-bench-secret-bench-secret").unwrap();
    JwtCodec::new(&config).unwrap()
}

fn bench_issue(c: &mut Criterion) {
    let codec = codec();
    let user_id = UserId::new();

    c.bench_function("jwt_issue", |b| {
        b.iter(|| codec.issue(black_box(user_id)));
    });
}

fn bench_verify(c: &mut Criterion) {
    let codec = codec();
    let token = codec.issue(UserId::new()).unwrap().token;
    let header = format!("Bearer {token}");
    let guard = AuthGuard::new(Arc::new(codec.clone()));

    let mut group = c.benchmark_group("jwt_verify");
    group.bench_function("codec", |b| {
        b.iter(|| codec.verify(black_box(&token)));
    });
    group.bench_function("guard_header", |b| {
        b.iter(|| guard.authenticate(black_box(Some(header.as_str()))));
    });
    group.bench_function("reject_garbage", |b| {
        b.iter(|| codec.verify(black_box("not.a.token")));
    });
    group.finish();
}

criterion_group!(benches, bench_issue, bench_verify);
criterion_main!(benches);
