//! Performance benchmarks for the leave ledger.
//!
//! Balances are replayed from the full record history on every query, so
//! these benchmarks track how replay cost grows with history size:
//! - Balance replay over 10 to 10,000 records
//! - Admin summary over 100 members
//! - Balance endpoint round trip through the router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use leave_ledger::api::{AppState, create_router};
use leave_ledger::ledger::{balance_for, summarize};
use leave_ledger::models::{
    Amount, Bucket, Category, LedgerSnapshot, Record, RecordStatus, Role, User,
};
use leave_ledger::service::LedgerService;
use leave_ledger::store::{FixedSecretAuthorizer, InMemoryStore};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn create_user(index: usize) -> User {
    User {
        id: format!("u_{:04}", index),
        name: format!("Member {}", index),
        role: Role::Member,
        hire_date: NaiveDate::from_ymd_opt(2010 + (index % 14) as i32, 1 + (index % 12) as u32, 15),
        comp_baseline: Decimal::from(4),
        salary: Some(Decimal::from(30000)),
    }
}

/// Creates `count` records for a user, spread over the three years before today.
fn create_history(user: &User, count: usize) -> Vec<Record> {
    let kinds = [
        (Category::Leave, Bucket::Annual),
        (Category::Overtime, Bucket::Comp),
        (Category::Leave, Bucket::Comp),
        (Category::Adjustment, Bucket::Annual),
        (Category::Roster, Bucket::Duty),
    ];

    (0..count)
        .map(|i| {
            let (category, bucket) = kinds[i % kinds.len()];
            Record {
                id: format!("{}_r{:05}", user.id, i),
                user_id: user.id.clone(),
                user_name: user.name.clone(),
                category,
                bucket,
                amount: Amount::Hours(Decimal::from(1 + (i % 8) as i64)),
                date: today() - Duration::days((i % 1095) as i64),
                start_time: None,
                end_time: None,
                reason: String::new(),
                status: if i % 7 == 0 {
                    RecordStatus::Pending
                } else {
                    RecordStatus::Approved
                },
                submitted_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
                carry_over_until: None,
            }
        })
        .collect()
}

/// Benchmark: Balance replay as history grows.
fn bench_balance_replay(c: &mut Criterion) {
    let user = create_user(1);
    let mut group = c.benchmark_group("balance_replay");

    for record_count in [10, 100, 1_000, 10_000].iter() {
        let records = create_history(&user, *record_count);

        group.throughput(Throughput::Elements(*record_count as u64));
        group.bench_with_input(
            BenchmarkId::new("records", record_count),
            &records,
            |b, records| b.iter(|| black_box(balance_for(&user, records, today()))),
        );
    }

    group.finish();
}

/// Benchmark: Admin summary across 100 members with 50 records each.
fn bench_summary_100_members(c: &mut Criterion) {
    let users: Vec<User> = (0..100).map(create_user).collect();
    let records: Vec<Record> = users.iter().flat_map(|u| create_history(u, 50)).collect();
    let snapshot = LedgerSnapshot { users, records };

    c.bench_function("summary_100_members", |b| {
        b.iter(|| black_box(summarize(&snapshot, today())))
    });
}

/// Benchmark: GET /users/:id/balance through the router.
fn bench_balance_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let user = create_user(1);
    let snapshot = LedgerSnapshot {
        records: create_history(&user, 500),
        users: vec![user],
    };
    let router = create_router(AppState::new(LedgerService::new(
        Arc::new(InMemoryStore::seeded(snapshot)),
        Arc::new(FixedSecretAuthorizer::new("bench")),
    )));

    c.bench_function("balance_endpoint_500_records", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .uri("/users/u_0001/balance?as_of=2024-06-01")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_balance_replay,
    bench_summary_100_members,
    bench_balance_endpoint,
);
criterion_main!(benches);
