//! Performance benchmarks for the Practice Engine.
//!
//! This benchmark suite covers:
//! - Slot computation for one day with 5, 15 and 60 minute slots
//! - Slot computation against a long booking list
//! - Invoice field validation
//! - The `/availability` endpoint end to end
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{NaiveDate, NaiveDateTime};
use practice_engine::api::{AppState, create_router};
use practice_engine::config::ConfigLoader;
use practice_engine::invoicing::validate_invoice_fields;
use practice_engine::models::{
    BookingRecord, BookingStatus, DaySchedule, WallTime, WeeklySchedule,
};
use practice_engine::scheduling::compute_available_slots;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 12).unwrap()
}

fn before_monday() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

/// A long Monday with a lunch break.
fn schedule_with_duration(slot_duration_minutes: u32) -> WeeklySchedule {
    let mut schedule = WeeklySchedule {
        slot_duration_minutes,
        ..WeeklySchedule::default()
    };
    schedule.monday = DaySchedule::open(
        WallTime::from_hm(7, 0).unwrap(),
        WallTime::from_hm(21, 0).unwrap(),
    )
    .with_break(
        WallTime::from_hm(12, 0).unwrap(),
        WallTime::from_hm(13, 0).unwrap(),
    );
    schedule
}

/// Bookings every 30 minutes across a week, a tenth of them cancelled.
fn week_of_bookings() -> Vec<BookingRecord> {
    (0..7)
        .flat_map(|offset| {
            let date = monday() + chrono::Duration::days(offset);
            (14..42).map(move |half_hour| BookingRecord {
                date,
                time: WallTime::from_minutes(half_hour * 30).unwrap(),
                status: if half_hour % 10 == 0 {
                    BookingStatus::Cancelled
                } else {
                    BookingStatus::Confirmed
                },
            })
        })
        .collect()
}

/// Benchmark: one day of slots at several slot lengths.
fn bench_compute_slots(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_available_slots");

    for duration in [5u32, 15, 60] {
        let schedule = schedule_with_duration(duration);
        group.bench_with_input(
            BenchmarkId::from_parameter(duration),
            &schedule,
            |b, schedule| {
                b.iter(|| {
                    black_box(compute_available_slots(
                        black_box(schedule),
                        monday(),
                        &[],
                        before_monday(),
                    ))
                })
            },
        );
    }

    group.finish();
}

/// Benchmark: one day of slots against a week of bookings.
fn bench_compute_slots_with_bookings(c: &mut Criterion) {
    let schedule = schedule_with_duration(30);
    let bookings = week_of_bookings();

    let mut group = c.benchmark_group("bookings");
    group.throughput(Throughput::Elements(bookings.len() as u64));
    group.bench_function("week_of_bookings", |b| {
        b.iter(|| {
            black_box(compute_available_slots(
                &schedule,
                monday(),
                black_box(&bookings),
                before_monday(),
            ))
        })
    });
    group.finish();
}

/// Benchmark: validating a complete set of invoice fields.
fn bench_validate_invoice_fields(c: &mut Criterion) {
    let config = ConfigLoader::builtin().expect("Failed to load config");
    let table = config.countries();

    c.bench_function("validate_invoice_fields", |b| {
        b.iter(|| {
            black_box(validate_invoice_fields(
                table,
                black_box("DE"),
                Some("12345678901"),
                Some("DE123456789"),
                Some("DE89 3704 0044 0532 0130 00"),
                Some("COBADEFFXXX"),
            ))
        })
    });
}

/// Benchmark: the stateless availability endpoint.
fn bench_availability_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::builtin().expect("Failed to load config");
    let router = create_router(AppState::new(config));
    let body = serde_json::json!({
        "date": "2026-01-12",
        "now": "2026-01-01T08:00:00",
        "bookings": [
            {"date": "2026-01-12", "time": "10:00 AM", "status": "confirmed"},
            {"date": "2026-01-12", "time": "14:00", "status": "pending"}
        ]
    })
    .to_string();

    c.bench_function("availability_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/availability")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
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
    bench_compute_slots,
    bench_compute_slots_with_bookings,
    bench_validate_invoice_fields,
    bench_availability_endpoint,
);
criterion_main!(benches);
