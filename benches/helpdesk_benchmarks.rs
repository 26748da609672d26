//! Analytics and lifecycle benchmarks
//!
//! Run with: `cargo bench --bench helpdesk_benchmarks`

#![allow(clippy::expect_used)]

use chrono::{Duration, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use helpdesk::analytics::analyze;
use helpdesk::core::{Priority, Status, Ticket, TicketBuilder};
use helpdesk::report::render;

const DEVICES: [&str; 6] = [
    "iPhone 12",
    "Samsung Galaxy S21",
    "Dell XPS 13",
    "MacBook Pro",
    "Gaming Desktop",
    "Nintendo Switch",
];

fn snapshot(size: usize) -> Vec<Ticket> {
    let start = Utc
        .with_ymd_and_hms(2025, 1, 1, 8, 0, 0)
        .single()
        .expect("valid start time");
    (0..size)
        .map(|i| {
            TicketBuilder::new()
                .name(format!("Customer {i}"))
                .phone(if i % 3 == 0 { "+1 555 010 0000" } else { "555-010-0000" })
                .email(format!("customer{i}@domain{}.com", i % 7))
                .device_name(DEVICES[i % DEVICES.len()])
                .description("Benchmark ticket")
                .status(Status::ALL[i % Status::ALL.len()])
                .priority(Priority::Medium)
                .created_at(start + Duration::minutes(37 * i as i64))
                .build()
        })
        .collect()
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    for size in [100, 1_000, 10_000] {
        let tickets = snapshot(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &tickets, |b, tickets| {
            b.iter(|| analyze(black_box(tickets)));
        });
    }
    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let analysis = analyze(&snapshot(1_000));
    let now = Utc::now();
    c.bench_function("render_report_1000", |b| {
        b.iter(|| render(black_box(&analysis), now));
    });
}

criterion_group!(benches, bench_analyze, bench_report);
criterion_main!(benches);
