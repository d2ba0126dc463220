use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{Duration, NaiveDate};
use stocklens_analytics::datetime::parse_period;
use stocklens_analytics::{
    classify, on_shelf_availability, split_into_chunks, AnalyticsConfig, AnalyticsService,
    ItemAnalytics, ItemCode, LedgerRecord, ReportWindow, SalesRecord, StockEvent,
    SHRINKAGE_MARKER,
};

/// `items` codes with `snapshots` daily ledger rows each; every 7th row is shrinkage.
fn generate_dataset(items: usize, snapshots: usize) -> (Vec<LedgerRecord>, Vec<SalesRecord>) {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut ledger = Vec::with_capacity(items * snapshots);
    for item in 0..items {
        for snap in 0..snapshots {
            let day = base + Duration::days((snap % 28) as i64);
            let opening = ((item + snap) % 50) as f64;
            let closing = ((item * 3 + snap) % 50) as f64;
            ledger.push(LedgerRecord {
                code: format!("{item:05}"),
                group: format!("Group {}", item % 12),
                period: format!("{} {:02}:00:00", day.format("%d.%m.%Y"), snap % 24),
                opening,
                closing,
                expense_category: (snap % 7 == 0).then(|| SHRINKAGE_MARKER.to_string()),
            });
        }
    }

    let sales = (0..items)
        .map(|item| SalesRecord {
            code: format!("{item:05}"),
            name: format!("Item {item}"),
            quantity: (item % 20 + 1) as f64,
            amount: ((item * 37) % 10_000) as f64 + 10.0,
        })
        .collect();

    (ledger, sales)
}

fn bench_compute_analytics(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_analytics");
    let (ledger, sales) = generate_dataset(2_000, 50);
    group.throughput(Throughput::Elements(ledger.len() as u64));

    for workers in [1usize, 2, 4, 8].iter() {
        let service = AnalyticsService::new(AnalyticsConfig::default().with_workers(*workers));
        group.bench_with_input(BenchmarkId::new("workers", workers), workers, |b, _| {
            b.iter(|| {
                black_box(
                    service
                        .compute_analytics(&ledger, &sales, "01.01.2024", "31.01.2024")
                        .unwrap(),
                )
            });
        });
    }

    group.finish();
}

fn bench_on_shelf_availability(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let window = ReportWindow::new(start, start + Duration::hours(1_000));
    let events: Vec<StockEvent> = (0..1_000)
        .map(|i| StockEvent {
            at: start + Duration::hours(i),
            opening: (i % 10) as f64,
            closing: ((i + 1) % 10) as f64,
        })
        .collect();

    c.bench_function("on_shelf_availability_1000_hourly", |b| {
        b.iter(|| {
            let mut batch = events.clone();
            black_box(on_shelf_availability(&mut batch, &window))
        });
    });
}

fn bench_abc_classification(c: &mut Criterion) {
    let items: Vec<ItemAnalytics> = (0..10_000)
        .map(|i| ItemAnalytics {
            name: format!("Item {i}"),
            code: ItemCode::parse(&format!("{i}")).unwrap(),
            group: String::new(),
            sales: (10_000 - i) as f64,
            loss: 0.0,
            loss_of_profit: 0.0,
            osa: 0.0,
            abc: None,
        })
        .collect();

    c.bench_function("abc_classification_10000", |b| {
        b.iter(|| {
            let mut batch = items.clone();
            classify(&mut batch);
            black_box(batch)
        });
    });
}

fn bench_parse_period(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_period");
    for input in ["15.01.2024 10:30:45", "15.01.2024 10:30", "15.01.2024"].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(input), input, |b, text| {
            b.iter(|| black_box(parse_period(text)));
        });
    }
    group.finish();
}

fn bench_split_into_chunks(c: &mut Criterion) {
    let (ledger, _) = generate_dataset(1_000, 10);
    c.bench_function("split_into_chunks_10000_by_8", |b| {
        b.iter(|| black_box(split_into_chunks(&ledger, 8).len()));
    });
}

criterion_group!(
    benches,
    bench_compute_analytics,
    bench_on_shelf_availability,
    bench_abc_classification,
    bench_parse_period,
    bench_split_into_chunks
);
criterion_main!(benches);
