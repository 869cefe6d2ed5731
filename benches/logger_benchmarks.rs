//! Criterion benchmarks for rust_log_facade

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_log_facade::prelude::*;
use rust_log_facade::{global, Record};
use std::io;

fn discard(formatter: Formatter) -> Logger {
    Logger::builder()
        .output(io::sink())
        .formatter(formatter)
        .build()
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("builder", |b| {
        b.iter(|| black_box(discard(Formatter::Text)));
    });

    group.bench_function("default_lookup", |b| {
        b.iter(|| black_box(global::default()));
    });

    group.finish();
}

// ============================================================================
// Formatter Benchmarks
// ============================================================================

fn bench_formatters(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatters");
    group.throughput(Throughput::Elements(1));

    for (name, formatter) in [
        ("text", Formatter::Text),
        ("json", Formatter::Json),
        ("logfmt", Formatter::Logfmt),
    ] {
        let logger = discard(formatter).with([
            Attr::string("service", "billing"),
            Attr::int("attempt", 3),
        ]);
        group.bench_function(name, |b| {
            b.iter(|| logger.info(black_box("Request served")));
        });
    }

    group.finish();
}

// ============================================================================
// Concurrent Logging Benchmarks
// ============================================================================

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    let logger = discard(Formatter::Text);

    group.bench_function("multi_thread_4", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let logger = logger.clone();
                    std::thread::spawn(move || {
                        logger.info(black_box("Concurrent message"));
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
        });
    });

    group.finish();
}

// ============================================================================
// Filtering Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::builder()
        .output(io::sink())
        .level(Level::Warn)
        .build();

    group.bench_function("below_threshold", |b| {
        b.iter(|| logger.debug(black_box("This should be filtered")));
    });

    group.bench_function("below_threshold_formatted", |b| {
        b.iter(|| logger.debugf(format_args!("filtered {}", black_box(42))));
    });

    group.bench_function("above_threshold", |b| {
        b.iter(|| logger.error(black_box("This should be logged")));
    });

    group.finish();
}

// ============================================================================
// Caller Resolution Benchmarks
// ============================================================================

fn bench_caller(c: &mut Criterion) {
    let mut group = c.benchmark_group("caller");
    group.throughput(Throughput::Elements(1));

    let tracked = Logger::builder()
        .output(io::sink())
        .report_caller(true)
        .build();
    group.bench_function("tracked_location", |b| {
        b.iter(|| tracked.info(black_box("with caller")));
    });

    let offset = Logger::builder()
        .output(io::sink())
        .report_caller(true)
        .caller_offset(1)
        .build();
    group.bench_function("backtrace_offset", |b| {
        b.iter(|| offset.info(black_box("with caller offset")));
    });

    group.finish();
}

fn bench_record_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("with_attrs", |b| {
        b.iter(|| {
            let record = Record::new(Some(Level::Info), black_box("Test message"))
                .with_attrs([Attr::int("id", 7), Attr::bool("ok", true)]);
            black_box(record)
        });
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_logger_creation,
    bench_formatters,
    bench_concurrent_logging,
    bench_level_filtering,
    bench_caller,
    bench_record_creation
);

criterion_main!(benches);
