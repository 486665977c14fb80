//! Benchmarks for cardcheck performance testing.
//!
//! Run with: cargo bench

use cardcheck::{
    classify_network, expiry, luhn, mask, validate_cardholder_name, validate_checksum,
    validate_cvv, CardDetails, FixedClock, Validator,
};
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

// Test card numbers
const VISA_16: &str = "4242424242424242";
const VISA_16_FORMATTED: &str = "4242 4242 4242 4242";
const MASTERCARD: &str = "5555555555554444";
const AMEX: &str = "378282246310005";
const UNKNOWN: &str = "6011111111111117";

const VISA_DIGITS: [u8; 16] = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2];

fn fixed_validator() -> Validator<FixedClock> {
    let now = NaiveDate::from_ymd_opt(2021, 6, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid benchmark instant");
    Validator::new().with_clock(FixedClock(now))
}

/// Benchmark network classification
fn bench_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify_network");

    for (label, card) in [
        ("mastercard", MASTERCARD),
        ("visa", VISA_16),
        ("visa_formatted", VISA_16_FORMATTED),
        ("amex", AMEX),
        ("unknown", UNKNOWN),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(label), card, |b, card| {
            b.iter(|| classify_network(black_box(card)))
        });
    }

    group.finish();
}

/// Benchmark Luhn algorithm specifically
fn bench_luhn(c: &mut Criterion) {
    let mut group = c.benchmark_group("luhn");

    group.bench_function("checksum_raw", |b| {
        b.iter(|| validate_checksum(black_box(VISA_16)))
    });

    group.bench_function("checksum_formatted", |b| {
        b.iter(|| validate_checksum(black_box(VISA_16_FORMATTED)))
    });

    group.bench_function("digits_16", |b| {
        b.iter(|| luhn::validate(black_box(&VISA_DIGITS)))
    });

    group.bench_function("check_digit_15", |b| {
        b.iter(|| luhn::generate_check_digit(black_box(&VISA_DIGITS[..15])))
    });

    group.finish();
}

/// Benchmark the single-field checks
fn bench_field_checks(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_checks");
    let now = NaiveDate::from_ymd_opt(2021, 6, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid benchmark instant");

    group.bench_function("cvv_amex", |b| {
        b.iter(|| validate_cvv(black_box(AMEX), black_box("1234")))
    });

    group.bench_function("expiry", |b| {
        b.iter(|| expiry::validate_expiry_at(black_box("11/2022"), now))
    });

    group.bench_function("name", |b| {
        b.iter(|| validate_cardholder_name(black_box("Robin Demeulenaere")))
    });

    group.bench_function("mask", |b| b.iter(|| mask::mask_number(black_box(VISA_16))));

    group.finish();
}

/// Benchmark full validation, accepted and rejected at each stage
fn bench_full_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validator");
    let validator = fixed_validator();

    let cases = [
        ("accepted_visa", CardDetails::new("Robin Demeulenaere", VISA_16, "11/2022", "123")),
        ("accepted_amex", CardDetails::new("Robin Demeulenaere", AMEX, "11/2022", "1234")),
        ("rejected_name", CardDetails::new("R@b1n", VISA_16, "11/2022", "123")),
        ("rejected_network", CardDetails::new("Robin", UNKNOWN, "11/2022", "123")),
        ("rejected_expiry", CardDetails::new("Robin", VISA_16, "11/2019", "123")),
    ];

    for (label, details) in &cases {
        group.bench_with_input(BenchmarkId::from_parameter(label), details, |b, details| {
            b.iter(|| validator.validate(black_box(details)))
        });
    }

    group.finish();
}

/// Benchmark validating many cards in sequence
fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");
    let validator = fixed_validator();

    for size in [100usize, 1_000, 10_000] {
        let cards: Vec<CardDetails> = [VISA_16, MASTERCARD, AMEX, UNKNOWN]
            .iter()
            .cycle()
            .take(size)
            .map(|card| CardDetails::new("Robin Demeulenaere", *card, "11/2022", "123"))
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &cards, |b, cards| {
            b.iter(|| {
                cards
                    .iter()
                    .filter(|details| validator.validate(details).is_ok())
                    .count()
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_classification,
    bench_luhn,
    bench_field_checks,
    bench_full_validation,
    bench_throughput,
);

criterion_main!(benches);
