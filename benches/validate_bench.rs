use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use fiscale::{BusinessType, Country, Validator};

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn bench_tax_codes(c: &mut Criterion) {
    let cases: &[(Country, &str)] = &[
        (Country::Italy, "RSSMRA85T10A562S"),
        (Country::France, "732829320"),
        (Country::Germany, "86095742719"),
        (Country::Spain, "12345678Z"),
        (Country::Portugal, "123456789"),
        (Country::England, "1234567890"),
        (Country::Generic, "ABC123456"),
    ];

    let mut group = c.benchmark_group("validate_tax_code");
    for (country, code) in cases {
        let v = Validator::new(*country);
        group.bench_function(country.code(), |b| {
            b.iter(|| {
                black_box(v.validate_tax_code_at(
                    black_box(code),
                    None,
                    black_box(reference_date()),
                ))
            });
        });
    }
    group.finish();
}

fn bench_vat_numbers(c: &mut Criterion) {
    let cases: &[(Country, &str)] = &[
        (Country::Italy, "12345678903"),
        (Country::France, "73282932000074"),
        (Country::Germany, "DE111111113"),
        (Country::Spain, "B12345674"),
        (Country::Portugal, "504444670"),
        (Country::England, "12345677501"),
    ];

    let mut group = c.benchmark_group("validate_vat_number");
    for (country, vat) in cases {
        let v = Validator::new(*country);
        group.bench_function(country.code(), |b| {
            b.iter(|| black_box(v.validate_vat_number(black_box(vat))));
        });
    }
    group.finish();
}

fn bench_rejections(c: &mut Criterion) {
    // Failure paths allocate metadata and resolve messages
    let v = Validator::new(Country::Italy);
    c.bench_function("reject_bad_checksum", |b| {
        b.iter(|| black_box(v.validate_vat_number(black_box("12345678904"))));
    });
    c.bench_function("reject_bad_length", |b| {
        b.iter(|| black_box(v.validate_vat_number(black_box("1234"))));
    });
}

fn bench_format_tax_code(c: &mut Criterion) {
    let v = Validator::new(Country::Italy);
    c.bench_function("format_tax_code", |b| {
        b.iter(|| black_box(v.format_tax_code(black_box(" rss mra 85t10 a562s "))));
    });
}

fn bench_required_fields(c: &mut Criterion) {
    let v = Validator::new(Country::Germany);
    c.bench_function("required_fields_corporation", |b| {
        b.iter(|| black_box(v.required_fields(black_box(BusinessType::Corporation))));
    });
}

criterion_group!(
    benches,
    bench_tax_codes,
    bench_vat_numbers,
    bench_rejections,
    bench_format_tax_code,
    bench_required_fields,
);
criterion_main!(benches);
