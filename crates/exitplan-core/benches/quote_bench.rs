//! Benchmarks for the quote engine and a full wizard pass.

use criterion::{Criterion, criterion_group, criterion_main};
use exitplan_core::{Answers, PeriodUnit, Provider, QuoteEngine, WizardController};
use std::hint::black_box;

fn bench_quote(c: &mut Criterion) {
    let answers = Answers {
        provider: Some(Provider::Caps),
        monthly_fee: 30_000,
        remaining_months: 10,
        has_existing_cameras: true,
        outdoor_camera_count: 2,
        indoor_camera_count: 1,
    };

    c.bench_function("quote_engine_quote", |b| {
        b.iter(|| QuoteEngine::quote(black_box(&answers)))
    });
}

fn bench_wizard(c: &mut Criterion) {
    c.bench_function("wizard_full_pass", |b| {
        b.iter(|| {
            let mut wizard = WizardController::new();
            let _ = wizard.select_provider(black_box(Provider::S1));
            let _ = wizard.submit_monthly_fee(black_box(50_000));
            let _ = wizard.submit_period(black_box(2), PeriodUnit::Year);
            let _ = wizard.proceed_to_exemption_check();
            let _ = wizard.select_has_cameras(true);
            let _ = wizard.submit_camera_counts(black_box(3), black_box(2));
            wizard.quote()
        })
    });
}

criterion_group!(benches, bench_quote, bench_wizard);
criterion_main!(benches);
