use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sweat_debt::{
    accounting::{debt_curve, project_month},
    compute_month_summary,
    domain::{Event, Settings},
};

fn build_sample_log(event_count: usize) -> Vec<Event> {
    let start_date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    (0..event_count)
        .map(|idx| {
            let date = start_date + Duration::days((idx % 900) as i64);
            if idx % 3 == 0 {
                Event::session(45 + (idx % 60) as u32, date, "Gym", 60)
            } else {
                Event::expense(4.5 + (idx % 25) as f64, date, "Fast food")
            }
        })
        .collect()
}

fn bench_month_summary(c: &mut Criterion) {
    let events = build_sample_log(black_box(10_000));
    let settings = Settings::default();
    let month = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    c.bench_function("month_summary_10k", |b| {
        b.iter(|| black_box(compute_month_summary(&events, month, &settings)))
    });

    let summary = compute_month_summary(&events, month, &settings);
    c.bench_function("calendar_projection", |b| {
        b.iter(|| {
            black_box(project_month(
                month,
                &settings.schedule,
                &summary.sessions_by_date,
                month,
            ))
        })
    });

    c.bench_function("debt_curve_10k", |b| {
        b.iter(|| black_box(debt_curve(&events, month, &settings, month)))
    });
}

criterion_group!(benches, bench_month_summary);
criterion_main!(benches);
