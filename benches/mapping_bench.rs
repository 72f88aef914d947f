use analytics_reports::gateway::{AnalyticsGateway, GatewayError};
use analytics_reports::query::breakdowns::BrowserRecord;
use analytics_reports::query::rows::RawRow;
use analytics_reports::query::spec::QuerySpec;
use analytics_reports::query::summarize::summarize_top_browsers;
use analytics_reports::query::{Period, ReportEngine};
use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::sync::Arc;

/// Returns the same pre-built rows for every report so only mapping is timed.
struct InMemoryGateway {
    rows: Vec<RawRow>,
}

impl AnalyticsGateway for InMemoryGateway {
    fn execute(
        &self,
        _view_id: &str,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
        _query: &QuerySpec,
    ) -> Result<Vec<RawRow>, GatewayError> {
        Ok(self.rows.clone())
    }

    fn execute_realtime(
        &self,
        _view_id: &str,
        _query: &QuerySpec,
    ) -> Result<Option<RawRow>, GatewayError> {
        Ok(self.rows.first().cloned())
    }
}

fn page_rows(n: usize) -> Vec<RawRow> {
    (0..n)
        .map(|i| {
            [
                format!("202401{:02}", i % 28 + 1),
                format!("Page {}", i % 50),
                (i % 1000).to_string(),
                (i % 5000).to_string(),
            ]
            .into_iter()
            .collect()
        })
        .collect()
}

fn period() -> Period {
    Period::create(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
    )
    .unwrap()
}

/// Row mapping for the date × page report, gateway cost excluded beyond a clone.
fn bench_page_metric_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_metric_mapping");

    for size in [100, 1_000, 10_000] {
        let gateway = InMemoryGateway {
            rows: page_rows(size),
        };
        let engine = ReportEngine::new(Arc::new(gateway), "bench").unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                engine
                    .visitors_and_page_views_by_date_and_page(period())
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize_top_browsers");

    for size in [10usize, 100, 1_000] {
        let ranked: Vec<BrowserRecord> = (0..size)
            .rev()
            .map(|i| BrowserRecord {
                browser: format!("browser-{i}"),
                sessions: i as u64,
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter_batched(
                || ranked.clone(),
                |ranked| summarize_top_browsers(ranked, 10),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_page_metric_mapping, bench_summarize);
criterion_main!(benches);
