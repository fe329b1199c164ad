use brentrs::io::{read_price_rows, LoadOptions};
use brentrs::temporal::index;
use brentrs::{AnalysisOptions, AnalysisReport, DecompositionModel, NA};
use chrono::NaiveDate;

// CSV with rows in reverse chronological order, so the pipeline has to
// index before analyzing
fn synthetic_csv(n: usize) -> String {
    let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
    let mut rows: Vec<String> = (0..n)
        .map(|i| {
            let date = start + chrono::Days::new(i as u64);
            let cycle = (2.0 * std::f64::consts::PI * i as f64 / 12.0).sin();
            let price = 45.0 + 8.0 * cycle + 0.05 * i as f64;
            format!("{},{}", date.format("%Y-%m-%d"), price)
        })
        .collect();
    rows.reverse();
    format!("Date,Price\n{}\n", rows.join("\n"))
}

fn options() -> AnalysisOptions {
    AnalysisOptions {
        window: 12,
        period: 12,
        model: DecompositionModel::Multiplicative,
        max_lag: 24,
        bins: 10,
    }
}

#[test]
fn test_load_index_analyze() {
    let csv = synthetic_csv(72);
    let (raw, diagnostics) = read_price_rows(csv.as_bytes(), &LoadOptions::default()).unwrap();
    assert_eq!(diagnostics.duplicate_dates, 0);
    assert!(!raw.is_date_indexed());

    let series = index(&raw).unwrap();
    assert!(series.is_date_indexed());

    let report = AnalysisReport::compute(&series, &options()).unwrap();

    assert_eq!(report.summary.count, 72);
    assert_eq!(report.rolling.window, 12);
    assert_eq!(report.decomposition.period, 12);

    // The 12-step cycle planted in the data shows up at its period
    let at_period = report.autocorrelation.points[12].acf;
    assert!(at_period > 0.3, "acf at period = {}", at_period);

    // Multiplicative indices average to one
    let mean = report.decomposition.seasonal_indices().iter().sum::<f64>() / 12.0;
    assert!((mean - 1.0).abs() < 1e-9);

    // Price correlates with its own rolling mean on a drifting series
    match report.correlation.get("Price", "rolling_mean").unwrap() {
        NA::Value(r) => assert!(r > 0.0 && r <= 1.0, "correlation = {}", r),
        NA::NA => panic!("expected a defined correlation"),
    }

    // 72 days starting 2019-01-01 stay inside one calendar year
    assert_eq!(report.monthly.years(), &[2019]);
    assert!(report.monthly.get(2019, 1).unwrap().is_value());
    assert!(report.monthly.get(2019, 12).unwrap().is_na());
}

#[test]
fn test_parallel_pipeline_agrees_with_sequential() {
    let csv = synthetic_csv(72);
    let (raw, _) = read_price_rows(csv.as_bytes(), &LoadOptions::default()).unwrap();
    let series = index(&raw).unwrap();

    let sequential = AnalysisReport::compute(&series, &options()).unwrap();
    let parallel = AnalysisReport::compute_parallel(&series, &options()).unwrap();
    assert_eq!(sequential.to_json().unwrap(), parallel.to_json().unwrap());
}

#[test]
fn test_report_is_directly_servable_json() {
    let csv = synthetic_csv(72);
    let (raw, _) = read_price_rows(csv.as_bytes(), &LoadOptions::default()).unwrap();
    let series = index(&raw).unwrap();

    let json = AnalysisReport::compute(&series, &options())
        .unwrap()
        .to_json()
        .unwrap();

    for key in [
        "\"summary\"",
        "\"rolling\"",
        "\"decomposition\"",
        "\"autocorrelation\"",
        "\"correlation\"",
        "\"histogram\"",
        "\"monthly\"",
    ] {
        assert!(json.contains(key), "missing {} in report JSON", key);
    }
    // Undefined warmup and boundary positions serialize as null
    assert!(json.contains("null"));
}

#[test]
fn test_records_view_for_serving_layers() {
    let csv = synthetic_csv(10);
    let (raw, _) = read_price_rows(csv.as_bytes(), &LoadOptions::default()).unwrap();
    let series = index(&raw).unwrap();

    let records = series.to_records();
    assert_eq!(records.len(), 10);

    let json = serde_json::to_string(&records).unwrap();
    assert!(json.starts_with("[{\"date\":\"2019-01-01\",\"price\":45.0"));

    let head = series.head(3);
    assert_eq!(head.len(), 3);
    assert_eq!(head.get(0), series.get(0));
    assert_eq!(head.layout(), series.layout());
}
