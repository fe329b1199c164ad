use brentrs::time_series::{decompose, DecompositionModel};
use brentrs::{Error, PriceSeries, NA};
use chrono::NaiveDate;

// Five years of monthly observations with a known seasonal pattern
// (factors average exactly 1) over a linear upward trend
const FACTORS: [f64; 12] = [
    1.06, 1.04, 1.00, 0.96, 0.92, 0.95, 0.99, 1.03, 1.05, 1.02, 0.99, 0.99,
];

fn monthly_series(n: usize) -> PriceSeries {
    let (dates, prices) = (0..n)
        .map(|i| {
            let date = NaiveDate::from_ymd_opt(2015 + (i / 12) as i32, (i % 12 + 1) as u32, 1)
                .expect("valid date");
            let price = (20.0 + 0.1 * i as f64) * FACTORS[i % 12];
            (date, price)
        })
        .unzip();
    PriceSeries::new(dates, prices).expect("aligned vectors")
}

#[test]
fn test_multiplicative_recovers_seasonal_factors() {
    let series = monthly_series(60);
    let result = decompose(&series, 12, DecompositionModel::Multiplicative).unwrap();

    assert_eq!(result.period, 12);
    for (phase, (index, factor)) in result
        .seasonal_indices()
        .iter()
        .zip(FACTORS)
        .enumerate()
    {
        assert!(
            (index - factor).abs() < 0.01,
            "phase {}: index {} vs factor {}",
            phase,
            index,
            factor
        );
    }
}

#[test]
fn test_multiplicative_indices_average_to_one() {
    let series = monthly_series(60);
    let result = decompose(&series, 12, DecompositionModel::Multiplicative).unwrap();

    let mean = result.seasonal_indices().iter().sum::<f64>() / 12.0;
    assert!((mean - 1.0).abs() < 1e-9);
}

#[test]
fn test_trend_is_na_within_half_period_of_boundaries() {
    let series = monthly_series(60);
    let result = decompose(&series, 12, DecompositionModel::Multiplicative).unwrap();

    for i in 0..6 {
        assert!(result.trend[i].is_na(), "leading trend[{}]", i);
        assert!(result.residual[i].is_na(), "leading residual[{}]", i);
    }
    for i in 54..60 {
        assert!(result.trend[i].is_na(), "trailing trend[{}]", i);
        assert!(result.residual[i].is_na(), "trailing residual[{}]", i);
    }
    for i in 6..54 {
        assert!(result.trend[i].is_value(), "interior trend[{}]", i);
    }
}

#[test]
fn test_trend_follows_the_underlying_drift() {
    let series = monthly_series(60);
    let result = decompose(&series, 12, DecompositionModel::Multiplicative).unwrap();

    let defined: Vec<f64> = result
        .trend
        .iter()
        .filter_map(|t| t.value().copied())
        .collect();
    assert_eq!(defined.len(), 48);
    assert!(defined.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_multiplicative_recombination() {
    let series = monthly_series(60);
    let result = decompose(&series, 12, DecompositionModel::Multiplicative).unwrap();

    for i in 0..60 {
        let recombined = result.trend[i] * NA::Value(result.seasonal[i]) * result.residual[i];
        match recombined {
            NA::Value(v) => {
                let observed = result.observed[i];
                assert!(
                    ((v - observed) / observed).abs() < 1e-6,
                    "position {}: {} vs {}",
                    i,
                    v,
                    observed
                );
            }
            NA::NA => assert!(result.trend[i].is_na()),
        }
    }
}

#[test]
fn test_additive_recombination_and_zero_mean_offsets() {
    let offsets = [
        3.0, 2.0, 0.0, -2.0, -4.0, -2.5, -0.5, 1.5, 2.5, 1.0, -0.5, -0.5,
    ];
    let (dates, prices) = (0..48)
        .map(|i| {
            let date = NaiveDate::from_ymd_opt(2018 + (i / 12) as i32, (i % 12 + 1) as u32, 1)
                .expect("valid date");
            (date, 30.0 + 0.5 * i as f64 + offsets[i % 12])
        })
        .unzip();
    let series = PriceSeries::new(dates, prices).unwrap();

    let result = decompose(&series, 12, DecompositionModel::Additive).unwrap();

    let mean = result.seasonal_indices().iter().sum::<f64>() / 12.0;
    assert!(mean.abs() < 1e-9);

    for (index, offset) in result.seasonal_indices().iter().zip(offsets) {
        assert!((index - offset).abs() < 0.01);
    }

    for i in 0..48 {
        let recombined = result.trend[i] + NA::Value(result.seasonal[i]) + result.residual[i];
        if let NA::Value(v) = recombined {
            assert!((v - result.observed[i]).abs() < 1e-6);
        }
    }
}

#[test]
fn test_insufficient_history_is_rejected() {
    let series = monthly_series(20);
    match decompose(&series, 12, DecompositionModel::Multiplicative) {
        Err(Error::InsufficientData { required, actual }) => {
            assert_eq!(required, 24);
            assert_eq!(actual, 20);
        }
        other => panic!("expected InsufficientData, got {:?}", other.map(|_| ())),
    }
}
