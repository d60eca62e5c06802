use chrono::NaiveDate;
use std::collections::HashSet;
use vprice::{monthly_history, predict_next_day, Dataset, Error, MonthlyAverage};

fn fixture(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_load_prices() {
    let dataset = Dataset::load(fixture("prices.csv")).expect("Failed to load test data");

    assert_eq!(dataset.len(), 11);
    assert_eq!(
        dataset.commodities(),
        ["Tomato", "Potato Red", "Cabbage", "Onion Dry (Indian)"]
    );

    // every commodity is listed exactly once
    let rows: HashSet<&str> = dataset.records().iter().map(|r| r.commodity.as_str()).collect();
    let listed: HashSet<&str> = dataset.commodities().iter().map(String::as_str).collect();
    assert_eq!(rows, listed);
    assert_eq!(listed.len(), dataset.commodities().len());

    // columns outside the model ride along untouched
    let onion = dataset.filter("Onion Dry (Indian)").next().unwrap();
    assert_eq!(onion.average, 45.5);
    assert!(onion
        .extra
        .contains(&("Maximum".to_string(), "47".to_string())));
}

#[test]
fn test_predict_from_file() {
    let dataset = Dataset::load(fixture("prices.csv")).expect("Failed to load test data");

    assert_eq!(predict_next_day(&dataset, "Potato Red").unwrap(), 28.0);
    assert_eq!(predict_next_day(&dataset, "Tomato").unwrap(), 30.93);
    assert_eq!(predict_next_day(&dataset, "Onion Dry (Indian)").unwrap(), 45.5);

    for commodity in dataset.commodities() {
        let price = predict_next_day(&dataset, commodity).unwrap();
        assert!(price.is_finite());
        assert_eq!((price * 100.0).round() / 100.0, price);
    }

    assert!(matches!(
        predict_next_day(&dataset, "Pumpkin"),
        Err(Error::CommodityNotFound(_))
    ));
}

#[test]
fn test_history_from_file() {
    let dataset = Dataset::load(fixture("prices.csv")).expect("Failed to load test data");

    assert_eq!(
        monthly_history(&dataset, "Cabbage"),
        [
            MonthlyAverage {
                date: ymd(2024, 1, 1),
                average: 55.0
            },
            MonthlyAverage {
                date: ymd(2024, 2, 1),
                average: 40.0
            },
        ]
    );
    assert_eq!(monthly_history(&dataset, "Potato Red").len(), 1);
    assert!(monthly_history(&dataset, "Pumpkin").is_empty());
}

#[test]
fn test_missing_file() {
    let err = Dataset::load(fixture("does_not_exist.csv")).unwrap_err();
    assert!(matches!(err, Error::Csv { .. }));
    assert!(err.to_string().contains("does_not_exist.csv"));
}

#[test]
fn test_bad_date() {
    let err = Dataset::load(fixture("bad_date.csv")).unwrap_err();
    match err {
        Error::InvalidDate { row, value, .. } => {
            assert_eq!(row, 2);
            assert_eq!(value, "15th of January");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_column() {
    let err = Dataset::load(fixture("no_commodity.csv")).unwrap_err();
    assert!(matches!(
        err,
        Error::MissingColumn {
            column: "Commodity",
            ..
        }
    ));
}
