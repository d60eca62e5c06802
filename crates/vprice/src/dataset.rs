use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{debug, info};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

///////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Vegetable prices, one row per commodity per day
//
///////////////////////////////////////////////////////////////////////////////////////////////////////

const COMMODITY: &str = "Commodity";
const DATE: &str = "Date";
const AVERAGE: &str = "Average";

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// A single row of the price file.
///
/// Columns other than `Commodity`, `Date` and `Average` are kept verbatim in `extra`,
/// as `(header, value)` pairs in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub commodity: String,
    pub date: NaiveDate,
    pub average: f64,
    pub extra: Vec<(String, String)>,
}

impl PriceRecord {
    pub fn new(commodity: impl Into<String>, date: NaiveDate, average: f64) -> Self {
        Self {
            commodity: commodity.into(),
            date,
            average,
            extra: Vec::new(),
        }
    }
}

/// Read-only, in-memory price table.
#[derive(Debug, Default)]
pub struct Dataset {
    records: Vec<PriceRecord>,
    commodities: Vec<String>,
    rows: HashMap<String, Vec<usize>>,
}

impl Dataset {
    /// Load a price CSV file. The header row must contain `Commodity`, `Date` & `Average`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let time = std::time::Instant::now();

        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|source| Error::Csv {
                path: path.to_path_buf(),
                source,
            })?;
        let dataset = Self::read(reader, path)?;

        info!(
            "Loaded {} price rows for {} commodities from {}. Elapsed time: {} ms",
            dataset.len(),
            dataset.commodities.len(),
            path.display(),
            time.elapsed().as_millis()
        );
        Ok(dataset)
    }

    /// Parse price rows from any reader; `source` only labels error messages.
    pub fn from_reader<R: io::Read>(rdr: R, source: impl Into<PathBuf>) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(rdr);
        Self::read(reader, &source.into())
    }

    pub fn from_records(records: Vec<PriceRecord>) -> Self {
        let mut commodities = Vec::new();
        let mut rows: HashMap<String, Vec<usize>> = HashMap::new();

        for (i, record) in records.iter().enumerate() {
            match rows.get_mut(&record.commodity) {
                Some(positions) => positions.push(i),
                None => {
                    commodities.push(record.commodity.clone());
                    rows.insert(record.commodity.clone(), vec![i]);
                }
            }
        }

        Self {
            records,
            commodities,
            rows,
        }
    }

    fn read<R: io::Read>(mut reader: csv::Reader<R>, path: &Path) -> Result<Self> {
        let csv_err = |source: csv::Error| Error::Csv {
            path: path.to_path_buf(),
            source,
        };

        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let column = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| Error::MissingColumn {
                    path: path.to_path_buf(),
                    column: name,
                })
        };
        let commodity_col = column(COMMODITY)?;
        let date_col = column(DATE)?;
        let average_col = column(AVERAGE)?;
        debug!("{}: columns {headers:?}", path.display());

        let mut records = Vec::new();
        for (i, row) in reader.records().enumerate() {
            let row = row.map_err(csv_err)?;
            let line = i + 1;
            let field = |col: usize| row.get(col).unwrap_or_default();

            let date = parse_date(field(date_col)).ok_or_else(|| Error::InvalidDate {
                path: path.to_path_buf(),
                row: line,
                value: field(date_col).to_string(),
            })?;

            let average = field(average_col)
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| Error::InvalidAverage {
                    path: path.to_path_buf(),
                    row: line,
                    value: field(average_col).to_string(),
                })?;

            let extra = headers
                .iter()
                .enumerate()
                .filter(|(col, _)| ![commodity_col, date_col, average_col].contains(col))
                .map(|(col, header)| (header.clone(), field(col).to_string()))
                .collect();

            records.push(PriceRecord {
                commodity: field(commodity_col).to_string(),
                date,
                average,
                extra,
            });
        }

        Ok(Self::from_records(records))
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct commodity names, in the order they first appear in the file.
    pub fn commodities(&self) -> &[String] {
        &self.commodities
    }

    /// Rows for one commodity (exact match), in file order.
    pub fn filter<'a>(&'a self, commodity: &str) -> impl Iterator<Item = &'a PriceRecord> + 'a {
        self.rows
            .get(commodity)
            .into_iter()
            .flatten()
            .map(move |&i| &self.records[i])
    }
}

// -------------------------------------------------------------------------------------------------

/// Parse the date forms commonly found in exported price sheets; any time of day is dropped.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_supported_date_forms() {
        assert_eq!(parse_date("2024-01-15"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("2024/01/15"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("01/15/2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("2024-01-15 13:45:00"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("2024-01-15T13:45:00"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("2024-01-15T23:00:00+05:45"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date(" 2024-01-15 "), Some(ymd(2024, 1, 15)));
    }

    #[test]
    fn rejects_garbage_dates() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-13-01"), None);
    }

    #[test]
    fn commodities_keep_first_seen_order() {
        let dataset = Dataset::from_records(vec![
            PriceRecord::new("Tomato", ymd(2024, 1, 1), 10.0),
            PriceRecord::new("Potato", ymd(2024, 1, 1), 20.0),
            PriceRecord::new("Tomato", ymd(2024, 1, 2), 11.0),
            PriceRecord::new("Onion", ymd(2024, 1, 1), 30.0),
            PriceRecord::new("Potato", ymd(2024, 1, 2), 21.0),
        ]);

        assert_eq!(dataset.commodities(), ["Tomato", "Potato", "Onion"]);
        assert_eq!(dataset.len(), 5);

        let tomato: Vec<f64> = dataset.filter("Tomato").map(|r| r.average).collect();
        assert_eq!(tomato, [10.0, 11.0]);
        assert_eq!(dataset.filter("tomato").count(), 0);
    }

    #[test]
    fn reads_extra_columns_and_bom() {
        let csv = "\u{feff}SN,Commodity,Date,Unit,Average\n0, Tomato ,2024-01-01,Kg,10.5\n";
        let dataset = Dataset::from_reader(csv.as_bytes(), "inline.csv").unwrap();

        let record = &dataset.records()[0];
        assert_eq!(record.commodity, "Tomato");
        assert_eq!(record.average, 10.5);
        assert_eq!(
            record.extra,
            [
                ("SN".to_string(), "0".to_string()),
                ("Unit".to_string(), "Kg".to_string())
            ]
        );
    }

    #[test]
    fn missing_average_column_is_an_error() {
        let csv = "Commodity,Date\nTomato,2024-01-01\n";
        let err = Dataset::from_reader(csv.as_bytes(), "inline.csv").unwrap_err();
        assert!(matches!(err, Error::MissingColumn { column: "Average", .. }));
    }

    #[test]
    fn non_numeric_average_is_an_error() {
        let csv = "Commodity,Date,Average\nTomato,2024-01-01,10\nTomato,2024-01-02,\n";
        let err = Dataset::from_reader(csv.as_bytes(), "inline.csv").unwrap_err();
        assert!(matches!(err, Error::InvalidAverage { row: 2, .. }));
    }
}
