use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;

use super::model::{Dataset, ProductType, Quarter, Record};
use crate::error::DataError;

/// Published statewide stumpage price table.
const DATA_URL: &str = "https://raw.githubusercontent.com/azd169/timber_prices/main/ms_stumpage.csv";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Columns the source file must carry, in no particular order.
const REQUIRED_COLUMNS: [&str; 7] = [
    "Type", "Time", "Year", "Quarter", "Minimum", "Average", "Maximum",
];

// ---------------------------------------------------------------------------
// Remote fetch
// ---------------------------------------------------------------------------

/// Download and parse the stumpage table.
///
/// Sends `Authorization: token …` when `GITHUB_TOKEN` is set (needed only if
/// the source repository is private). Non-success status and timeouts map to
/// [`DataError::Unavailable`].
pub fn fetch_dataset() -> Result<Dataset, DataError> {
    let client = Client::builder().timeout(FETCH_TIMEOUT).build()?;

    let mut request = client.get(DATA_URL);
    if let Ok(token) = std::env::var("GITHUB_TOKEN") {
        request = request.header(AUTHORIZATION, format!("token {token}"));
    }

    let text = request.send()?.error_for_status()?.text()?;
    parse_dataset(&text)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse CSV text into a [`Dataset`].
///
/// `Year` is coerced to an integer, becoming missing on parse failure. Rows
/// whose `Type` or `Quarter` is not one of the known categories are skipped
/// with a warning; they could never match a filter anyway.
pub fn parse_dataset(text: &str) -> Result<Dataset, DataError> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !headers.iter().any(|h| h == c))
        .collect();
    if !missing.is_empty() {
        return Err(DataError::SchemaMismatch(missing.join(", ")));
    }

    let col = |name: &str| headers.iter().position(|h| h == name).unwrap_or(0);
    let (type_col, time_col, year_col, quarter_col) =
        (col("Type"), col("Time"), col("Year"), col("Quarter"));
    let (min_col, avg_col, max_col) = (col("Minimum"), col("Average"), col("Maximum"));

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        let field = |idx: usize| row.get(idx).unwrap_or("").trim();

        let Some(product) = ProductType::from_label(field(type_col)) else {
            log::warn!("row {row_no}: unknown product type {:?}, skipping", field(type_col));
            continue;
        };
        let Some(quarter) = Quarter::from_label(field(quarter_col)) else {
            log::warn!("row {row_no}: unknown quarter {:?}, skipping", field(quarter_col));
            continue;
        };

        records.push(Record {
            product,
            time: field(time_col).to_string(),
            year: field(year_col).parse::<i32>().ok(),
            quarter,
            minimum: field(min_col).parse::<f64>().ok(),
            average: field(avg_col).parse::<f64>().ok(),
            maximum: field(max_col).parse::<f64>().ok(),
        });
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Session cache – load once, refetch only on explicit reload
// ---------------------------------------------------------------------------

/// Guarded load-once holder for the session's dataset.
///
/// The first `get_or_load` performs the fetch; later calls return the cached
/// table. `invalidate` clears the memo so the next access refetches.
#[derive(Default)]
pub struct DatasetCache {
    inner: Mutex<Option<Arc<Dataset>>>,
}

impl DatasetCache {
    pub fn get_or_load(
        &self,
        load: impl FnOnce() -> Result<Dataset, DataError>,
    ) -> Result<Arc<Dataset>, DataError> {
        let mut slot = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(ds) = slot.as_ref() {
            return Ok(Arc::clone(ds));
        }
        let ds = Arc::new(load()?);
        *slot = Some(Arc::clone(&ds));
        Ok(ds)
    }

    pub fn invalidate(&self) {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Type,Time,Year,Quarter,Minimum,Average,Maximum
Pine Sawtimber,2021-Q1,2021,Q1,20.00,25.50,31.00
Hardwood Pulpwood,2021-Q1,2021,Q1,4.25,6.00,8.10
Pine Pulpwood,2021-Q2,2021,Q2,5.00,7.75,9.50
";

    #[test]
    fn parses_well_formed_rows() {
        let ds = parse_dataset(SAMPLE).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.year_span, Some((2021, 2021)));

        let first = &ds.records[0];
        assert_eq!(first.product, ProductType::PineSawtimber);
        assert_eq!(first.time, "2021-Q1");
        assert_eq!(first.year, Some(2021));
        assert_eq!(first.quarter, Quarter::Q1);
        assert_eq!(first.average, Some(25.50));
    }

    #[test]
    fn non_numeric_year_becomes_missing() {
        let text = "\
Type,Time,Year,Quarter,Minimum,Average,Maximum
Pine Sawtimber,unknown,n/a,Q1,20.00,25.50,31.00
Pine Sawtimber,2020-Q1,2020,Q1,19.00,24.00,30.00
";
        let ds = parse_dataset(text).unwrap();
        assert_eq!(ds.records[0].year, None);
        // Missing years are excluded from the observed span.
        assert_eq!(ds.year_span, Some((2020, 2020)));
    }

    #[test]
    fn unknown_categories_are_skipped() {
        let text = "\
Type,Time,Year,Quarter,Minimum,Average,Maximum
Teak,2021-Q1,2021,Q1,1,2,3
Pine Sawtimber,2021-Q5,2021,Q5,1,2,3
Pine Sawtimber,2021-Q1,2021,Q1,1,2,3
";
        let ds = parse_dataset(text).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn missing_columns_are_a_schema_mismatch() {
        let text = "Type,Time,Year\nPine Sawtimber,2021-Q1,2021\n";
        match parse_dataset(text) {
            Err(DataError::SchemaMismatch(cols)) => {
                assert!(cols.contains("Quarter"));
                assert!(cols.contains("Average"));
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn cache_loads_once_and_refetches_after_invalidate() {
        let cache = DatasetCache::default();
        let mut calls = 0;

        for _ in 0..2 {
            let ds = cache
                .get_or_load(|| {
                    calls += 1;
                    parse_dataset(SAMPLE)
                })
                .unwrap();
            assert_eq!(ds.len(), 3);
        }
        assert_eq!(calls, 1);

        cache.invalidate();
        cache.get_or_load(|| {
            calls += 1;
            parse_dataset(SAMPLE)
        })
        .unwrap();
        assert_eq!(calls, 2);
    }
}
