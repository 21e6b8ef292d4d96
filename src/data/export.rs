use serde::Serialize;

use super::filter::FilteredView;
use super::model::Record;

/// One exported row. Field order fixes the CSV column order to match the
/// source schema.
#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Type")]
    product: &'a str,
    #[serde(rename = "Time")]
    time: &'a str,
    #[serde(rename = "Year")]
    year: Option<i32>,
    #[serde(rename = "Quarter")]
    quarter: &'a str,
    #[serde(rename = "Minimum")]
    minimum: Option<f64>,
    #[serde(rename = "Average")]
    average: Option<f64>,
    #[serde(rename = "Maximum")]
    maximum: Option<f64>,
}

impl<'a> From<&'a Record> for ExportRow<'a> {
    fn from(r: &'a Record) -> Self {
        ExportRow {
            product: r.product.label(),
            time: &r.time,
            year: r.year,
            quarter: r.quarter.label(),
            minimum: r.minimum,
            average: r.average,
            maximum: r.maximum,
        }
    }
}

/// Serialize the filtered rows to UTF-8 CSV bytes with a header row, for the
/// `data.csv` download.
pub fn to_csv_bytes(view: &FilteredView) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in &view.rows {
        writer.serialize(ExportRow::from(record))?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{project, Projection, Selection};
    use crate::data::loader::parse_dataset;
    use crate::data::model::{PriceKind, ProductType, Quarter};

    const SAMPLE: &str = "\
Type,Time,Year,Quarter,Minimum,Average,Maximum
Pine Sawtimber,2021-Q1,2021,Q1,20.0,25.5,31.0
Pine Sawtimber,2021-Q2,2021,Q2,21.0,26.0,32.0
Pine Pulpwood,2021-Q1,2021,Q1,5.0,7.75,9.5
";

    fn everything_selected(span: Option<(i32, i32)>) -> Selection {
        Selection {
            price: PriceKind::Average,
            types: ProductType::ALL.into_iter().collect(),
            quarters: Quarter::ALL.into_iter().collect(),
            years: span,
        }
    }

    #[test]
    fn export_then_parse_round_trips_the_rows() {
        let ds = parse_dataset(SAMPLE).unwrap();
        let sel = everything_selected(ds.year_span);
        let Projection::View(view) = project(&ds, &sel) else {
            panic!("expected a view");
        };

        let bytes = to_csv_bytes(&view).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let reparsed = parse_dataset(&text).unwrap();

        assert_eq!(reparsed.len(), view.rows.len());
        for (a, b) in reparsed.records.iter().zip(&view.rows) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn header_row_matches_the_source_schema() {
        let ds = parse_dataset(SAMPLE).unwrap();
        let sel = everything_selected(ds.year_span);
        let Projection::View(view) = project(&ds, &sel) else {
            panic!("expected a view");
        };

        let text = String::from_utf8(to_csv_bytes(&view).unwrap()).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, "Type,Time,Year,Quarter,Minimum,Average,Maximum");
    }
}
