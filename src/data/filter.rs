use std::collections::BTreeSet;

use super::model::{Dataset, Period, PriceKind, ProductType, Quarter, Record};

// ---------------------------------------------------------------------------
// Selection – the user's current choices
// ---------------------------------------------------------------------------

/// Everything the controls feed into the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub price: PriceKind,
    pub types: BTreeSet<ProductType>,
    pub quarters: BTreeSet<Quarter>,
    /// Inclusive (min, max); `None` when the dataset has no usable years.
    pub years: Option<(i32, i32)>,
}

impl Selection {
    /// Defaults for a fresh session: Average price, nothing selected, full
    /// observed year span. "Clear All" rebuilds this value in one assignment.
    pub fn defaults(dataset: &Dataset) -> Self {
        Selection {
            price: PriceKind::Average,
            types: BTreeSet::new(),
            quarters: BTreeSet::new(),
            years: dataset.year_span,
        }
    }
}

// ---------------------------------------------------------------------------
// Projection output
// ---------------------------------------------------------------------------

/// One chart point: a period and the resolved price.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub period: Period,
    pub value: f64,
}

/// One product type's time-ordered series.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub product: ProductType,
    pub points: Vec<SeriesPoint>,
}

/// The filtered subset, ready for charting and export.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    pub price: PriceKind,
    /// Distinct periods of the filtered set, chronologically sorted. This is
    /// the x axis; series points index into it by position.
    pub time_axis: Vec<Period>,
    /// Non-empty groups in fixed category order.
    pub groups: Vec<Series>,
    /// The surviving records, grouped by type and time-ordered within each
    /// group. Export flattens exactly these.
    pub rows: Vec<Record>,
}

impl FilteredView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Outcome of [`project`]: either a view (possibly with zero groups) or the
/// insufficient-selection sentinel. The UI may collapse both empty cases into
/// one message, but the distinction exists here.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Insufficient,
    View(FilteredView),
}

// ---------------------------------------------------------------------------
// The pipeline
// ---------------------------------------------------------------------------

/// Turn the full table plus the current selection into chart-ready series.
///
/// Pure in (dataset, selection); recomputed wholesale on every interaction.
pub fn project(dataset: &Dataset, selection: &Selection) -> Projection {
    let Some((year_min, year_max)) = selection.years else {
        return Projection::Insufficient;
    };
    if selection.types.is_empty() || selection.quarters.is_empty() {
        return Projection::Insufficient;
    }

    let matches = |r: &Record| {
        selection.types.contains(&r.product)
            && selection.quarters.contains(&r.quarter)
            && r.year.is_some_and(|y| year_min <= y && y <= year_max)
    };

    // Chronological axis over the distinct periods of the filtered set. A
    // BTreeSet gives the sort and the dedup in one pass.
    let time_axis: Vec<Period> = dataset
        .records
        .iter()
        .filter(|r| matches(r))
        .filter_map(|r| r.period())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut groups = Vec::new();
    let mut rows = Vec::new();
    for product in ProductType::ALL {
        if !selection.types.contains(&product) {
            continue;
        }
        let mut group: Vec<&Record> = dataset
            .records
            .iter()
            .filter(|r| r.product == product && matches(r))
            .collect();
        if group.is_empty() {
            continue;
        }
        group.sort_by_key(|r| r.period());

        let points = group
            .iter()
            .filter_map(|r| {
                let period = r.period()?;
                let value = selection.price.resolve(r)?;
                Some(SeriesPoint { period, value })
            })
            .collect();

        groups.push(Series { product, points });
        rows.extend(group.into_iter().cloned());
    }

    Projection::View(FilteredView {
        price: selection.price,
        time_axis,
        groups,
        rows,
    })
}
