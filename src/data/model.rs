use std::fmt;

// ---------------------------------------------------------------------------
// ProductType – the five reported forest products
// ---------------------------------------------------------------------------

/// A forest product category. Declaration order is the fixed plot/legend
/// order, so the derived `Ord` doubles as the display ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProductType {
    PineSawtimber,
    MixedHardwoodSawtimber,
    PineChipNSaw,
    PinePulpwood,
    HardwoodPulpwood,
}

impl ProductType {
    pub const ALL: [ProductType; 5] = [
        ProductType::PineSawtimber,
        ProductType::MixedHardwoodSawtimber,
        ProductType::PineChipNSaw,
        ProductType::PinePulpwood,
        ProductType::HardwoodPulpwood,
    ];

    /// Label exactly as it appears in the source CSV's `Type` column.
    pub fn label(&self) -> &'static str {
        match self {
            ProductType::PineSawtimber => "Pine Sawtimber",
            ProductType::MixedHardwoodSawtimber => "Mixed Hardwood Sawtimber",
            ProductType::PineChipNSaw => "Pine Chip-n-Saw",
            ProductType::PinePulpwood => "Pine Pulpwood",
            ProductType::HardwoodPulpwood => "Hardwood Pulpwood",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.label() == s.trim())
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Quarter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    pub fn label(&self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|q| q.label() == s.trim())
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// PriceKind – which price column is plotted
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceKind {
    Minimum,
    Average,
    Maximum,
}

impl PriceKind {
    pub const ALL: [PriceKind; 3] = [PriceKind::Minimum, PriceKind::Average, PriceKind::Maximum];

    pub fn label(&self) -> &'static str {
        match self {
            PriceKind::Minimum => "Minimum",
            PriceKind::Average => "Average",
            PriceKind::Maximum => "Maximum",
        }
    }

    /// The record's value for this price kind.
    pub fn resolve(&self, record: &Record) -> Option<f64> {
        match self {
            PriceKind::Minimum => record.minimum,
            PriceKind::Average => record.average,
            PriceKind::Maximum => record.maximum,
        }
    }
}

impl fmt::Display for PriceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Period – one reporting interval
// ---------------------------------------------------------------------------

/// A (year, quarter) pair. The derived `Ord` is chronological, which is what
/// the chart axis sorts by; the raw `Time` strings from the CSV must never be
/// compared lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    pub year: i32,
    pub quarter: Quarter,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.quarter)
    }
}

// ---------------------------------------------------------------------------
// Record – one observation (one CSV row)
// ---------------------------------------------------------------------------

/// One stumpage price observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub product: ProductType,
    /// The source file's period label, kept verbatim for export.
    pub time: String,
    /// `None` when the source value did not parse as an integer.
    pub year: Option<i32>,
    pub quarter: Quarter,
    pub minimum: Option<f64>,
    pub average: Option<f64>,
    pub maximum: Option<f64>,
}

impl Record {
    /// The chronological period, when the year is known.
    pub fn period(&self) -> Option<Period> {
        self.year.map(|year| Period {
            year,
            quarter: self.quarter,
        })
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table, immutable after load.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<Record>,
    /// Observed (min, max) year over records with a parsed year.
    pub year_span: Option<(i32, i32)>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut years = records.iter().filter_map(|r| r.year);
        let year_span = years
            .next()
            .map(|first| years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))));
        Dataset { records, year_span }
    }

    /// Product types present in the data, in fixed category order.
    pub fn present_types(&self) -> Vec<ProductType> {
        ProductType::ALL
            .iter()
            .copied()
            .filter(|t| self.records.iter().any(|r| r.product == *t))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
