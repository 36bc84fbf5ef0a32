use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Field – the three canonical columns
// ---------------------------------------------------------------------------

/// Canonical column of a loaded variant table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Chromosome,
    Position,
    AltAlleleFreq,
}

impl Field {
    /// All canonical fields, in output column order.
    pub const ALL: [Field; 3] = [Field::Chromosome, Field::Position, Field::AltAlleleFreq];

    pub fn label(self) -> &'static str {
        match self {
            Field::Chromosome => "Chromosome",
            Field::Position => "Position",
            Field::AltAlleleFreq => "AltAlleleFreq",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// VariantRecord – one cleaned row
// ---------------------------------------------------------------------------

/// A single variant call after column resolution and numeric coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub chromosome: String,
    pub position: u64,
    pub alt_allele_freq: f64,
}

impl VariantRecord {
    pub fn new(chromosome: impl Into<String>, position: u64, alt_allele_freq: f64) -> Self {
        Self {
            chromosome: chromosome.into(),
            position,
            alt_allele_freq,
        }
    }
}

// ---------------------------------------------------------------------------
// VariantTable – the complete loaded file
// ---------------------------------------------------------------------------

/// Canonical table produced by the loader.
///
/// Never empty when returned from [`super::loader::load_variant_file`].
#[derive(Debug, Clone, Default)]
pub struct VariantTable {
    /// Cleaned rows, in file order.
    pub records: Vec<VariantRecord>,
    /// Number of data rows read before cleaning.
    pub source_rows: usize,
}

impl VariantTable {
    pub fn new(records: Vec<VariantRecord>, source_rows: usize) -> Self {
        VariantTable {
            records,
            source_rows,
        }
    }

    /// Number of rows kept.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows dropped during numeric coercion.
    pub fn dropped_rows(&self) -> usize {
        self.source_rows.saturating_sub(self.records.len())
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariantRecord> {
        self.records.iter()
    }

    /// Column names of the canonical schema.
    pub fn column_names(&self) -> Vec<&'static str> {
        Field::ALL.iter().map(|f| f.label()).collect()
    }

    /// Sorted distinct chromosome names.
    pub fn chromosomes(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.chromosome.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// ScoreSeries – windowed mutation load
// ---------------------------------------------------------------------------

/// One evaluated window that contained at least one qualifying variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreWindow {
    /// First position covered by the window.
    pub start: u64,
    pub event_count: usize,
    pub mean_alt_allele_freq: f64,
    /// `event_count * mean_alt_allele_freq`, unrounded.
    pub score: f64,
}

/// Windows sorted ascending by `start`, empty windows omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreSeries {
    pub windows: Vec<ScoreWindow>,
}

impl ScoreSeries {
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// `[window_start, score]` pairs for plotting.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.windows
            .iter()
            .map(|w| [w.start as f64, w.score])
            .collect()
    }
}
