use std::collections::HashMap;

use super::error::{LoadError, Result};
use super::model::Field;

/// Accepted header spellings per canonical field, highest priority first.
pub const CHROMOSOME_SYNONYMS: &[&str] = &["chromosome", "chrom", "chr", "#chrom", "#chromosome"];
pub const POSITION_SYNONYMS: &[&str] = &["position", "pos", "start", "bp"];
pub const ALT_ALLELE_FREQ_SYNONYMS: &[&str] = &[
    "altallelefreq",
    "alt_allele_freq",
    "alt_freq",
    "allele_freq",
    "af",
    "altfreq",
];

pub fn synonyms(field: Field) -> &'static [&'static str] {
    match field {
        Field::Chromosome => CHROMOSOME_SYNONYMS,
        Field::Position => POSITION_SYNONYMS,
        Field::AltAlleleFreq => ALT_ALLELE_FREQ_SYNONYMS,
    }
}

/// Column indices of the three canonical fields within a parsed header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub chromosome: usize,
    pub position: usize,
    pub alt_allele_freq: usize,
}

/// Resolve the canonical fields against `headers`.
///
/// Headers are compared trimmed and lower-cased. If two headers fold to the
/// same key the later one wins.
pub fn resolve_columns<S: AsRef<str>>(headers: &[S]) -> Result<ColumnMap> {
    let folded: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.as_ref().trim().to_lowercase(), i))
        .collect();

    let pick = |field: Field| -> Result<usize> {
        synonyms(field)
            .iter()
            .find_map(|name| folded.get(*name).copied())
            .ok_or(LoadError::MissingColumn(field))
    };

    Ok(ColumnMap {
        chromosome: pick(Field::Chromosome)?,
        position: pick(Field::Position)?,
        alt_allele_freq: pick(Field::AltAlleleFreq)?,
    })
}
