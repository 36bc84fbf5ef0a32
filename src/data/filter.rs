use super::model::{VariantRecord, VariantTable};

/// Variants above this alternate allele frequency never count toward the
/// mutation load.
pub const MAX_QUALIFYING_ALT_FREQ: f64 = 0.35;

// ---------------------------------------------------------------------------
// Region predicate
// ---------------------------------------------------------------------------

/// Which variants are eligible for scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionFilter<'a> {
    /// Compared byte-for-byte; no `chr` prefix or case folding.
    pub chrom: &'a str,
    pub start: u64,
    /// Inclusive.
    pub end: u64,
    pub max_alt_freq: f64,
}

impl<'a> RegionFilter<'a> {
    pub fn new(chrom: &'a str, start: u64, end: u64) -> Self {
        RegionFilter {
            chrom,
            start,
            end,
            max_alt_freq: MAX_QUALIFYING_ALT_FREQ,
        }
    }

    /// A record passes when it sits on `chrom`, inside `[start, end]`, at or
    /// below the frequency threshold.
    pub fn accepts(&self, record: &VariantRecord) -> bool {
        record.chromosome == self.chrom
            && record.position >= self.start
            && record.position <= self.end
            && record.alt_allele_freq <= self.max_alt_freq
    }
}

/// Records passing `filter`, in table order.
pub fn qualifying_records<'t>(
    table: &'t VariantTable,
    filter: &RegionFilter<'_>,
) -> Vec<&'t VariantRecord> {
    table.iter().filter(|r| filter.accepts(r)).collect()
}
