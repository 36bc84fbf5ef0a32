use super::filter::{qualifying_records, RegionFilter};
use super::model::{ScoreSeries, ScoreWindow, VariantTable};

/// Window width used when the caller does not pick one.
pub const DEFAULT_BIN_SIZE: u64 = 30;

// ---------------------------------------------------------------------------
// Sliding-window mutation load
// ---------------------------------------------------------------------------

/// Slide a `bin_size`-wide window one position at a time over
/// `[start, end]` on `chrom` and score each window as
/// `event_count * mean_alt_allele_freq` over its qualifying variants.
///
/// Windows start at every position from `start` to `end - bin_size + 1`, so
/// the last `bin_size - 1` positions are only covered by earlier windows.
/// Windows without a qualifying variant are skipped rather than scored zero.
/// An inverted range, a zero `bin_size`, or a window wider than the range all
/// give an empty series.
pub fn compute_mutation_load(
    table: &VariantTable,
    chrom: &str,
    start: u64,
    end: u64,
    bin_size: u64,
) -> ScoreSeries {
    if bin_size == 0 || start > end {
        log::debug!("empty scoring range {chrom}:{start}-{end} (bin size {bin_size})");
        return ScoreSeries::default();
    }
    // last_start = end - bin_size + 1, kept in range without overflow
    let Some(slack) = (end - start).checked_sub(bin_size - 1) else {
        log::debug!("bin size {bin_size} wider than {chrom}:{start}-{end}");
        return ScoreSeries::default();
    };
    let last_start = start + slack;

    let region = qualifying_records(table, &RegionFilter::new(chrom, start, end));
    let mut windows = Vec::new();
    if region.is_empty() {
        return ScoreSeries { windows };
    }

    for s in start..=last_start {
        let e = s + bin_size - 1;
        let (event_count, freq_sum) = region
            .iter()
            .filter(|r| r.position >= s && r.position <= e)
            .fold((0usize, 0.0f64), |(n, sum), r| (n + 1, sum + r.alt_allele_freq));

        if event_count == 0 {
            continue;
        }
        let mean_alt_allele_freq = freq_sum / event_count as f64;
        windows.push(ScoreWindow {
            start: s,
            event_count,
            mean_alt_allele_freq,
            score: event_count as f64 * mean_alt_allele_freq,
        });
    }

    log::debug!(
        "{} scored windows over {chrom}:{start}-{end} from {} qualifying variants",
        windows.len(),
        region.len()
    );
    ScoreSeries { windows }
}
