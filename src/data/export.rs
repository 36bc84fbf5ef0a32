use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::model::{ScoreSeries, ScoreWindow};

/// One CSV line: a window tagged with the file it came from.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    file: &'a str,
    window_start: u64,
    event_count: usize,
    mean_alt_allele_freq: f64,
    score: f64,
}

#[derive(Debug, Serialize)]
struct JsonSeries<'a> {
    file: &'a str,
    windows: &'a [ScoreWindow],
}

/// Write every labelled series as CSV with a single header row.
pub fn write_series_csv<W: Write>(writer: W, series: &[(&str, &ScoreSeries)]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for (label, s) in series {
        for w in &s.windows {
            csv.serialize(CsvRow {
                file: label,
                window_start: w.start,
                event_count: w.event_count,
                mean_alt_allele_freq: w.mean_alt_allele_freq,
                score: w.score,
            })
            .with_context(|| format!("writing window {} of {label}", w.start))?;
        }
    }
    csv.flush().context("flushing CSV output")?;
    Ok(())
}

/// Write the series as a JSON array of `{ "file", "windows" }` objects.
pub fn write_series_json<W: Write>(writer: W, series: &[(&str, &ScoreSeries)]) -> Result<()> {
    let payload: Vec<JsonSeries> = series
        .iter()
        .map(|(label, s)| JsonSeries {
            file: label,
            windows: &s.windows,
        })
        .collect();
    serde_json::to_writer_pretty(writer, &payload).context("serializing JSON")?;
    Ok(())
}

/// Export to `path`, choosing JSON for `.json` and CSV otherwise.
pub fn export_path(path: &Path, series: &[(&str, &ScoreSeries)]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let writer = std::io::BufWriter::new(file);

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        write_series_json(writer, series)?;
    } else {
        write_series_csv(writer, series)?;
    }
    log::info!("exported {} series to {}", series.len(), path.display());
    Ok(())
}
