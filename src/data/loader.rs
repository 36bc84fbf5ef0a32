use std::path::Path;
use std::sync::OnceLock;

use csv::{ReaderBuilder, StringRecord, Trim};
use regex::Regex;

use super::columns::{resolve_columns, ColumnMap};
use super::error::{LoadError, Result};
use super::model::{VariantRecord, VariantTable};

/// Delimiters tried by the sniffer, in tie-break order.
const CANDIDATE_DELIMITERS: [u8; 5] = [b'\t', b',', b';', b'|', b' '];

/// Non-comment lines inspected when sniffing.
const SNIFF_SAMPLE_LINES: usize = 64;

const COMMENT_PREFIX: u8 = b'#';

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// Uploaded content before decoding.
#[derive(Debug, Clone, Copy)]
pub enum RawInput<'a> {
    Bytes(&'a [u8]),
    Text(&'a str),
}

impl<'a> From<&'a [u8]> for RawInput<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        RawInput::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for RawInput<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        RawInput::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for RawInput<'a> {
    fn from(text: &'a str) -> Self {
        RawInput::Text(text)
    }
}

impl<'a> From<&'a String> for RawInput<'a> {
    fn from(text: &'a String) -> Self {
        RawInput::Text(text)
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a variant table from a file on disk.
pub fn load_variant_path(path: &Path) -> Result<VariantTable> {
    let bytes = std::fs::read(path)?;
    load_variant_file(&bytes)
}

/// Parse raw delimited text into the canonical `Chromosome`, `Position`,
/// `AltAlleleFreq` table.
///
/// The delimiter is sniffed; if that fails, runs of two or more spaces are
/// collapsed to tabs and the text is parsed as TSV. Rows whose position or
/// allele frequency is not numeric are dropped.
pub fn load_variant_file<'a>(raw: impl Into<RawInput<'a>>) -> Result<VariantTable> {
    let text = decode_text(raw.into())?;
    let parsed = parse_table(&text)?;

    let columns = resolve_columns(&parsed.headers)?;
    log::debug!(
        "resolved columns {:?} from header {:?}",
        columns,
        parsed.headers
    );

    let source_rows = parsed.rows.len();
    let records: Vec<VariantRecord> = parsed
        .rows
        .iter()
        .filter_map(|row| coerce_row(row, &columns))
        .collect();

    if records.is_empty() {
        return Err(LoadError::NoValidRows);
    }

    log::info!(
        "loaded {} variants ({} of {} rows dropped, {:?})",
        records.len(),
        source_rows - records.len(),
        source_rows,
        parsed.strategy
    );

    Ok(VariantTable::new(records, source_rows))
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

fn decode_text(raw: RawInput<'_>) -> Result<String> {
    let text = match raw {
        RawInput::Bytes(bytes) => {
            if bytes.starts_with(&[0x1f, 0x8b]) {
                return Err(LoadError::UnsupportedInputType(
                    "gzip-compressed data".to_string(),
                ));
            }
            if bytes.contains(&0) {
                return Err(LoadError::UnsupportedInputType("binary data".to_string()));
            }
            String::from_utf8_lossy(bytes).into_owned()
        }
        RawInput::Text(text) => {
            if text.contains('\0') {
                return Err(LoadError::UnsupportedInputType("binary data".to_string()));
            }
            text.to_string()
        }
    };

    let trimmed = text.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        return Err(LoadError::EmptyInput);
    }
    Ok(trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Table parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseStrategy {
    Sniffed(u8),
    WhitespaceFallback,
}

#[derive(Debug)]
struct ParsedTable {
    headers: Vec<String>,
    rows: Vec<StringRecord>,
    strategy: ParseStrategy,
}

/// Sniffed delimiter first, whitespace-collapse fallback second.
fn parse_table(text: &str) -> Result<ParsedTable> {
    let sniffed = sniff_delimiter(text).and_then(|delimiter| {
        match read_delimited(text, delimiter) {
            Ok((headers, rows)) if !headers.is_empty() => Some(ParsedTable {
                headers,
                rows,
                strategy: ParseStrategy::Sniffed(delimiter),
            }),
            Ok(_) => None,
            Err(e) => {
                log::debug!(
                    "parse with sniffed delimiter {:?} failed: {e}",
                    delimiter as char
                );
                None
            }
        }
    });

    let parsed = match sniffed {
        Some(parsed) => parsed,
        None => {
            log::debug!("delimiter sniffing failed, collapsing repeated spaces to tabs");
            let cleaned = collapse_spaces(text);
            let (headers, rows) = read_delimited(&cleaned, b'\t')
                .map_err(|e| LoadError::UnparsableTable(e.to_string()))?;
            ParsedTable {
                headers,
                rows,
                strategy: ParseStrategy::WhitespaceFallback,
            }
        }
    };

    if parsed.headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::UnparsableTable("no header row".to_string()));
    }
    if parsed.rows.is_empty() {
        return Err(LoadError::UnparsableTable("no data rows".to_string()));
    }
    Ok(parsed)
}

/// Pick the delimiter that splits the header into the most fields, among
/// those that a strict majority of the sampled data lines agree with.
fn sniff_delimiter(text: &str) -> Option<u8> {
    let sample: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty() && !l.starts_with(COMMENT_PREFIX as char))
        .take(SNIFF_SAMPLE_LINES)
        .collect();
    let sample = sample.join("\n");

    let mut best: Option<(u8, usize)> = None;
    for delimiter in CANDIDATE_DELIMITERS {
        let Some(shape) = sample_shape(&sample, delimiter) else {
            continue;
        };
        let majority = shape.data_lines == 0 || shape.agreeing * 2 > shape.data_lines;
        if shape.header_width < 2 || !majority {
            continue;
        }
        if best.map_or(true, |(_, w)| shape.header_width > w) {
            best = Some((delimiter, shape.header_width));
        }
    }

    if let Some((delimiter, width)) = best {
        log::debug!("sniffed delimiter {:?} ({width} columns)", delimiter as char);
    }
    best.map(|(delimiter, _)| delimiter)
}

/// How a candidate delimiter splits the sniffing sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SampleShape {
    header_width: usize,
    data_lines: usize,
    /// Data lines with exactly `header_width` fields.
    agreeing: usize,
}

fn sample_shape(sample: &str, delimiter: u8) -> Option<SampleShape> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(sample.as_bytes());

    let mut records = reader.records();
    let header_width = records.next()?.ok()?.len();
    let mut shape = SampleShape {
        header_width,
        data_lines: 0,
        agreeing: 0,
    };
    for record in records {
        let len = record.ok()?.len();
        shape.data_lines += 1;
        if len == header_width {
            shape.agreeing += 1;
        }
    }
    Some(shape)
}

/// Flexible parse: short rows keep their missing cells for coercion to drop,
/// rows that are blank after trimming are skipped.
fn read_delimited(
    text: &str,
    delimiter: u8,
) -> std::result::Result<(Vec<String>, Vec<StringRecord>), csv::Error> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .comment(Some(COMMENT_PREFIX))
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(record);
    }
    Ok((headers, rows))
}

fn collapse_spaces(text: &str) -> String {
    static RUNS: OnceLock<Regex> = OnceLock::new();
    let runs = RUNS.get_or_init(|| Regex::new(r"[ ]{2,}").expect("valid regex"));
    runs.replace_all(text, "\t").into_owned()
}

// ---------------------------------------------------------------------------
// Numeric coercion
// ---------------------------------------------------------------------------

fn coerce_row(row: &StringRecord, columns: &ColumnMap) -> Option<VariantRecord> {
    let chromosome = row.get(columns.chromosome).unwrap_or_default();
    let position = row.get(columns.position).and_then(parse_position)?;
    let alt_allele_freq = row.get(columns.alt_allele_freq).and_then(parse_number)?;
    Some(VariantRecord::new(chromosome, position, alt_allele_freq))
}

/// Finite float, or `None` for anything else (empty, text, NaN, inf).
fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Non-negative number truncated to an integer coordinate.
fn parse_position(s: &str) -> Option<u64> {
    parse_number(s)
        .filter(|v| *v >= 0.0)
        .map(|v| v.trunc() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Field;

    #[test]
    fn loads_tab_separated_file() {
        let text = "Chromosome\tPosition\tAltAlleleFreq\nV\t100\t0.1\nV\t105\t0.2\n";
        let table = load_variant_file(text).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0], VariantRecord::new("V", 100, 0.1));
        assert_eq!(table.records[1], VariantRecord::new("V", 105, 0.2));
    }

    #[test]
    fn loads_csv_with_synonyms_and_extra_columns() {
        let text = "ref,AF,CHR,alt,BP\nA,0.25,II,G,42\nC,0.5,X,T,7\n";
        let table = load_variant_file(text).unwrap();
        assert_eq!(
            table.records,
            vec![
                VariantRecord::new("II", 42, 0.25),
                VariantRecord::new("X", 7, 0.5),
            ]
        );
        assert_eq!(
            table.column_names(),
            vec!["Chromosome", "Position", "AltAlleleFreq"]
        );
    }

    #[test]
    fn loads_semicolon_and_pipe_tables() {
        let semi = load_variant_file("chrom;pos;af\nI;1;0.1\nI;2;0.2").unwrap();
        assert_eq!(semi.len(), 2);
        let pipe = load_variant_file("chrom|pos|af\nI|1|0.1").unwrap();
        assert_eq!(pipe.records[0], VariantRecord::new("I", 1, 0.1));
    }

    #[test]
    fn loads_single_space_separated_table() {
        let table = load_variant_file("chrom pos af\nV 10 0.3\nV 11 0.1").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[1], VariantRecord::new("V", 11, 0.1));
    }

    #[test]
    fn skips_comment_lines() {
        let text = "# produced by caller v2\n# sample=N2\nchrom,pos,af\n#V,1,0.9\nV,100,0.1\n";
        let table = load_variant_file(text).unwrap();
        assert_eq!(table.records, vec![VariantRecord::new("V", 100, 0.1)]);
        assert_eq!(table.source_rows, 1);
    }

    #[test]
    fn falls_back_to_whitespace_collapse() {
        let text = "chrom  pos   af\nV  100  0.1\nV     105   0.2\n";
        assert_eq!(sniff_delimiter(text), None);

        let parsed = parse_table(text).unwrap();
        assert_eq!(parsed.strategy, ParseStrategy::WhitespaceFallback);
        assert_eq!(parsed.headers, vec!["chrom", "pos", "af"]);

        let table = load_variant_file(text).unwrap();
        assert_eq!(
            table.records,
            vec![
                VariantRecord::new("V", 100, 0.1),
                VariantRecord::new("V", 105, 0.2),
            ]
        );
    }

    #[test]
    fn truncated_last_row_is_dropped() {
        let text = "chrom,pos,af\nV,100,0.1\nV,105,0.2\nV,101\n";
        let parsed = parse_table(text).unwrap();
        assert_eq!(parsed.strategy, ParseStrategy::Sniffed(b','));

        let table = load_variant_file(text).unwrap();
        assert_eq!(
            table.records,
            vec![
                VariantRecord::new("V", 100, 0.1),
                VariantRecord::new("V", 105, 0.2),
            ]
        );
        assert_eq!(table.dropped_rows(), 1);
    }

    #[test]
    fn whitespace_only_lines_are_skipped() {
        let text = "chrom,pos,af\nV,100,0.1\n   \nV,105,0.2\n";
        let table = load_variant_file(text).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.source_rows, 2);

        let tsv = "chrom\tpos\taf\nV\t100\t0.1\n\t \t\nV\t105\t0.2";
        assert_eq!(load_variant_file(tsv).unwrap().len(), 2);
    }

    #[test]
    fn minority_of_ragged_rows_keeps_sniffed_delimiter() {
        let text = "chrom;pos;af\nI;1;0.1\nI;2;0.2;extra\nI;3;0.3\nI;4\nI;5;0.5\n";
        assert_eq!(sniff_delimiter(text), Some(b';'));
        let positions: Vec<u64> = load_variant_file(text)
            .unwrap()
            .iter()
            .map(|r| r.position)
            .collect();
        assert_eq!(positions, vec![1, 2, 3, 5]);
    }

    #[test]
    fn sniffer_prefers_widest_consistent_split() {
        let text = "chrom,pos,af\nV,1,0.1\nV,2,0.2";
        assert_eq!(sniff_delimiter(text), Some(b','));
        let parsed = parse_table(text).unwrap();
        assert_eq!(parsed.strategy, ParseStrategy::Sniffed(b','));
    }

    #[test]
    fn empty_and_blank_input_is_rejected() {
        assert!(matches!(load_variant_file(""), Err(LoadError::EmptyInput)));
        assert!(matches!(
            load_variant_file(" \n\t \r\n"),
            Err(LoadError::EmptyInput)
        ));
        let empty: &[u8] = &[];
        assert!(matches!(load_variant_file(empty), Err(LoadError::EmptyInput)));
        assert_eq!(LoadError::EmptyInput.to_string(), "file is empty");
    }

    #[test]
    fn binary_input_is_unsupported() {
        let gz: &[u8] = &[0x1f, 0x8b, 0x08, 0x00];
        assert!(matches!(
            load_variant_file(gz),
            Err(LoadError::UnsupportedInputType(_))
        ));
        let nul: &[u8] = b"chrom,pos,af\nV,1\0,0.1";
        assert!(matches!(
            load_variant_file(nul),
            Err(LoadError::UnsupportedInputType(_))
        ));
    }

    #[test]
    fn header_without_rows_is_unparsable() {
        assert!(matches!(
            load_variant_file("chrom,pos,af\n"),
            Err(LoadError::UnparsableTable(_))
        ));
    }

    #[test]
    fn missing_column_names_the_field() {
        let err = load_variant_file("chrom,depth,af\nV,12,0.1").unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(Field::Position)));
        assert_eq!(err.to_string(), "missing required column: Position");

        let err = load_variant_file("contig\tpos\taf\nV\t12\t0.1").unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(Field::Chromosome)));
    }

    #[test]
    fn non_numeric_rows_are_dropped() {
        let text = "chrom,pos,af\nV,100,0.1\nV,abc,0.2\nV,110,n/a\nV,,0.3\nV,120,\nV,130,0.05\n";
        let table = load_variant_file(text).unwrap();
        assert_eq!(table.source_rows, 6);
        assert_eq!(table.len(), 2);
        assert_eq!(table.dropped_rows(), 4);
        assert!(table.len() <= table.source_rows);
    }

    #[test]
    fn all_rows_invalid_fails() {
        let err = load_variant_file("chrom,pos,af\nV,x,0.1\nV,1,y").unwrap_err();
        assert!(matches!(err, LoadError::NoValidRows));
        assert_eq!(err.to_string(), "no valid rows remained after cleaning");
    }

    #[test]
    fn positions_are_truncated_and_negatives_dropped() {
        let table = load_variant_file("chrom,pos,af\nV,100.7,0.1\nV,-5,0.1\nV,2e2,0.1").unwrap();
        let positions: Vec<u64> = table.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![100, 200]);
    }

    #[test]
    fn non_finite_values_are_dropped() {
        let table = load_variant_file("chrom,pos,af\nV,1,NaN\nV,2,inf\nV,3,0.2").unwrap();
        assert_eq!(table.records, vec![VariantRecord::new("V", 3, 0.2)]);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let bytes: &[u8] = b"chrom,pos,af,note\nV,100,0.1,ab\xffc\n";
        let table = load_variant_file(bytes).unwrap();
        assert_eq!(table.records, vec![VariantRecord::new("V", 100, 0.1)]);
    }

    #[test]
    fn handles_bom_quotes_and_padding() {
        let text = "\u{feff}\"Chrom\",\"Pos\",\"AF\"\n\"V\", 100 ,0.1\n";
        let table = load_variant_file(text).unwrap();
        assert_eq!(table.records, vec![VariantRecord::new("V", 100, 0.1)]);
    }

    #[test]
    fn short_rows_in_fallback_are_dropped() {
        let text = "chrom  pos  af  depth\nV  100  0.1  30\nV  101\n";
        let table = load_variant_file(text).unwrap();
        assert_eq!(table.records, vec![VariantRecord::new("V", 100, 0.1)]);
        assert_eq!(table.source_rows, 2);
    }

    #[test]
    fn chromosome_names_are_kept_verbatim() {
        let table = load_variant_file("chrom,pos,af\nchrV,1,0.1\n1,2,0.2").unwrap();
        assert_eq!(table.chromosomes(), vec!["1".to_string(), "chrV".to_string()]);
    }
}
