use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use crate::data::scorer::DEFAULT_BIN_SIZE;

/// Most variant files compared in one plot.
pub const MAX_FILES: usize = 4;

// ---------------------------------------------------------------------------
// RegionQuery – what to score
// ---------------------------------------------------------------------------

/// Genomic interval and window width for one analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionQuery {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub bin_size: u64,
}

impl Default for RegionQuery {
    fn default() -> Self {
        Self {
            chrom: "V".to_string(),
            start: 5_292_480,
            end: 5_293_019,
            bin_size: DEFAULT_BIN_SIZE,
        }
    }
}

impl RegionQuery {
    /// `chrom:start-end`
    pub fn label(&self) -> String {
        format!("{}:{}-{}", self.chrom, self.start, self.end)
    }

    /// Human-readable reason the query cannot produce any window.
    pub fn warning(&self) -> Option<String> {
        if self.chrom.is_empty() {
            return Some("chromosome is empty".to_string());
        }
        if self.start > self.end {
            return Some(format!("start {} is after end {}", self.start, self.end));
        }
        if self.bin_size == 0 {
            return Some("bin size must be at least 1".to_string());
        }
        if self.bin_size - 1 > self.end - self.start {
            return Some(format!(
                "bin size {} is wider than {}",
                self.bin_size,
                self.label()
            ));
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
/// Compare sliding-window mutation load across up to four variant files
pub struct Cli {
    /// Variant files to load on startup (tab, comma, or whitespace delimited)
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Chromosome to score (exact, case-sensitive match)
    #[arg(short, long, default_value = "V")]
    pub chrom: String,

    /// First position of the region (inclusive)
    #[arg(short, long, default_value_t = 5_292_480)]
    pub start: u64,

    /// Last position of the region (inclusive)
    #[arg(short, long, default_value_t = 5_293_019)]
    pub end: u64,

    /// Sliding window width
    #[arg(short, long, default_value_t = DEFAULT_BIN_SIZE)]
    pub bin_size: u64,

    /// Score the files without opening a window and write the series here
    /// (.json for JSON, anything else for CSV)
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

impl Cli {
    pub fn query(&self) -> RegionQuery {
        RegionQuery {
            chrom: self.chrom.clone(),
            start: self.start,
            end: self.end,
            bin_size: self.bin_size,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.files.len() > MAX_FILES {
            bail!(
                "at most {MAX_FILES} variant files can be compared, got {}",
                self.files.len()
            );
        }
        if self.export.is_some() && self.files.is_empty() {
            bail!("--export needs at least one variant file");
        }
        Ok(())
    }
}
