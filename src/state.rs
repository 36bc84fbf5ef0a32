use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::config::{RegionQuery, MAX_FILES};
use crate::data::loader::load_variant_path;
use crate::data::model::{ScoreSeries, VariantTable};
use crate::data::scorer::compute_mutation_load;

// ---------------------------------------------------------------------------
// Loaded files
// ---------------------------------------------------------------------------

/// One uploaded variant file and its current score series.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    /// Display name (file name without directories).
    pub name: String,
    pub table: VariantTable,
    /// Stable colour slot, `0..MAX_FILES`.
    pub slot: usize,
    pub series: ScoreSeries,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded files, in the order they were added.
    pub files: Vec<LoadedFile>,

    /// Region being edited in the side panel.
    pub query: RegionQuery,

    /// Region the current series were computed for.
    pub plotted_query: Option<RegionQuery>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn with_query(query: RegionQuery) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    pub fn is_full(&self) -> bool {
        self.files.len() >= MAX_FILES
    }

    fn free_slot(&self) -> Option<usize> {
        (0..MAX_FILES).find(|slot| self.files.iter().all(|f| f.slot != *slot))
    }

    /// Add an already-loaded table and score it against the plotted region.
    pub fn add_table(&mut self, name: String, table: VariantTable) -> Result<()> {
        let Some(slot) = self.free_slot() else {
            bail!("at most {MAX_FILES} variant files can be compared");
        };
        let series = match &self.plotted_query {
            Some(q) => compute_mutation_load(&table, &q.chrom, q.start, q.end, q.bin_size),
            None => ScoreSeries::default(),
        };
        self.files.push(LoadedFile {
            name,
            table,
            slot,
            series,
        });
        Ok(())
    }

    /// Load a variant file from disk and add it.
    pub fn add_file(&mut self, path: &Path) -> Result<()> {
        if self.is_full() {
            bail!("at most {MAX_FILES} variant files can be compared");
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let table = load_variant_path(path).with_context(|| name.clone())?;
        log::info!(
            "Loaded {} variants from {name} on {:?}",
            table.len(),
            table.chromosomes()
        );
        self.add_table(name, table)
    }

    /// Try every path, keeping the ones that load. Failures are logged and
    /// summarised in the status message. Returns how many files were added.
    pub fn add_files(&mut self, paths: &[PathBuf]) -> usize {
        let mut errors = Vec::new();
        for path in paths {
            if let Err(e) = self.add_file(path) {
                log::error!("Failed to load {}: {e:#}", path.display());
                errors.push(format!("{e:#}"));
            }
        }

        self.status_message = match errors.as_slice() {
            [] => None,
            [only] if paths.len() == 1 => Some(format!("Error: {only}")),
            _ => Some(format!(
                "Skipped {} of {} files: {}",
                errors.len(),
                paths.len(),
                errors.join("; ")
            )),
        };
        paths.len() - errors.len()
    }

    pub fn remove_file(&mut self, index: usize) {
        if index < self.files.len() {
            let removed = self.files.remove(index);
            log::debug!("removed {}", removed.name);
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.plotted_query = None;
        self.status_message = None;
    }

    /// Re-score every loaded file against the edited region.
    pub fn recompute(&mut self) {
        let q = self.query.clone();
        for file in &mut self.files {
            file.series = compute_mutation_load(&file.table, &q.chrom, q.start, q.end, q.bin_size);
        }
        self.status_message = q.warning();
        if self.status_message.is_none() && self.total_windows() == 0 && !self.files.is_empty() {
            self.status_message = Some(format!("no qualifying variants in {}", q.label()));
        }
        self.plotted_query = Some(q);
    }

    /// Windows across all series.
    pub fn total_windows(&self) -> usize {
        self.files.iter().map(|f| f.series.len()).sum()
    }

    /// `(name, series)` pairs for export.
    pub fn labelled_series(&self) -> Vec<(&str, &ScoreSeries)> {
        self.files
            .iter()
            .map(|f| (f.name.as_str(), &f.series))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_variant_file;

    fn table(text: &str) -> VariantTable {
        load_variant_file(text).unwrap()
    }

    fn query() -> RegionQuery {
        RegionQuery {
            chrom: "V".to_string(),
            start: 90,
            end: 130,
            bin_size: 30,
        }
    }

    #[test]
    fn recompute_scores_every_file() {
        let mut state = AppState::with_query(query());
        state
            .add_table("a".into(), table("chrom,pos,af\nV,100,0.1\nV,105,0.2"))
            .unwrap();
        state
            .add_table("b".into(), table("chrom,pos,af\nV,120,0.3"))
            .unwrap();
        assert_eq!(state.total_windows(), 0);

        state.recompute();
        assert_eq!(state.files[0].series.len(), 12);
        assert!(!state.files[1].series.is_empty());
        assert!(state.status_message.is_none());
        assert_eq!(state.plotted_query, Some(query()));
    }

    #[test]
    fn files_added_after_plotting_are_scored() {
        let mut state = AppState::with_query(query());
        state.recompute();
        state
            .add_table("late".into(), table("chrom,pos,af\nV,100,0.1"))
            .unwrap();
        assert!(!state.files[0].series.is_empty());
    }

    #[test]
    fn fifth_file_is_rejected_and_slots_are_reused() {
        let mut state = AppState::default();
        for i in 0..MAX_FILES {
            state
                .add_table(format!("f{i}"), table("chrom,pos,af\nV,1,0.1"))
                .unwrap();
        }
        assert!(state.is_full());
        assert!(state
            .add_table("extra".into(), table("chrom,pos,af\nV,1,0.1"))
            .is_err());

        state.remove_file(1);
        state
            .add_table("again".into(), table("chrom,pos,af\nV,1,0.1"))
            .unwrap();
        assert_eq!(state.files.last().map(|f| f.slot), Some(1));
    }

    #[test]
    fn empty_result_sets_status() {
        let mut state = AppState::with_query(query());
        state
            .add_table("a".into(), table("chrom,pos,af\nII,100,0.1"))
            .unwrap();
        state.recompute();
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("no qualifying variants")));
    }

    #[test]
    fn add_file_reports_loader_errors_verbatim() {
        let mut state = AppState::default();
        let err = state
            .add_file(Path::new("/nonexistent/variants.tsv"))
            .unwrap_err();
        assert!(format!("{err:#}").starts_with("variants.tsv: IO error"));
        assert!(state.files.is_empty());
    }

    #[test]
    fn add_files_keeps_going_after_a_failure() {
        let good = std::env::temp_dir().join(format!("mlv-{}-good.tsv", std::process::id()));
        std::fs::write(&good, "chrom\tpos\taf\nV\t100\t0.1\n").unwrap();
        let paths = vec![
            PathBuf::from("/nonexistent/first.tsv"),
            good.clone(),
            PathBuf::from("/nonexistent/last.tsv"),
        ];

        let mut state = AppState::default();
        let added = state.add_files(&paths);
        std::fs::remove_file(&good).unwrap();

        assert_eq!(added, 1);
        assert_eq!(state.files.len(), 1);
        let status = state.status_message.unwrap();
        assert!(status.starts_with("Skipped 2 of 3 files: first.tsv: "));
        assert!(status.contains("last.tsv: "));
    }

    #[test]
    fn add_files_clears_status_only_when_all_load() {
        let mut state = AppState::default();
        state.add_files(&[PathBuf::from("/nonexistent/a.tsv")]);
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Error: a.tsv: ")));

        state.add_files(&[]);
        assert_eq!(state.status_message, None);
    }
}
