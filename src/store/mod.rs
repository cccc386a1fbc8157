//! JSON file persistence for the reward chart.
//!
//! The chart file is the source of truth; it is read and written wholesale on
//! every user action.

mod repository;

pub use repository::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{lenient_vec, ChartMode, Goal, RewardChart};

/// Shapes accepted when reading a chart file.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredChart {
    /// Bare goal list written by the progress chart before versioning.
    LegacyGoals(#[serde(deserialize_with = "lenient_vec")] Vec<Goal>),
    /// Versioned document, or the unversioned ledger object.
    Document(RewardChart),
}

/// Reads and writes one chart file.
#[derive(Debug, Clone)]
pub struct ChartStore {
    path: PathBuf,
    mode: ChartMode,
}

impl ChartStore {
    /// Store for `mode` inside `data_dir`. Nothing is touched on disk until the first save.
    pub fn open(data_dir: &Path, mode: ChartMode) -> Self {
        Self {
            path: data_dir.join(mode.file_name()),
            mode,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> ChartMode {
        self.mode
    }

    /// Load the chart, falling back to the mode's default when the file is
    /// missing or unreadable.
    pub fn load(&self) -> RewardChart {
        if !self.path.exists() {
            tracing::debug!("No chart at {:?}, starting fresh", self.path);
            return RewardChart::default_for(self.mode);
        }

        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::info!("Could not read {:?}, using defaults: {}", self.path, e);
                return RewardChart::default_for(self.mode);
            }
        };

        let mut chart = match serde_json::from_str::<StoredChart>(&raw) {
            Ok(StoredChart::Document(chart)) => chart,
            Ok(StoredChart::LegacyGoals(goals)) => {
                let mut chart = RewardChart::empty(self.mode);
                chart.goals = goals;
                chart
            }
            Err(e) => {
                tracing::info!("Could not parse {:?}, using defaults: {}", self.path, e);
                return RewardChart::default_for(self.mode);
            }
        };

        chart.normalize(self.mode);
        tracing::debug!(
            "Loaded {} goals and {} stars from {:?}",
            chart.goals.len(),
            chart.stars,
            self.path
        );
        chart
    }

    /// Write the whole chart, creating the data directory if needed.
    pub fn save(&self, chart: &RewardChart) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut json = serde_json::to_string_pretty(chart)?;
        json.push('\n');
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();

        let ledger = ChartStore::open(dir.path(), ChartMode::Ledger).load();
        assert_eq!(ledger, RewardChart::empty(ChartMode::Ledger));

        let progress = ChartStore::open(dir.path(), ChartMode::Progress).load();
        let names: Vec<_> = progress.goals.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Brush teeth", "Get dressed", "Tidy room", "Read a book"]
        );
        assert!(progress.goals.iter().all(|g| g.progress == 0));
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let store = ChartStore::open(dir.path(), ChartMode::Ledger);
        fs::write(store.path(), "{ not json").unwrap();

        assert_eq!(store.load(), RewardChart::empty(ChartMode::Ledger));
    }

    #[test]
    fn test_save_creates_directory_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("config").join("beloningskartan");
        let store = ChartStore::open(&nested, ChartMode::Progress);

        let mut chart = store.load();
        chart.mark_star(1, 2).unwrap();
        store.save(&chart).unwrap();

        assert!(nested.join("goals.json").exists());
        assert_eq!(store.load(), chart);
    }

    #[test]
    fn test_reads_legacy_ledger_file() {
        let dir = TempDir::new().unwrap();
        let store = ChartStore::open(dir.path(), ChartMode::Ledger);
        fs::write(
            store.path(),
            r#"{
  "goals": [{"name": "New toy", "cost": 10, "done": false}],
  "stars": 12,
  "history": [
    {"date": "2026-01-02 18:00", "stars": 5, "total": 12},
    {"date": "2026-01-03 08:15", "claimed": "Cinema", "cost": 7}
  ]
}"#,
        )
        .unwrap();

        let chart = store.load();
        assert_eq!(chart.schema_version, crate::models::SCHEMA_VERSION);
        assert_eq!(chart.stars, 12);
        assert_eq!(chart.goals[0].target, 10);
        assert_eq!(chart.goals[0].progress, 10);
        assert!(chart.goals[0].done);
        assert_eq!(chart.history.len(), 2);
    }

    #[test]
    fn test_nameless_goal_does_not_discard_ledger() {
        let dir = TempDir::new().unwrap();
        let store = ChartStore::open(dir.path(), ChartMode::Ledger);
        fs::write(
            store.path(),
            r#"{
  "goals": [{"cost": 3}, {"name": "Lego", "cost": 4}],
  "stars": 12,
  "history": [{"date": "2026-01-02 18:00", "stars": 12, "total": 12}]
}"#,
        )
        .unwrap();

        let chart = store.load();
        assert_eq!(chart.stars, 12);
        assert_eq!(chart.goals.len(), 1);
        assert_eq!(chart.goals[0].name, "Lego");
        assert_eq!(chart.history.len(), 1);
    }

    #[test]
    fn test_incomplete_history_events_are_kept() {
        let dir = TempDir::new().unwrap();
        let store = ChartStore::open(dir.path(), ChartMode::Ledger);
        fs::write(
            store.path(),
            r#"{
  "goals": [{"name": "Lego", "cost": 4}],
  "stars": 9,
  "history": [
    {"date": "2026-01-02 18:00", "stars": 5},
    {"date": "2026-01-02 18:10", "stars": 4, "total": 9},
    {"date": "2026-01-02 18:20", "note": "not an event"}
  ]
}"#,
        )
        .unwrap();

        let chart = store.load();
        assert_eq!(chart.stars, 9);
        assert_eq!(chart.goals[0].name, "Lego");
        assert_eq!(chart.history.len(), 2);
        assert_eq!(chart.history[0].date(), "2026-01-02 18:00");

        // The next save keeps what was readable
        store.save(&chart).unwrap();
        assert_eq!(store.load(), chart);
    }

    #[test]
    fn test_reads_legacy_goal_array() {
        let dir = TempDir::new().unwrap();
        let store = ChartStore::open(dir.path(), ChartMode::Progress);
        fs::write(
            store.path(),
            r#"[{"name": "Brush teeth", "emoji": "🪥", "target": 5, "progress": 9}]"#,
        )
        .unwrap();

        let chart = store.load();
        assert_eq!(chart.mode, ChartMode::Progress);
        assert_eq!(chart.goals.len(), 1);
        assert_eq!(chart.goals[0].emoji, "🪥");
        assert_eq!(chart.goals[0].progress, 5);
        assert!(chart.goals[0].done);
    }

    #[test]
    fn test_saved_document_is_versioned() {
        let dir = TempDir::new().unwrap();
        let store = ChartStore::open(dir.path(), ChartMode::Ledger);
        store.save(&RewardChart::empty(ChartMode::Ledger)).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["schemaVersion"], 1);
        assert_eq!(raw["mode"], "ledger");
        assert_eq!(raw["stars"], 0);
        assert!(raw["goals"].as_array().unwrap().is_empty());
    }
}
