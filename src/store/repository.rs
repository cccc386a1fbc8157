//! Chart repository for user actions.
//!
//! Every action is one load, mutate, save cycle against the chart file.

use chrono::{Local, NaiveDateTime};

use super::ChartStore;
use crate::errors::AppError;
use crate::export::{self, ExportReport};
use crate::models::{ChartMode, ClaimReceipt, Goal, RewardChart};

/// Result of a user action together with the chart as it now stands.
#[derive(Debug, Clone)]
pub struct Change<T> {
    /// `None` when the action was a no-op (blank name, unknown position)
    pub outcome: Option<T>,
    pub chart: RewardChart,
}

/// Repository for all chart operations.
#[derive(Debug, Clone)]
pub struct Repository {
    store: ChartStore,
}

impl Repository {
    pub fn new(store: ChartStore) -> Self {
        Self { store }
    }

    pub fn mode(&self) -> ChartMode {
        self.store.mode()
    }

    /// Get the current chart.
    pub fn chart(&self) -> RewardChart {
        self.store.load()
    }

    fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }

    /// Load, apply `mutate` and persist when it changed something.
    fn apply<T, F>(&self, action: &str, mutate: F) -> Result<Change<T>, AppError>
    where
        F: FnOnce(&mut RewardChart) -> Result<Option<T>, AppError>,
    {
        let mut chart = self.store.load();
        let outcome = mutate(&mut chart)?;

        if outcome.is_some() {
            self.store.save(&chart)?;
            tracing::info!("{} saved to {:?}", action, self.store.path());
        } else {
            tracing::debug!("{} changed nothing", action);
        }

        Ok(Change { outcome, chart })
    }

    // ==================== GOAL OPERATIONS ====================

    /// Create a new goal. Blank names are ignored.
    pub fn add_goal(&self, name: &str, target: u32) -> Result<Change<Goal>, AppError> {
        self.apply("add goal", |chart| {
            Ok(chart.add_goal(name, target)?.cloned())
        })
    }

    /// Delete the goal at `index`.
    pub fn remove_goal(&self, index: usize) -> Result<Change<Goal>, AppError> {
        self.apply("remove goal", |chart| Ok(chart.remove_goal(index)))
    }

    /// Set a goal's progress directly.
    pub fn set_progress(&self, index: usize, value: u32) -> Result<Change<Goal>, AppError> {
        self.apply("set progress", |chart| {
            Ok(chart.set_progress(index, value)?.cloned())
        })
    }

    /// Fill a goal's star slots up to `slot` (0-based).
    pub fn mark_star(&self, index: usize, slot: u32) -> Result<Change<Goal>, AppError> {
        self.apply("mark star", |chart| {
            Ok(chart.mark_star(index, slot)?.cloned())
        })
    }

    /// Reset every goal's progress to zero.
    pub fn reset_all(&self) -> Result<Change<usize>, AppError> {
        self.apply("reset all", |chart| chart.reset_all().map(Some))
    }

    // ==================== LEDGER OPERATIONS ====================

    /// Award stars. The outcome is the new balance.
    pub fn add_stars(&self, count: u32) -> Result<Change<u32>, AppError> {
        self.apply("add stars", |chart| {
            chart.add_stars(count, Self::now()).map(Some)
        })
    }

    /// Claim the goal at `index`.
    pub fn claim(&self, index: usize) -> Result<Change<ClaimReceipt>, AppError> {
        self.apply("claim", |chart| chart.claim(index, Self::now()))
    }

    // ==================== EXPORT ====================

    /// Write the chart's export records into `dir`.
    pub fn export(&self, dir: &std::path::Path) -> Result<ExportReport, AppError> {
        let chart = self.store.load();
        let records = chart.export_records();
        let report = export::export_records(dir, &records, Self::now())?;
        tracing::info!(
            "Exported {} records to {:?} and {:?}",
            report.records,
            report.csv_path,
            report.json_path
        );
        Ok(report)
    }
}
