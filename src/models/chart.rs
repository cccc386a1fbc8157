//! The reward chart document and its mutations.
//!
//! All functions here are pure state transitions; persistence lives in
//! [`crate::store`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{lenient_vec, ExportRecord, Goal, HistoryEvent, DEFAULT_EMOJI};
use crate::errors::AppError;

/// Current version of the persisted chart document.
pub const SCHEMA_VERSION: u32 = 1;

/// Which variant of the chart is running.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    /// Star balance with award/claim history; claiming consumes stars.
    #[default]
    Ledger,
    /// Fixed-target goals whose star slots are filled directly.
    Progress,
}

impl ChartMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartMode::Ledger => "ledger",
            ChartMode::Progress => "progress",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ledger" => Some(ChartMode::Ledger),
            "progress" => Some(ChartMode::Progress),
            _ => None,
        }
    }

    /// File holding this mode's chart inside the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            ChartMode::Ledger => "rewards.json",
            ChartMode::Progress => "goals.json",
        }
    }

    /// Target offered for a new goal when none is given.
    pub fn default_target(&self) -> u32 {
        match self {
            ChartMode::Ledger => 10,
            ChartMode::Progress => 5,
        }
    }
}

impl fmt::Display for ChartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown chart mode '{}'", s))
    }
}

/// Outcome of claiming a goal.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReceipt {
    pub name: String,
    pub cost: u32,
    pub stars_left: u32,
}

/// Read-side projection of a goal for rendering.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GoalView {
    /// 1-based position as shown to the user
    pub position: usize,
    pub name: String,
    pub emoji: String,
    pub progress: u32,
    pub target: u32,
    pub reached: bool,
    pub slots: String,
}

/// The whole persisted state: goals, star balance and ledger history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RewardChart {
    /// 0 for documents written before versioning
    #[serde(default)]
    pub schema_version: u32,
    #[serde(default)]
    pub mode: ChartMode,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub stars: u32,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub history: Vec<HistoryEvent>,
}

impl RewardChart {
    /// A chart with no goals, no stars and no history.
    pub fn empty(mode: ChartMode) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            mode,
            goals: Vec::new(),
            stars: 0,
            history: Vec::new(),
        }
    }

    /// The chart a first launch starts from.
    pub fn default_for(mode: ChartMode) -> Self {
        let mut chart = Self::empty(mode);
        if mode == ChartMode::Progress {
            chart.goals = vec![
                Goal::new("Brush teeth", "\u{1f9f7}", 5),
                Goal::new("Get dressed", "\u{1f455}", 5),
                Goal::new("Tidy room", "\u{1f9f9}", 3),
                Goal::new("Read a book", "\u{1f4d6}", 5),
            ];
        }
        chart
    }

    /// Upgrade a freshly parsed document to the current schema and restore
    /// every invariant it may have lost on disk.
    pub fn normalize(&mut self, mode: ChartMode) {
        self.schema_version = SCHEMA_VERSION;
        self.mode = mode;
        self.goals.retain(|goal| !goal.name.trim().is_empty());
        self.refresh();
    }

    /// Recompute derived goal progress and the `done` flags.
    fn refresh(&mut self) {
        let stars = self.stars;
        let ledger = self.mode == ChartMode::Ledger;
        for goal in &mut self.goals {
            if ledger {
                goal.progress = stars;
            }
            goal.normalize();
        }
    }

    fn require_mode(&self, mode: ChartMode, operation: &str) -> Result<(), AppError> {
        if self.mode == mode {
            Ok(())
        } else {
            Err(AppError::Unsupported(format!(
                "'{}' is only available in {} mode (current mode: {})",
                operation, mode, self.mode
            )))
        }
    }

    /// Append a goal with zero progress. Blank names are ignored.
    pub fn add_goal(&mut self, name: &str, target: u32) -> Result<Option<&Goal>, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        if target == 0 {
            return Err(AppError::Validation(
                "Stars needed must be at least 1".to_string(),
            ));
        }

        self.goals.push(Goal::new(name, DEFAULT_EMOJI, target));
        self.refresh();
        Ok(self.goals.last())
    }

    /// Remove the goal at `index`, keeping the others in order.
    pub fn remove_goal(&mut self, index: usize) -> Option<Goal> {
        if index >= self.goals.len() {
            return None;
        }
        Some(self.goals.remove(index))
    }

    /// Set a goal's progress directly, clamped to its target.
    pub fn set_progress(&mut self, index: usize, value: u32) -> Result<Option<&Goal>, AppError> {
        self.require_mode(ChartMode::Progress, "progress")?;
        let Some(goal) = self.goals.get_mut(index) else {
            return Ok(None);
        };
        goal.progress = value.min(goal.target);
        goal.normalize();
        Ok(Some(&*goal))
    }

    /// Click on star slot `slot` (0-based): fills every slot up to and including it.
    pub fn mark_star(&mut self, index: usize, slot: u32) -> Result<Option<&Goal>, AppError> {
        self.require_mode(ChartMode::Progress, "star")?;
        let in_range = self
            .goals
            .get(index)
            .is_some_and(|goal| slot < goal.target);
        if !in_range {
            return Ok(None);
        }
        self.set_progress(index, slot + 1)
    }

    /// Empty every goal's star slots. Returns the number of goals reset.
    pub fn reset_all(&mut self) -> Result<usize, AppError> {
        self.require_mode(ChartMode::Progress, "reset")?;
        for goal in &mut self.goals {
            goal.progress = 0;
            goal.normalize();
        }
        Ok(self.goals.len())
    }

    /// The award and claim history, oldest first.
    pub fn history(&self) -> Result<&[HistoryEvent], AppError> {
        self.require_mode(ChartMode::Ledger, "history")?;
        Ok(&self.history)
    }

    /// Award stars and log the award. Returns the new balance.
    pub fn add_stars(&mut self, count: u32, at: NaiveDateTime) -> Result<u32, AppError> {
        self.require_mode(ChartMode::Ledger, "award")?;
        self.stars = self.stars.saturating_add(count);
        self.history.push(HistoryEvent::award(at, count, self.stars));
        self.refresh();
        Ok(self.stars)
    }

    /// Spend a goal's cost, remove the goal and log the claim.
    ///
    /// The balance never drops below zero, even when the goal costs more
    /// than is available.
    pub fn claim(
        &mut self,
        index: usize,
        at: NaiveDateTime,
    ) -> Result<Option<ClaimReceipt>, AppError> {
        self.require_mode(ChartMode::Ledger, "claim")?;
        let Some(goal) = self.remove_goal(index) else {
            return Ok(None);
        };

        self.stars = self.stars.saturating_sub(goal.target);
        self.history
            .push(HistoryEvent::claim(at, goal.name.clone(), goal.target));
        self.refresh();

        Ok(Some(ClaimReceipt {
            name: goal.name,
            cost: goal.target,
            stars_left: self.stars,
        }))
    }

    pub fn goal_views(&self) -> Vec<GoalView> {
        self.goals
            .iter()
            .enumerate()
            .map(|(i, goal)| GoalView {
                position: i + 1,
                name: goal.name.clone(),
                emoji: goal.emoji.clone(),
                progress: goal.progress,
                target: goal.target,
                reached: goal.done,
                slots: goal.star_slots(),
            })
            .collect()
    }

    /// Flatten the chart for export: the history in ledger mode, the goals
    /// in progress mode.
    pub fn export_records(&self) -> Vec<ExportRecord> {
        match self.mode {
            ChartMode::Ledger => self
                .history
                .iter()
                .map(HistoryEvent::to_export_record)
                .collect(),
            ChartMode::Progress => self
                .goals
                .iter()
                .map(|goal| ExportRecord {
                    date: String::new(),
                    details: goal.name.clone(),
                    result: format!("{}/{}", goal.progress, goal.target),
                })
                .collect(),
        }
    }
}
