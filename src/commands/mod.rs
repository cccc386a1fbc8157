//! Command handlers.
//!
//! Each handler performs one user action through the
//! [`Repository`](crate::store::Repository) and
//! returns a [`Reply`]: the re-rendered chart, a status line and the data for
//! `--json` output.
//!
//! # Modules
//!
//! - `goals`: add, remove, star, progress, reset, show
//! - `stars`: award, claim, history
//! - `export`: CSV/JSON export

pub mod export;
pub mod goals;
pub mod render;
pub mod stars;

use serde::Serialize;

use crate::errors::{AppError, ErrorResponse};
use crate::models::{ChartMode, GoalView, RewardChart};
use crate::store::Change;

/// Success output envelope printed with `--json`.
#[derive(Debug, Serialize)]
pub struct CommandResponse<'a> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,
    pub data: &'a serde_json::Value,
}

/// Chart snapshot returned as `data` by every chart command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub mode: ChartMode,
    pub stars: u32,
    pub goals: Vec<GoalView>,
    /// What the action did; absent for read-only commands and no-ops
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<serde_json::Value>,
}

impl ChartData {
    pub fn new(chart: &RewardChart, outcome: Option<serde_json::Value>) -> Self {
        Self {
            mode: chart.mode,
            stars: chart.stars,
            goals: chart.goal_views(),
            outcome,
        }
    }
}

/// Render a chart and its snapshot.
pub fn chart_reply(chart: &RewardChart) -> Result<Reply, AppError> {
    Reply::new(render::chart(chart), &ChartData::new(chart, None))
}

/// Render the chart left by an action, with its outcome as data.
pub fn change_reply<T: Serialize>(change: &Change<T>) -> Result<Reply, AppError> {
    let outcome = match &change.outcome {
        Some(outcome) => Some(serde_json::to_value(outcome)?),
        None => None,
    };
    Reply::new(
        render::chart(&change.chart),
        &ChartData::new(&change.chart, outcome),
    )
}

/// What a command has to show.
#[derive(Debug, Clone)]
pub struct Reply {
    /// Rendered chart or listing
    pub view: String,
    /// Status line printed under the view
    pub status: Option<String>,
    pub data: serde_json::Value,
}

impl Reply {
    pub fn new<T: Serialize>(view: String, data: &T) -> Result<Self, AppError> {
        Ok(Self {
            view,
            status: None,
            data: serde_json::to_value(data)?,
        })
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Print a successful reply to stdout.
pub fn print_reply(reply: &Reply, json: bool) {
    if json {
        let body = CommandResponse {
            success: true,
            message: reply.status.as_deref(),
            data: &reply.data,
        };
        print_json(&body);
        return;
    }

    let view = reply.view.trim_end();
    if !view.is_empty() {
        println!("{}", view);
    }
    if let Some(status) = &reply.status {
        if !view.is_empty() {
            println!();
        }
        println!("{}", status);
    }
}

/// Print an error: the JSON envelope on stdout, or a message on stderr.
pub fn print_error(err: &AppError, json: bool) {
    if json {
        print_json(&ErrorResponse::new(err));
    } else {
        eprintln!("Error: {}", err.message());
    }
}

fn print_json<T: Serialize>(body: &T) {
    match serde_json::to_string_pretty(body) {
        Ok(text) => println!("{}", text),
        Err(e) => tracing::error!("Failed to encode output: {}", e),
    }
}

/// Convert a 1-based position typed by the user into an index.
///
/// Position 0 maps past the end so it behaves like any other unknown goal.
pub fn index_of(position: usize) -> usize {
    position.checked_sub(1).unwrap_or(usize::MAX)
}
