//! Ledger history events.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ExportRecord;

/// Timestamp format stored on history events.
pub const HISTORY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One entry of the append-only reward ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum HistoryEvent {
    /// Stars were awarded; `total` is the balance afterwards.
    Award {
        #[serde(default)]
        date: String,
        stars: u32,
        #[serde(default)]
        total: u32,
    },
    /// A goal was claimed for `cost` stars.
    Claim {
        #[serde(default)]
        date: String,
        claimed: String,
        #[serde(default)]
        cost: u32,
    },
}

impl HistoryEvent {
    pub fn award(at: NaiveDateTime, stars: u32, total: u32) -> Self {
        HistoryEvent::Award {
            date: at.format(HISTORY_DATE_FORMAT).to_string(),
            stars,
            total,
        }
    }

    pub fn claim(at: NaiveDateTime, claimed: impl Into<String>, cost: u32) -> Self {
        HistoryEvent::Claim {
            date: at.format(HISTORY_DATE_FORMAT).to_string(),
            claimed: claimed.into(),
            cost,
        }
    }

    pub fn date(&self) -> &str {
        match self {
            HistoryEvent::Award { date, .. } | HistoryEvent::Claim { date, .. } => date,
        }
    }

    pub fn to_export_record(&self) -> ExportRecord {
        match self {
            HistoryEvent::Award { date, stars, total } => ExportRecord {
                date: date.clone(),
                details: format!("+{} stars", stars),
                result: format!("total {}", total),
            },
            HistoryEvent::Claim {
                date,
                claimed,
                cost,
            } => ExportRecord {
                date: date.clone(),
                details: format!("Claimed: {}", claimed),
                result: format!("-{} stars", cost),
            },
        }
    }
}
