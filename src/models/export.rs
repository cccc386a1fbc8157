//! Flat export record.

use serde::{Deserialize, Serialize};

/// One row of a CSV/JSON export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportRecord {
    pub date: String,
    pub details: String,
    pub result: String,
}
