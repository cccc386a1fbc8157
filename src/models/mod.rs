//! Data models for the reward chart.
//!
//! The chart document is the single persisted unit; every user action is a pure
//! mutation on [`RewardChart`] followed by a save.

mod chart;
mod export;
mod goal;
mod history;

pub use chart::*;
pub use export::*;
pub use goal::*;
pub use history::*;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Deserialize a list element by element, skipping entries that do not parse
/// instead of rejecting the whole document.
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::info!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .collect())
}
