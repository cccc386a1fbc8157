//! Goal model shared by both chart modes.

use serde::{Deserialize, Serialize};

/// Glyph given to goals created without one.
pub const DEFAULT_EMOJI: &str = "\u{1f31f}";

/// Target used when a stored goal carries none.
pub const DEFAULT_TARGET: u32 = 5;

const FILLED_STAR: char = '\u{2b50}';
const EMPTY_STAR: char = '\u{2606}';

/// A goal the child works towards.
///
/// In ledger mode `target` is the number of stars the goal costs to claim and
/// `progress` mirrors the star balance. In progress mode `progress` counts the
/// filled star slots directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Blank names are dropped on load
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_emoji")]
    pub emoji: String,
    #[serde(alias = "cost", default = "default_target")]
    pub target: u32,
    #[serde(default)]
    pub progress: u32,
    /// Reached in progress mode, claimable in ledger mode
    #[serde(default)]
    pub done: bool,
}

fn default_emoji() -> String {
    DEFAULT_EMOJI.to_string()
}

fn default_target() -> u32 {
    DEFAULT_TARGET
}

impl Goal {
    pub fn new(name: impl Into<String>, emoji: impl Into<String>, target: u32) -> Self {
        Self {
            name: name.into(),
            emoji: emoji.into(),
            target,
            progress: 0,
            done: false,
        }
    }

    pub fn is_reached(&self) -> bool {
        self.progress >= self.target
    }

    /// Star slots as shown on the card, filled first.
    pub fn star_slots(&self) -> String {
        (0..self.target)
            .map(|slot| {
                if slot < self.progress {
                    FILLED_STAR
                } else {
                    EMPTY_STAR
                }
            })
            .collect()
    }

    /// Re-establish `target >= 1`, `progress <= target` and the `done` flag.
    pub(crate) fn normalize(&mut self) {
        self.target = self.target.max(1);
        self.progress = self.progress.min(self.target);
        self.done = self.is_reached();
    }
}
