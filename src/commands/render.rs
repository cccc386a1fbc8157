//! Plain-text rendering of the chart.

use crate::models::{ChartMode, HistoryEvent, RewardChart};

const STAR: &str = "\u{2b50}";

/// Render the chart the way the main window lays it out.
pub fn chart(chart: &RewardChart) -> String {
    match chart.mode {
        ChartMode::Ledger => ledger(chart),
        ChartMode::Progress => progress(chart),
    }
}

fn ledger(chart: &RewardChart) -> String {
    let mut out = format!("{} {}\n\nYour Goals\n", STAR, chart.stars);

    if chart.goals.is_empty() {
        out.push_str("  No goals yet. Earn stars by completing tasks!\n");
        return out;
    }

    for view in chart.goal_views() {
        out.push_str(&format!(
            "  {}. {}  {}/{} {}",
            view.position, view.name, view.progress, view.target, STAR
        ));
        if view.reached {
            out.push_str("  Claim! \u{1f389}");
        }
        out.push('\n');
    }
    out
}

fn progress(chart: &RewardChart) -> String {
    let mut out = String::from("My Goals\n");

    if chart.goals.is_empty() {
        out.push_str("  No goals yet.\n");
        return out;
    }

    for view in chart.goal_views() {
        out.push_str(&format!(
            "\n  {}. {} {}\n     {}\n     {} of {}\n",
            view.position, view.emoji, view.name, view.slots, view.progress, view.target
        ));
        if view.reached {
            out.push_str("     Goal reached!\n");
        }
    }
    out
}

/// Render the ledger history, oldest first.
pub fn history(events: &[HistoryEvent]) -> String {
    if events.is_empty() {
        return "No history yet.\n".to_string();
    }

    events
        .iter()
        .map(|event| match event {
            HistoryEvent::Award { stars, total, .. } => format!(
                "{}  +{} {}  (total {})\n",
                event.date(),
                stars,
                STAR,
                total
            ),
            HistoryEvent::Claim { claimed, cost, .. } => format!(
                "{}  \u{1f389} {}  (-{} {})\n",
                event.date(),
                claimed,
                cost,
                STAR
            ),
        })
        .collect()
}
