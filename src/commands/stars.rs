//! Ledger commands: award, claim, history.

use clap::{Args, ValueEnum};

use super::goals::GoalArgs;
use super::{change_reply, index_of, render, Reply};
use crate::errors::AppError;
use crate::store::Repository;

/// Preset awards offered under the goal list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Praise {
    /// Good job! +1 star
    Good,
    /// Great! +3 stars
    Great,
    /// Amazing! +5 stars
    Amazing,
}

impl Praise {
    pub fn stars(&self) -> u32 {
        match self {
            Praise::Good => 1,
            Praise::Great => 3,
            Praise::Amazing => 5,
        }
    }
}

/// Arguments for the award command.
#[derive(Args, Debug)]
pub struct AwardArgs {
    /// Preset award
    #[arg(value_enum, default_value_t = Praise::Good)]
    pub praise: Praise,

    /// Award an exact number of stars instead of a preset
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub count: Option<u32>,
}

/// Award stars.
pub fn handle_award(repo: &Repository, args: AwardArgs) -> Result<Reply, AppError> {
    let count = args.count.unwrap_or_else(|| args.praise.stars());
    let change = repo.add_stars(count)?;
    let total = change.outcome.unwrap_or(change.chart.stars);

    Ok(change_reply(&change)?.with_status(format!("Added {} stars! Total: {}", count, total)))
}

/// Claim a goal.
pub fn handle_claim(repo: &Repository, args: GoalArgs) -> Result<Reply, AppError> {
    let change = repo.claim(index_of(args.goal))?;

    let status = match &change.outcome {
        Some(_) => "\u{1f389} Goal claimed!".to_string(),
        None => format!("No goal at position {}", args.goal),
    };
    Ok(change_reply(&change)?.with_status(status))
}

/// List the award and claim history.
pub fn handle_history(repo: &Repository) -> Result<Reply, AppError> {
    let chart = repo.chart();
    let history = chart.history()?;
    Reply::new(render::history(history), &history)
}
