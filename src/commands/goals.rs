//! Goal commands: show, add, remove, star, progress, reset.

use clap::Args;

use super::{change_reply, chart_reply, index_of, Reply};
use crate::errors::AppError;
use crate::models::Goal;
use crate::store::Repository;

/// Arguments for the add command.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Goal name (e.g. "New toy")
    pub name: String,

    /// Stars needed (defaults to 10 in ledger mode, 5 in progress mode)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub target: Option<u32>,
}

/// Arguments for commands addressing one goal.
#[derive(Args, Debug)]
pub struct GoalArgs {
    /// Goal position as shown by `show`
    pub goal: usize,
}

/// Arguments for the star command.
#[derive(Args, Debug)]
pub struct StarArgs {
    /// Goal position as shown by `show`
    pub goal: usize,

    /// Star slot to fill up to, counting from 1
    pub slot: u32,
}

/// Arguments for the progress command.
#[derive(Args, Debug)]
pub struct ProgressArgs {
    /// Goal position as shown by `show`
    pub goal: usize,

    /// Number of filled stars
    pub value: u32,
}

fn progress_status(goal: &Goal) -> String {
    let mut status = format!("{}: {} of {}", goal.name, goal.progress, goal.target);
    if goal.done {
        status.push_str(". Goal reached!");
    }
    status
}

/// Show the chart.
pub fn handle_show(repo: &Repository) -> Result<Reply, AppError> {
    chart_reply(&repo.chart())
}

/// Add a goal.
pub fn handle_add(repo: &Repository, args: AddArgs) -> Result<Reply, AppError> {
    let target = args.target.unwrap_or_else(|| repo.mode().default_target());
    let change = repo.add_goal(&args.name, target)?;

    let status = match &change.outcome {
        Some(goal) => format!("Added goal \"{}\" ({} \u{2b50})", goal.name, goal.target),
        None => "Nothing added: the goal needs a name".to_string(),
    };
    Ok(change_reply(&change)?.with_status(status))
}

/// Delete a goal.
pub fn handle_remove(repo: &Repository, args: GoalArgs) -> Result<Reply, AppError> {
    let change = repo.remove_goal(index_of(args.goal))?;

    let status = match &change.outcome {
        Some(goal) => format!("Removed \"{}\"", goal.name),
        None => format!("No goal at position {}", args.goal),
    };
    Ok(change_reply(&change)?.with_status(status))
}

/// Click a star slot.
pub fn handle_star(repo: &Repository, args: StarArgs) -> Result<Reply, AppError> {
    let slot = args.slot.checked_sub(1).unwrap_or(u32::MAX);
    let change = repo.mark_star(index_of(args.goal), slot)?;

    let status = match &change.outcome {
        Some(goal) => progress_status(goal),
        None => format!("No star {} on goal {}", args.slot, args.goal),
    };
    Ok(change_reply(&change)?.with_status(status))
}

/// Set a goal's progress directly.
pub fn handle_progress(repo: &Repository, args: ProgressArgs) -> Result<Reply, AppError> {
    let change = repo.set_progress(index_of(args.goal), args.value)?;

    let status = match &change.outcome {
        Some(goal) => progress_status(goal),
        None => format!("No goal at position {}", args.goal),
    };
    Ok(change_reply(&change)?.with_status(status))
}

/// Reset all progress.
pub fn handle_reset(repo: &Repository) -> Result<Reply, AppError> {
    let change = repo.reset_all()?;
    let count = change.outcome.unwrap_or(0);
    Ok(change_reply(&change)?.with_status(format!("Reset {} goals", count)))
}
