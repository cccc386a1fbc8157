//! Export command.

use std::path::PathBuf;

use clap::Args;

use super::Reply;
use crate::config::Config;
use crate::errors::AppError;
use crate::store::Repository;

/// Arguments for the export command.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Directory to write the files to (defaults to the data directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

/// Export the history (ledger) or the goals (progress) as CSV and JSON.
pub fn handle_export(
    repo: &Repository,
    config: &Config,
    args: ExportArgs,
) -> Result<Reply, AppError> {
    let dir = args.dir.unwrap_or_else(|| config.export_dir().to_path_buf());
    let report = repo.export(&dir)?;

    let status = format!(
        "Exported {} records to {} and {}",
        report.records,
        report.csv_path.display(),
        report.json_path.display()
    );
    Ok(Reply::new(String::new(), &report)?.with_status(status))
}
