//! Writing revision reports to disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use biostudy_core::ReportCollector;
use chrono::NaiveDate;

/// `biotech_report_YYYYMMDD.txt`
pub fn default_export_name(date: NaiveDate) -> String {
    format!("biotech_report_{}.txt", date.format("%Y%m%d"))
}

/// Dated export path inside `dir` for today.
pub fn default_export_path(dir: &Path) -> PathBuf {
    dir.join(default_export_name(chrono::Local::now().date_naive()))
}

/// Writes the exported report to `path`, creating parent directories.
pub fn write_report(report: &ReportCollector, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create report directory {}", parent.display()))?;
    }
    fs::write(path, report.export())
        .with_context(|| format!("write report {}", path.display()))?;
    tracing::info!(path = %path.display(), entries = report.len(), "report written");
    Ok(())
}
