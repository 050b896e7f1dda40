use sweep_core::{RunStatus, SweeperRun};

pub struct TableFormatter {
    sweeper_width: usize,
    region_width: usize,
    status_width: usize,
    count_width: usize,
    detail_width: usize,
}

impl TableFormatter {
    pub fn new(runs: &[SweeperRun]) -> Self {
        let sweeper_width = runs
            .iter()
            .map(|r| r.sweeper.len())
            .max()
            .unwrap_or(9)
            .clamp(7, 40); // "Sweeper" header min
        let region_width = runs
            .iter()
            .map(|r| r.region.len())
            .max()
            .unwrap_or(9)
            .clamp(6, 30);

        Self {
            sweeper_width,
            region_width,
            status_width: 9,
            count_width: 7,
            detail_width: 60,
        }
    }

    pub fn print_table(&self, runs: &[SweeperRun]) {
        println!("{}", self.border('┌', '┬', '┐'));
        println!(
            "{}",
            self.row(
                "Sweeper", "Region", "Status", "Listed", "Deleted", "Failed", "Detail"
            )
        );
        println!("{}", self.border('├', '┼', '┤'));
        for run in runs {
            let (listed, deleted, failed) = match run.outcome.report() {
                Some(report) => (
                    report.listed.to_string(),
                    report.deleted.to_string(),
                    report.failed.to_string(),
                ),
                None => ("-".to_string(), "-".to_string(), "-".to_string()),
            };
            println!(
                "{}",
                self.row(
                    &run.sweeper,
                    &run.region,
                    status_label(&run.outcome),
                    &listed,
                    &deleted,
                    &failed,
                    &detail(&run.outcome),
                )
            );
        }
        println!("{}", self.border('└', '┴', '┘'));
    }

    #[allow(clippy::too_many_arguments)]
    fn row(
        &self,
        sweeper: &str,
        region: &str,
        status: &str,
        listed: &str,
        deleted: &str,
        failed: &str,
        detail: &str,
    ) -> String {
        format!(
            "│ {} │ {} │ {} │ {} │ {} │ {} │ {} │",
            truncate(sweeper, self.sweeper_width),
            truncate(region, self.region_width),
            truncate(status, self.status_width),
            truncate(listed, self.count_width),
            truncate(deleted, self.count_width),
            truncate(failed, self.count_width),
            truncate(detail, self.detail_width),
        )
    }

    fn border(&self, left: char, middle: char, right: char) -> String {
        let widths = [
            self.sweeper_width,
            self.region_width,
            self.status_width,
            self.count_width,
            self.count_width,
            self.count_width,
            self.detail_width,
        ];
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(&middle.to_string()), right)
    }
}

pub fn status_label(status: &RunStatus) -> &'static str {
    match status {
        RunStatus::Completed(_) => "completed",
        RunStatus::Skipped { .. } => "skipped",
        RunStatus::Failed { .. } => "failed",
        RunStatus::NotRun { .. } => "not run",
    }
}

/// First line of the skip reason or error, which is enough for a table cell.
fn detail(status: &RunStatus) -> String {
    let text = match status {
        RunStatus::Completed(report) if report.dry_run => "dry run",
        RunStatus::Completed(report) if report.cancelled => "cancelled",
        RunStatus::Completed(_) => "",
        RunStatus::Skipped { reason, .. } => reason.as_str(),
        RunStatus::Failed { error, .. } => error.as_str(),
        RunStatus::NotRun { reason } => reason.as_str(),
    };
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.ends_with("occurred:"))
        .unwrap_or("")
        .trim_start_matches("* ")
        .to_string()
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
///
/// Uses character count (not byte count) to safely handle UTF-8 strings.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}
