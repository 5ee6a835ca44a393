//! User-curated revision report.

use biostudy_model::ReportEntry;

/// Line closing every report section.
pub const REPORT_SEPARATOR: &str = "----------------------------------------";

const DEFAULT_TITLE: &str = "BIOTECH STUDY REPORT";

/// Ordered list of topics the student chose to revise.
///
/// Entries are appended as-is; the same topic may appear more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportCollector {
    title: String,
    entries: Vec<ReportEntry>,
}

impl Default for ReportCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportCollector {
    pub fn new() -> Self {
        Self::with_title(DEFAULT_TITLE)
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    /// Removes every entry. Cannot be undone.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the report as flat text.
    ///
    /// Header line, underline, blank line, then one `TOPIC:` section per
    /// entry in insertion order. Identical state always renders identically.
    pub fn export(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&"=".repeat(self.title.chars().count()));
        out.push_str("\n\n");

        for entry in &self.entries {
            out.push_str("TOPIC: ");
            out.push_str(&entry.topic);
            out.push('\n');
            let notes = entry.notes.trim_end();
            if !notes.is_empty() {
                out.push_str(notes);
                out.push('\n');
            }
            out.push_str(REPORT_SEPARATOR);
            out.push_str("\n\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_export_has_only_header() {
        let report = ReportCollector::new();
        assert_eq!(
            report.export(),
            "BIOTECH STUDY REPORT\n====================\n\n"
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut report = ReportCollector::new();
        report.add(ReportEntry::new("X", "Y"));
        report.add(ReportEntry::new("X", "Y"));
        assert_eq!(report.len(), 2);
        assert_eq!(report.export().matches("TOPIC: X").count(), 2);
    }

    #[test]
    fn test_clear_removes_sections() {
        let mut report = ReportCollector::new();
        report.add(ReportEntry::new("X", "Y"));
        report.clear();
        assert!(report.is_empty());
        assert!(!report.export().contains("TOPIC:"));
    }

    #[test]
    fn test_export_is_stable() {
        let mut report = ReportCollector::with_title("Exam prep");
        report.add(ReportEntry::new("PCR", "amplifies DNA"));
        assert_eq!(report.export(), report.export());
        assert!(report.export().starts_with("Exam prep\n=========\n"));
    }

    #[test]
    fn test_empty_notes_skip_body_line() {
        let mut report = ReportCollector::new();
        report.add(ReportEntry::new("Gel", ""));
        assert!(report.export().contains(&format!("TOPIC: Gel\n{REPORT_SEPARATOR}\n")));
    }
}
