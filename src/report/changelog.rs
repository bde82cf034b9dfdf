//! Markdown changelog rendering

use crate::compat::types::{ChangeKind, DiffResult};
use std::fmt::Write;
use time::{Date, OffsetDateTime, macros::format_description};

/// Changes between two versions, grouped by section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    pub version: String,
    pub date: Date,
    pub added: Vec<String>,
    pub changed: Vec<String>,
    pub removed: Vec<String>,
    pub breaking: Vec<String>,
}

impl ChangelogEntry {
    /// Buckets the changes of `diff`. Breaking changes are listed both in
    /// their own section and under their kind.
    pub fn from_diff(diff: &DiffResult, date: Date) -> Self {
        let mut entry = Self {
            version: diff.new_version.clone(),
            date,
            added: Vec::new(),
            changed: Vec::new(),
            removed: Vec::new(),
            breaking: Vec::new(),
        };

        for change in &diff.changes {
            let bucket = match change.kind {
                ChangeKind::Added => &mut entry.added,
                ChangeKind::Removed => &mut entry.removed,
                ChangeKind::Modified => &mut entry.changed,
            };
            bucket.push(change.description.clone());

            if change.is_breaking {
                entry.breaking.push(change.description.clone());
            }
        }

        entry
    }

    /// Renders the entry; empty sections are left out.
    pub fn to_markdown(&self) -> String {
        let date = self
            .date
            .format(format_description!("[year]-[month]-[day]"))
            .unwrap_or_else(|_| self.date.to_string());

        let mut out = String::new();
        let _ = writeln!(out, "## [{}] - {}\n", self.version, date);

        for (title, items) in [
            ("⚠️ Breaking Changes", &self.breaking),
            ("Added", &self.added),
            ("Changed", &self.changed),
            ("Removed", &self.removed),
        ] {
            if items.is_empty() {
                continue;
            }
            let _ = writeln!(out, "### {title}\n");
            for item in items {
                let _ = writeln!(out, "- {item}");
            }
            out.push('\n');
        }

        out
    }
}

/// Renders a changelog for `diff`, dated today (UTC).
pub fn generate_changelog(diff: &DiffResult) -> String {
    ChangelogEntry::from_diff(diff, OffsetDateTime::now_utc().date()).to_markdown()
}
