//! Cleaning audit log.
//!
//! Every cleaning step that changes data appends one [`AuditEntry`] carrying
//! the action, the affected column and the number of affected rows. The log
//! is append-only and belongs to a single cleaning run.

use std::fmt;

use serde::Serialize;

/// Cleaning action that produced an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanAction {
    StandardizeColumns,
    DropDuplicates,
    FillMissing,
    NormalizeText,
    StripMarkup,
    CoerceNumeric,
    CoerceDatetime,
    DropColumns,
    RenameColumns,
}

impl CleanAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StandardizeColumns => "standardize_columns",
            Self::DropDuplicates => "drop_duplicates",
            Self::FillMissing => "fill_missing",
            Self::NormalizeText => "normalize_text",
            Self::StripMarkup => "strip_markup",
            Self::CoerceNumeric => "coerce_numeric",
            Self::CoerceDatetime => "coerce_datetime",
            Self::DropColumns => "drop_columns",
            Self::RenameColumns => "rename_columns",
        }
    }
}

impl fmt::Display for CleanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded cleaning action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    pub action: CleanAction,
    /// Column the action applied to; `None` for table-wide actions.
    pub column: Option<String>,
    /// Number of rows (or columns, for column-level actions) affected.
    pub affected: usize,
    /// Human-readable description.
    pub message: String,
}

impl AuditEntry {
    pub fn new(
        action: CleanAction,
        column: Option<&str>,
        affected: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            action,
            column: column.map(str::to_string),
            affected,
            message: message.into(),
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.action, self.message)
    }
}

/// Ordered, append-only sequence of audit entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the log as numbered lines, one per entry.
    pub fn summary(&self) -> String {
        if self.entries.is_empty() {
            return "no changes recorded".to_string();
        }
        self.entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| format!("{}. {entry}", idx + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Extend<AuditEntry> for AuditLog {
    fn extend<T: IntoIterator<Item = AuditEntry>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

impl<'a> IntoIterator for &'a AuditLog {
    type Item = &'a AuditEntry;
    type IntoIter = std::slice::Iter<'a, AuditEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
