//! Project validation for legends.
//!
//! This module provides structural validation of a project, checking for:
//! - Key/id agreement between maps and the entities they hold
//! - Unique note ids across every note tree
//! - Consistent parent links inside note trees
//! - Degenerate calendar definitions
//! - Timestamps that fall outside the active calendar

use std::collections::BTreeMap;
use std::fmt;

use crate::model::{Calendar, Note, Project, Timestamp};

/// The result of validating a project.
#[derive(Clone, Debug, Default)]
pub struct ValidationReport {
    /// All issues found during validation.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Adds an issue to the report.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Returns the number of errors in the report.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Validation passed: no issues found");
        }

        writeln!(
            f,
            "Validation completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single validation issue (error or warning).
#[derive(Clone, Debug)]
pub struct ValidationIssue {
    /// The severity of the issue.
    pub severity: Severity,

    /// A stable code for the issue type.
    pub code: IssueCode,

    /// A human-readable description of the issue.
    pub message: String,

    /// Context about where the issue occurred.
    pub context: IssueContext,
}

impl ValidationIssue {
    /// Creates a new error.
    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            context,
        }
    }

    /// Creates a new warning.
    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            context,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:?}] {:?} ({}): {}",
            self.severity, self.code, self.context, self.message
        )
    }
}

/// Severity of a validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Stable issue codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IssueCode {
    MapElementKeyMismatch,
    NoteKeyMismatch,
    DuplicateNoteId,
    ParentLinkMismatch,
    DanglingParentRef,
    EmptyProjectName,
    EmptyUnitName,
    ZeroLengthUnit,
    LeapUnitMissing,
    TimestampOutOfRange,
}

/// Where an issue occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IssueContext {
    Project,
    MapElement { id: u64 },
    Note { id: u64 },
    Calendar,
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Project => write!(f, "project"),
            IssueContext::MapElement { id } => write!(f, "map element {}", id),
            IssueContext::Note { id } => write!(f, "note {}", id),
            IssueContext::Calendar => write!(f, "calendar"),
        }
    }
}

/// Validates a project and returns a report of all issues found.
pub fn validate_project(project: &Project) -> ValidationReport {
    let mut report = ValidationReport::new();

    if project.name.is_empty() {
        report.add(ValidationIssue::warning(
            IssueCode::EmptyProjectName,
            "Project name is empty",
            IssueContext::Project,
        ));
    }

    validate_calendar(&project.settings.calendar, &mut report);
    validate_map_elements(project, &mut report);
    validate_notes(project, &mut report);

    report
}

fn validate_calendar(calendar: &Calendar, report: &mut ValidationReport) {
    for unit in calendar.chain.iter() {
        if unit.name.is_empty() {
            report.add(ValidationIssue::warning(
                IssueCode::EmptyUnitName,
                "Time unit has an empty name",
                IssueContext::Calendar,
            ));
        }
        if unit.number == 0 {
            report.add(ValidationIssue::error(
                IssueCode::ZeroLengthUnit,
                format!("Time unit '{}' has number 0", unit.name),
                IssueContext::Calendar,
            ));
        }
    }

    if let Some(index) = calendar.leap_unit_index() {
        if calendar.chain.get(index).is_none() {
            report.add(ValidationIssue::error(
                IssueCode::LeapUnitMissing,
                format!("Leap unit index {} is outside the chain", index),
                IssueContext::Calendar,
            ));
        }
    }
}

fn validate_map_elements(project: &Project, report: &mut ValidationReport) {
    for (key, element) in &project.map_elements {
        if *key != element.id() {
            report.add(ValidationIssue::error(
                IssueCode::MapElementKeyMismatch,
                format!("Stored under key {} but has id {}", key, element.id()),
                IssueContext::MapElement { id: element.id() },
            ));
        }
    }
}

fn validate_notes(project: &Project, report: &mut ValidationReport) {
    for (key, note) in &project.notes {
        if *key != note.id {
            report.add(ValidationIssue::error(
                IssueCode::NoteKeyMismatch,
                format!("Stored under key {} but has id {}", key, note.id),
                IssueContext::Note { id: note.id },
            ));
        }
    }

    // Count every id across every tree to catch duplicates the per-tree
    // registries would silently collapse.
    let mut seen: BTreeMap<u64, usize> = BTreeMap::new();
    for note in project.notes.values() {
        count_ids(note, &mut seen);
    }
    for (id, count) in &seen {
        if *count > 1 {
            report.add(ValidationIssue::error(
                IssueCode::DuplicateNoteId,
                format!("Note id {} appears {} times", id, count),
                IssueContext::Note { id: *id },
            ));
        }
    }

    let calendar = &project.settings.calendar;
    for note in project.notes.values() {
        validate_note_tree(note, calendar, report);

        // Root notes may point at a parent in another tree; flag references
        // to ids that exist nowhere in the project.
        if let Some(parent_id) = note.parent_id() {
            if !seen.contains_key(&parent_id) {
                report.add(ValidationIssue::warning(
                    IssueCode::DanglingParentRef,
                    format!("Parent id {} does not exist in this project", parent_id),
                    IssueContext::Note { id: note.id },
                ));
            }
        }
    }
}

fn count_ids(note: &Note, seen: &mut BTreeMap<u64, usize>) {
    *seen.entry(note.id).or_insert(0) += 1;
    for child in &note.children {
        count_ids(child, seen);
    }
}

fn validate_note_tree(note: &Note, calendar: &Calendar, report: &mut ValidationReport) {
    validate_timestamp(&note.timerange.start, calendar, note.id, report);
    validate_timestamp(&note.timerange.end, calendar, note.id, report);

    for child in &note.children {
        if child.parent_id() != Some(note.id) {
            report.add(ValidationIssue::error(
                IssueCode::ParentLinkMismatch,
                format!(
                    "Child {} records parent {:?} but is nested under {}",
                    child.id,
                    child.parent_id(),
                    note.id
                ),
                IssueContext::Note { id: child.id },
            ));
        }
        validate_note_tree(child, calendar, report);
    }
}

fn validate_timestamp(
    timestamp: &Timestamp,
    calendar: &Calendar,
    note_id: u64,
    report: &mut ValidationReport,
) {
    let months = i64::from(calendar.months_per_year());
    if timestamp.month < 1 || timestamp.month > months {
        report.add(ValidationIssue::warning(
            IssueCode::TimestampOutOfRange,
            format!(
                "Month {} is outside 1..={} for the active calendar",
                timestamp.month, months
            ),
            IssueContext::Note { id: note_id },
        ));
        return;
    }

    // Allow the leap slack on top of the named month length.
    let max_day =
        i64::from(calendar.days_in_month(timestamp.month)) + i64::from(calendar.leap_day_amount);
    if timestamp.day < 1 || timestamp.day > max_day {
        report.add(ValidationIssue::warning(
            IssueCode::TimestampOutOfRange,
            format!(
                "Day {} is outside 1..={} for month {}",
                timestamp.day, max_day, timestamp.month
            ),
            IssueContext::Note { id: note_id },
        ));
    }
}
