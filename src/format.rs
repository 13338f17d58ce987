//! Format run reports and group listings as text or JSON.

use crate::error::ApiError;
use crate::run::{FileStatus, RunReport};
use crate::tree::GroupIndex;
use crate::writer::OutputMode;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// One directory of the group listing
#[derive(Debug, Clone, Serialize)]
pub struct GroupEntry {
    pub label: String,
    pub tag: String,
    pub depth: usize,
    pub workouts: usize,
}

/// Every indexed directory in walk order
pub fn group_entries(index: &GroupIndex) -> Vec<GroupEntry> {
    index
        .entries()
        .map(|(id, node)| GroupEntry {
            label: node.label.clone(),
            tag: index.chain_of(id).to_string(),
            depth: node.depth,
            workouts: node.workout_count,
        })
        .collect()
}

/// Format the group listing as human-readable text.
pub fn format_groups_text(index: &GroupIndex) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Groups")));
    out.push_str(&format!("  Root: {}\n\n", index.root().display()));

    let entries = group_entries(index);
    if entries.is_empty() {
        out.push_str("No directories found.\n");
        return out;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Tag", "Directory", "Workouts"]);
    for entry in &entries {
        let indent = "  ".repeat(entry.depth);
        table.add_row(vec![
            entry.tag.clone(),
            format!("{}{}", indent, entry.label),
            entry.workouts.to_string(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));

    let root_files = index.files().iter().filter(|f| f.parent.is_none()).count();
    out.push_str(&format!(
        "Total: {} directories, {} workouts ({} untagged at root).\n",
        entries.len(),
        index.files().len(),
        root_files
    ));
    if !index.skipped().is_empty() {
        out.push_str(&format!("Unreadable paths: {}\n", index.skipped().len()));
    }
    out
}

/// Format the group listing as JSON.
pub fn format_groups_json(index: &GroupIndex) -> Result<String, ApiError> {
    let value = serde_json::json!({
        "root": index.root(),
        "groups": group_entries(index),
        "workouts": index.files().len(),
        "skipped_paths": index
            .skipped()
            .iter()
            .map(|e| e.path().to_path_buf())
            .collect::<Vec<_>>(),
    });
    serde_json::to_string_pretty(&value)
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize groups: {}", e)))
}

/// Format a run report as human-readable text.
pub fn format_run_report_text(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Tag Run")));
    out.push_str(&format!("  Root: {}\n", report.root.display()));
    let output = match &report.output {
        OutputMode::InPlace => "in place".to_string(),
        OutputMode::Mirror(dir) => dir.display().to_string(),
    };
    out.push_str(&format!("  Output: {}\n", output));
    if report.dry_run {
        out.push_str("  Dry run: nothing was written\n");
    }
    out.push_str(&format!(
        "  Tagged: {}, unchanged: {}, skipped: {}\n\n",
        report.count(FileStatus::Tagged),
        report.count(FileStatus::Unchanged),
        report.count(FileStatus::Skipped)
    ));

    if report.failures().next().is_some() {
        out.push_str(&format!("{}\n\n", format_section_heading("Skipped files")));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Path", "Kind", "Reason"]);
        for row in report.failures() {
            let (kind, reason) = row
                .failure
                .as_ref()
                .map(|f| (f.kind.to_string(), f.reason.clone()))
                .unwrap_or_else(|| ("-".to_string(), "-".to_string()));
            table.add_row(vec![row.path.display().to_string(), kind, reason]);
        }
        out.push_str(&format!("{}\n\n", table));
    }

    if !report.skipped_paths.is_empty() {
        out.push_str(&format!("{}\n\n", format_section_heading("Unreadable paths")));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Path", "Reason"]);
        for row in &report.skipped_paths {
            table.add_row(vec![
                row.path.display().to_string(),
                row.failure.reason.clone(),
            ]);
        }
        out.push_str(&format!("{}\n\n", table));
    }

    out.push_str(&format!(
        "Processed {} groups, {} files.\n",
        report.groups,
        report.processed_count()
    ));
    out
}

/// Format a run report as JSON.
pub fn format_run_report_json(report: &RunReport) -> Result<String, ApiError> {
    serde_json::to_string_pretty(report)
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize report: {}", e)))
}
