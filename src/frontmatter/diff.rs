use super::value::{MetadataRecord, MetadataValue};
use std::fmt::Write;

/// A single field change
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: String,
    pub old_value: String,
    pub new_value: String,
}

/// Compute changes between two frontmatter records.
/// Fields are listed in `new` order, followed by fields `new` dropped.
pub fn compute_changes(old: &MetadataRecord, new: &MetadataRecord) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    for (field, new_value) in new.iter() {
        let old_value = old.get(field);
        if old_value != Some(new_value) {
            changes.push(FieldChange {
                field: field.to_string(),
                old_value: display_value(old_value),
                new_value: display_value(Some(new_value)),
            });
        }
    }

    for (field, old_value) in old.iter() {
        if !new.contains_key(field) {
            changes.push(FieldChange {
                field: field.to_string(),
                old_value: display_value(Some(old_value)),
                new_value: display_value(None),
            });
        }
    }

    changes
}

fn display_value(value: Option<&MetadataValue>) -> String {
    match value {
        None | Some(MetadataValue::Null) => "(empty)".to_string(),
        Some(MetadataValue::Text(s)) if s.is_empty() => "(empty)".to_string(),
        Some(v) => v.to_string(),
    }
}

/// Format changes as a side-by-side diff table
pub fn format_diff(label: &str, changes: &[FieldChange]) -> String {
    if changes.is_empty() {
        return "No changes detected.".to_string();
    }

    let mut output = String::new();

    writeln!(output, "Changes to {}:", label).unwrap();
    writeln!(output).unwrap();

    let field_width = changes
        .iter()
        .map(|c| c.field.chars().count())
        .max()
        .unwrap_or(10)
        .max(10);
    let value_width = 28;

    writeln!(
        output,
        "  {:width$} | {:vw$} | {:vw$}",
        "Field",
        "Current",
        "New",
        width = field_width,
        vw = value_width
    )
    .unwrap();

    writeln!(
        output,
        " {:->width$}-+-{:->vw$}-+-{:->vw$}",
        "",
        "",
        "",
        width = field_width + 1,
        vw = value_width
    )
    .unwrap();

    for change in changes {
        let old_display = truncate_value(&change.old_value, value_width);
        let new_display = truncate_value(&change.new_value, value_width);

        writeln!(
            output,
            "  {:width$} | {:vw$} | {:vw$}",
            change.field,
            old_display,
            new_display,
            width = field_width,
            vw = value_width
        )
        .unwrap();
    }

    output
}

/// Truncate a value to fit in the column width
fn truncate_value(value: &str, max_width: usize) -> String {
    let single_line = value.replace('\n', " ");

    if single_line.chars().count() <= max_width {
        single_line
    } else {
        let truncated: String = single_line.chars().take(max_width - 3).collect();
        format!("{}...", truncated)
    }
}
