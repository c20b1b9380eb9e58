//! Flattened export of a workspace for downstream consumption.
//!
//! Every item becomes one row carrying its full coordinate (subject, level,
//! set, page, stack position), content fields, and computed segment lists.
//! Rows serialize to a versioned JSON document or to CSV.

use serde::Serialize;

use crate::{
    domain::{ActivityType, DataUnit},
    segment,
    storage::Workspace,
};

/// One exported item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// Subject name (`hanja`, `chinese`, `japanese`).
    pub subject: String,
    /// Level string (e.g. `2A`).
    pub level: String,
    /// Set number, zero-padded to the configured width.
    pub set: String,
    /// Page number.
    pub page: usize,
    /// 1-based stack position on the page.
    pub stack: usize,
    /// The stack's activity type.
    pub activity: ActivityType,
    /// 1-based item position within the stack.
    pub item: usize,
    /// The item's granularity.
    pub data_unit: DataUnit,
    /// The primary text.
    pub text: String,
    /// The secondary annotation, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_text: Option<String>,
    /// The translation.
    pub translation: String,
    /// Segments of the primary text.
    pub segments: Vec<String>,
    /// Segments of the secondary text, placeholders included.
    pub sub_segments: Vec<String>,
    /// Resolved audio file name (through the pool link, when linked).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    /// Resolved image file name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Whether the item mirrors a pool entry.
    pub linked: bool,
    /// Whether the segment counts disagree.
    pub mismatched: bool,
}

/// Flatten the workspace into export rows, in locator order.
#[must_use]
pub fn rows(workspace: &Workspace) -> Vec<Row> {
    let digits = workspace.config().set_digits();
    let mut rows = Vec::new();

    for (locator, page) in workspace.pages() {
        for (stack_position, stack) in page.stacks().iter().enumerate() {
            for (item_position, resource) in stack.items().iter().enumerate() {
                rows.push(Row {
                    subject: locator.subject().as_str().to_string(),
                    level: locator.level().as_str().to_string(),
                    set: format!("{:0width$}", locator.set(), width = digits),
                    page: locator.page().get(),
                    stack: stack_position + 1,
                    activity: stack.activity(),
                    item: item_position + 1,
                    data_unit: resource.data_unit(),
                    text: resource.text().to_string(),
                    sub_text: resource.sub_text().map(ToString::to_string),
                    translation: resource.translation().to_string(),
                    segments: segment::split(resource.text())
                        .into_iter()
                        .map(ToString::to_string)
                        .collect(),
                    sub_segments: segment::split_preserving(resource.sub_text().unwrap_or(""))
                        .into_iter()
                        .map(ToString::to_string)
                        .collect(),
                    audio: workspace.resolved_audio(resource).map(ToString::to_string),
                    image: workspace.resolved_image(resource).map(ToString::to_string),
                    linked: resource.is_linked(),
                    mismatched: resource.is_mismatched(),
                });
            }
        }
    }

    rows
}

/// Serialize rows as a versioned, pretty-printed JSON document.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(rows: &[Row]) -> Result<String, serde_json::Error> {
    let document = serde_json::json!({
        "_version": "1",
        "rows": rows,
    });
    serde_json::to_string_pretty(&document)
}

const CSV_HEADER: &str = "subject,level,set,page,stack,activity,item,data_unit,text,sub_text,\
                          translation,segments,sub_segments,audio,image,linked,mismatched";

/// Serialize rows as CSV with a header line.
///
/// Segment lists are joined with `/`. Fields are quoted when they contain a
/// comma, quote, or newline; quotes are doubled.
#[must_use]
pub fn to_csv(rows: &[Row]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for row in rows {
        let fields = [
            row.subject.clone(),
            row.level.clone(),
            row.set.clone(),
            row.page.to_string(),
            row.stack.to_string(),
            row.activity.to_string(),
            row.item.to_string(),
            row.data_unit.to_string(),
            row.text.clone(),
            row.sub_text.clone().unwrap_or_default(),
            row.translation.clone(),
            row.segments.join("/"),
            row.sub_segments.join("/"),
            row.audio.clone().unwrap_or_default(),
            row.image.clone().unwrap_or_default(),
            row.linked.to_string(),
            row.mismatched.to_string(),
        ];
        let line: Vec<String> = fields.iter().map(|field| escape_csv_field(field)).collect();
        lines.push(line.join(","));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn escape_csv_field(field: &str) -> String {
    let escaped = field.replace('"', "\"\"");
    if escaped.contains(',') || escaped.contains('\n') || escaped.contains('"') {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}
