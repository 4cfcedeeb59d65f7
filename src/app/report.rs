//! Read-only rendering of accepted records.

use crate::domain::Record;
use crate::error::Result;
use crate::storage::RecordSink;

pub const RULE_WIDTH: usize = 70;
pub const IDENTIFIER_WIDTH: usize = 5;
pub const PRIMARY_WIDTH: usize = 30;
pub const SECONDARY_WIDTH: usize = 22;
pub const NUMERIC_WIDTH: usize = 6;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "..";

/// Shortens `text` to at most `max_width` characters.
///
/// Text longer than `max_width` keeps its first `max_width - 2` characters followed by
/// [`ELLIPSIS`]. Widths are counted in Unicode scalar values; a width too narrow for the
/// marker just cuts the text.
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    if max_width < ELLIPSIS.len() {
        return text.chars().take(max_width).collect();
    }
    let keep = max_width - ELLIPSIS.len();
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Column titles for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingLayout {
    pub identifier: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub numeric: &'static str,
}

impl ListingLayout {
    pub const fn books() -> Self {
        Self {
            identifier: "ID",
            primary: "Title",
            secondary: "Author",
            numeric: "Year",
        }
    }

    pub const fn users() -> Self {
        Self {
            identifier: "ID",
            primary: "Name",
            secondary: "Email",
            numeric: "-",
        }
    }
}

impl Default for ListingLayout {
    fn default() -> Self {
        Self {
            identifier: "ID",
            primary: "Primary",
            secondary: "Secondary",
            numeric: "Value",
        }
    }
}

/// `Total: N records`, or `Showing K of N records` when fewer than `total` are shown.
pub fn summary_line(shown: usize, total: u64) -> String {
    if total > shown as u64 {
        format!("Showing {} of {} records", shown, total)
    } else {
        format!("Total: {} records", total)
    }
}

/// Renders the fixed-width table and its summary line.
///
/// `total` is the true number of stored records; `None` means `records` is complete.
pub fn render_listing(records: &[Record], total: Option<u64>, layout: &ListingLayout) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!(
        "{:<iw$} {:<pw$} {:<sw$} {:<nw$}",
        layout.identifier,
        layout.primary,
        layout.secondary,
        layout.numeric,
        iw = IDENTIFIER_WIDTH,
        pw = PRIMARY_WIDTH,
        sw = SECONDARY_WIDTH,
        nw = NUMERIC_WIDTH,
    ));
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for record in records {
        let numeric = record
            .numeric_attribute
            .map(|n| n.to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "{:<iw$} {:<pw$} {:<sw$} {:<nw$}",
            record.identifier,
            truncate(&record.primary_text, PRIMARY_WIDTH),
            truncate(&record.secondary_text, SECONDARY_WIDTH),
            numeric,
            iw = IDENTIFIER_WIDTH,
            pw = PRIMARY_WIDTH,
            sw = SECONDARY_WIDTH,
            nw = NUMERIC_WIDTH,
        ));
        out.push('\n');
    }

    out.push_str(&rule);
    out.push('\n');
    let total = total.unwrap_or(records.len() as u64);
    out.push_str(&summary_line(records.len(), total));
    out.push('\n');
    out
}

/// Reads back up to `limit` records plus the true total and renders them.
pub async fn listing_from_sink(
    sink: &dyn RecordSink,
    limit: Option<u32>,
    layout: &ListingLayout,
) -> Result<String> {
    let records = sink.fetch_all(limit).await?;
    let total = sink.count().await?;
    Ok(render_listing(&records, Some(total), layout))
}

/// One bar per item, scaled so the largest value spans `width` columns.
///
/// Every label is its first `label_width` characters followed by `...`; a `mean` line
/// is appended when given.
pub fn render_bars(items: &[(String, f64)], mean: Option<f64>, label_width: usize, width: usize) -> String {
    let max = items.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let label_cols = label_width + 3;
    let scale = |v: f64| -> usize {
        if max <= 0.0 || v <= 0.0 {
            0
        } else {
            ((v / max) * width as f64).round() as usize
        }
    };

    let mut out = String::new();
    for (label, value) in items {
        let label = format!("{}...", label.chars().take(label_width).collect::<String>());
        out.push_str(&format!(
            "{:<lw$} |{:<bw$}| {:.2}\n",
            label,
            "#".repeat(scale(*value)),
            value,
            lw = label_cols,
            bw = width,
        ));
    }
    if let Some(mean) = mean {
        let mut marker = " ".repeat(width);
        let at = scale(mean).min(width.saturating_sub(1));
        if width > 0 {
            marker.replace_range(at..at + 1, "^");
        }
        out.push_str(&format!(
            "{:<lw$} |{}| {:.2}\n",
            "Average",
            marker,
            mean,
            lw = label_cols,
        ));
    }
    out
}
