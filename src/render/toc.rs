//! Plain-text table of contents.

use crate::model::OutlineResult;

/// Render an outline as an indented table of contents.
///
/// ```text
/// Annual Report
///
/// Goals .......... 1
///   Mission ...... 2
/// ```
pub fn to_toc(result: &OutlineResult) -> String {
    let rows: Vec<(String, String)> = result
        .outline
        .iter()
        .map(|e| {
            let indent = "  ".repeat(e.level.depth() - 1);
            (format!("{}{}", indent, e.text), e.page.to_string())
        })
        .collect();

    // Pad with dots so page numbers line up
    let width = rows
        .iter()
        .map(|(label, page)| label.chars().count() + page.len())
        .max()
        .unwrap_or(0)
        + 4;

    let mut out = String::new();
    if !result.title.is_empty() {
        out.push_str(&result.title);
        out.push_str("\n\n");
    }
    for (label, page) in rows {
        let dots = width - label.chars().count() - page.len();
        out.push_str(&format!("{} {} {}\n", label, ".".repeat(dots - 2), page));
    }
    out
}
