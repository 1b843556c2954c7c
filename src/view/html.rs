//! Static HTML rendering of a [`Listing`].
//!
//! Row actions are emitted as `data-*` attributes on buttons. Every embedded
//! value passes through [`escape`], which replaces all occurrences of the five
//! markup-significant characters.

use super::{Listing, Row, RowAction};
use std::fmt::Write;

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_html(listing: &Listing) -> String {
    let mut out = String::new();
    match listing {
        Listing::Placeholder(message) => {
            let _ = writeln!(out, "<p class=\"no-results\">{}</p>", escape(message));
        }
        Listing::Rows(rows) => {
            out.push_str("<ul class=\"movie-list\">\n");
            for row in rows {
                write_row(&mut out, row);
            }
            out.push_str("</ul>\n");
        }
    }
    out
}

// Writing into a String cannot fail, so the fmt::Result values are dropped.
fn write_row(out: &mut String, row: &Row) {
    let id = escape(&row.id.to_string());
    let _ = writeln!(out, "  <li class=\"movie-row\" data-id=\"{}\">", id);
    let _ = writeln!(
        out,
        "    <span class=\"title\">{}</span> (<span class=\"year\">{}</span>) <span class=\"genre\">{}</span>",
        escape(&row.title),
        row.year,
        escape(&row.genre)
    );
    write_action(out, &row.edit);
    write_action(out, &row.delete);
    out.push_str("  </li>\n");
}

fn write_action(out: &mut String, action: &RowAction) {
    match action {
        RowAction::Edit { id, draft } => {
            let _ = writeln!(
                out,
                "    <button type=\"button\" data-action=\"edit\" data-id=\"{}\" data-title=\"{}\" data-genre=\"{}\" data-year=\"{}\">Edit</button>",
                escape(&id.to_string()),
                escape(&draft.title),
                escape(&draft.genre),
                draft.year
            );
        }
        RowAction::Delete { id } => {
            let _ = writeln!(
                out,
                "    <button type=\"button\" data-action=\"delete\" data-id=\"{}\">Delete</button>",
                escape(&id.to_string())
            );
        }
    }
}
