//! Labeled table-row extraction shared by the Lotus-Notes eras.
//!
//! The visible record tables pair a Spanish label cell with one or more
//! value cells. Labels are matched by substring after lowercasing, so the
//! accent and spacing drift between portal generations doesn't matter.
//! Values never overwrite a field an earlier source already populated.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::text_patterns::{status_keyword, truncate_summary, SEGUIMIENTO_STATUS_KEYWORDS};
use super::{fill, FieldSet};

static ROWS: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("static selector"));
static CELLS: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("static selector"));

// Committee name inside a "seguimiento" tracking cell.
static SEGUIMIENTO_COMMITTEE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)comisión[^\n]*?([A-Za-z][^\n]*?)(?:\n|\r|$)").expect("static pattern")
});

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Scan every table row with at least two cells, treating the first cell as
/// a label and the remaining cells as the value, and fill still-empty
/// fields.
pub fn fill_from_tables(doc: &Html, fields: &mut FieldSet) {
    for row in doc.select(&ROWS) {
        let cells: Vec<ElementRef<'_>> = row.select(&CELLS).collect();
        if cells.len() < 2 {
            continue;
        }

        let label = cell_text(cells[0]).to_lowercase();
        let value = cells[1..]
            .iter()
            .map(|cell| cell_text(*cell))
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();
        if value.is_empty() {
            continue;
        }

        if label.contains("período") || label.contains("periodo") {
            fill(&mut fields.period, || Some(value.clone()));
        } else if label.contains("legislatura") {
            fill(&mut fields.legislature, || Some(value.clone()));
        } else if label.contains("número") {
            fill(&mut fields.law_number, || Some(value.clone()));
        } else if label.contains("fecha presentación") {
            fill(&mut fields.date, || Some(value.clone()));
        } else if label.contains("proponente") {
            fill(&mut fields.proponent, || Some(value.clone()));
        } else if label.contains("título") {
            fill(&mut fields.title, || Some(value.clone()));
        } else if label.contains("sumilla") {
            fill(&mut fields.summary, || Some(truncate_summary(&value)));
        } else if label.contains("autores") {
            fill(&mut fields.authors, || Some(value.clone()));
        } else if label.contains("seguimiento") {
            apply_seguimiento(&value, fields);
        }
    }
}

/// A tracking cell carries both the referral committee and the latest
/// status, buried in free text.
fn apply_seguimiento(value: &str, fields: &mut FieldSet) {
    if fields.committees.is_empty() && value.to_lowercase().contains("comisión") {
        if let Some(captures) = SEGUIMIENTO_COMMITTEE.captures(value) {
            if let Some(committee) = captures.get(1) {
                let committee = committee.as_str().trim();
                if !committee.is_empty() {
                    fields.committees = vec![committee.to_string()];
                }
            }
        }
    }

    fill(&mut fields.status, || {
        status_keyword(value, SEGUIMIENTO_STATUS_KEYWORDS)
    });
}
