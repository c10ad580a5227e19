//! Export writers: lossless JSON dump, flattened CSV, and a Spanish
//! human-readable summary.
//!
//! The sweep hands records over unconditionally; deciding what to do with
//! zero records is this module's concern (log and write nothing).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

use crate::domain::law_record::LawRecord;

const CSV_COLUMNS: &[&str] = &[
    "search_term_used",
    "found_terms",
    "url",
    "title",
    "law_number",
    "date",
    "status",
    "summary",
    "authors",
    "proponent",
    "committees",
    "period",
    "legislature",
    "content_snippet",
    "year_range",
    "scraped_at",
];

pub struct Exporter {
    output_dir: PathBuf,
}

impl Exporter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Write the three artifacts for one era label. A run that found
    /// nothing logs and returns without touching the disk.
    pub fn save_results(&self, records: &[LawRecord], period_label: &str) -> Result<()> {
        if records.is_empty() {
            info!("no records found for the {period_label} period, nothing to export");
            return Ok(());
        }

        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("failed to create output dir {}", self.output_dir.display())
        })?;

        let json_path = self
            .output_dir
            .join(format!("lgbt_laws_{period_label}_results.json"));
        let json = serde_json::to_string_pretty(records).context("failed to serialize records")?;
        fs::write(&json_path, json)
            .with_context(|| format!("failed to write {}", json_path.display()))?;

        let csv_path = self.output_dir.join(format!("lgbt_laws_{period_label}.csv"));
        fs::write(&csv_path, render_csv(records))
            .with_context(|| format!("failed to write {}", csv_path.display()))?;

        let txt_path = self
            .output_dir
            .join(format!("lgbt_laws_{period_label}_summary.txt"));
        fs::write(&txt_path, render_summary(records, period_label))
            .with_context(|| format!("failed to write {}", txt_path.display()))?;

        info!("results saved:");
        info!("  - {} (detailed)", json_path.display());
        info!("  - {} (spreadsheet)", csv_path.display());
        info!("  - {} (human readable)", txt_path.display());
        Ok(())
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

fn render_csv(records: &[LawRecord]) -> String {
    let mut out = String::new();
    write_row(&mut out, CSV_COLUMNS.iter().map(|c| (*c).to_string()));
    for record in records {
        write_row(&mut out, record_row(record));
    }
    out
}

fn record_row(record: &LawRecord) -> impl Iterator<Item = String> {
    [
        record.search_term_used.clone(),
        record.found_terms.join("; "),
        record.url.clone(),
        record.title.clone(),
        record.law_number.clone(),
        record.date.clone(),
        record.status.clone(),
        record.summary.clone(),
        record.authors.clone(),
        record.proponent.clone(),
        record.committees.join("; "),
        record.period.clone(),
        record.legislature.clone(),
        record.content_snippet.clone(),
        record.year_range.clone(),
        record.scraped_at.clone(),
    ]
    .into_iter()
}

fn write_row(out: &mut String, fields: impl Iterator<Item = String>) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        first = false;
        out.push_str(&csv_field(&field));
    }
    out.push('\n');
}

fn csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn render_summary(records: &[LawRecord], period_label: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "LEYES SOBRE DERECHOS LGBT EN PERÚ - {}\n",
        period_label.to_uppercase()
    ));
    out.push_str(&"=".repeat(50));
    out.push('\n');
    out.push_str(&format!(
        "Búsqueda realizada: {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!(
        "Total de proyectos encontrados: {}\n\n",
        records.len()
    ));

    for (i, law) in records.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} - {}...\n",
            i + 1,
            law.law_number,
            head_chars(&law.title, 80)
        ));
        out.push_str(&format!("   Fecha: {}\n", law.date));
        out.push_str(&format!("   Estado: {}\n", law.status));
        out.push_str(&format!("   Proponente: {}\n", law.proponent));
        if !law.period.is_empty() {
            out.push_str(&format!("   Período: {}\n", law.period));
        }
        if !law.authors.is_empty() {
            out.push_str(&format!("   Autores: {}\n", law.authors));
        }
        out.push_str(&format!("   Término de búsqueda: {}\n", law.search_term_used));
        out.push_str(&format!(
            "   Términos encontrados: {}\n",
            law.found_terms.join(", ")
        ));
        out.push_str(&format!("   URL: {}\n", law.url));
        out.push_str(&format!(
            "   Resumen: {}...\n\n",
            head_chars(&law.summary, 150)
        ));
    }
    out
}

fn head_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
