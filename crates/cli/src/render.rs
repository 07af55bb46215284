//! Result rendering for the terminal and for machine consumers.

use std::fmt::{self, Write};

use chrono::DateTime;
use serde::Serialize;

use seeker_core::{detail_url, Enrichment, PipelineReport, Record, Verification};

const BYTES_PER_GB: f64 = 1_073_741_824.0;

/// Size in gigabytes with two decimals.
pub fn format_size(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / BYTES_PER_GB)
}

/// Upload time as a UTC timestamp. Out-of-range values are shown raw.
pub fn format_added(added: i64) -> String {
    match DateTime::from_timestamp(added, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => added.to_string(),
    }
}

fn render_record(
    out: &mut String,
    record: &Record,
    site_url: &str,
    enrichment: &Enrichment,
) -> fmt::Result {
    writeln!(out, "{}", record.name)?;
    writeln!(out, "Uploaded by: {}", record.username)?;
    writeln!(out, "User status: {}", record.status)?;
    writeln!(out, "File size: {}", format_size(record.size))?;
    writeln!(out, "Uploaded: {}", format_added(record.added))?;
    writeln!(out, "Number of seeders: {}", record.seeders)?;
    writeln!(out, "Hash: {}", record.info_hash)?;
    writeln!(out, "Site URL: {}", detail_url(site_url, &record.id))?;

    match enrichment {
        Enrichment::Links(links) => {
            writeln!(out, "Relevant links:")?;
            for link in links {
                writeln!(out, "{}", link)?;
            }
        }
        Enrichment::Failed(reason) => {
            writeln!(out, "Relevant links unavailable: {}", reason)?;
        }
        Enrichment::Skipped => {}
    }
    writeln!(out)
}

fn write_text(
    out: &mut String,
    report: &PipelineReport,
    site_url: &str,
    enrichments: &[Enrichment],
) -> fmt::Result {
    if let Some(notice) = report.results.verification().notice() {
        writeln!(out, "NOTICE: {}\n", notice)?;
    }

    writeln!(
        out,
        "{} results ({} found, {} unique, {} dead removed)\n",
        report.results.len(),
        report.collected,
        report.unique,
        report.dead_dropped()
    )?;

    for (record, enrichment) in report
        .results
        .records()
        .iter()
        .zip(enrichments.iter().chain(std::iter::repeat(&Enrichment::Skipped)))
    {
        render_record(out, record, site_url, enrichment)?;
    }
    Ok(())
}

/// Human-readable listing, one block per record in display order.
pub fn render_text(report: &PipelineReport, site_url: &str, enrichments: &[Enrichment]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_text(&mut out, report, site_url, enrichments);
    out
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    #[serde(flatten)]
    record: &'a Record,
    url: String,
    enrichment: &'a Enrichment,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    verification: &'a Verification,
    order: Option<&'static str>,
    collected: usize,
    unique: usize,
    rejected: usize,
    dead_dropped: usize,
    failed_terms: Vec<&'a str>,
    records: Vec<JsonRecord<'a>>,
}

/// Pretty-printed JSON document of the whole report.
pub fn render_json(
    report: &PipelineReport,
    site_url: &str,
    enrichments: &[Enrichment],
) -> serde_json::Result<String> {
    let records = report
        .results
        .records()
        .iter()
        .zip(enrichments.iter().chain(std::iter::repeat(&Enrichment::Skipped)))
        .map(|(record, enrichment)| JsonRecord {
            record,
            url: detail_url(site_url, &record.id),
            enrichment,
        })
        .collect();

    let doc = JsonReport {
        verification: report.results.verification(),
        order: report.results.order().map(|key| key.as_str()),
        collected: report.collected,
        unique: report.unique,
        rejected: report.rejected,
        dead_dropped: report.dead_dropped(),
        failed_terms: report.term_errors.iter().map(|e| e.term.as_str()).collect(),
        records,
    };

    serde_json::to_string_pretty(&doc)
}
