// src/process/mod.rs

pub mod normalize;
pub mod record;

use std::io::{BufRead, Write};

use tracing::{error, info, warn};

use crate::config::{Config, FailurePolicy};
use crate::error::{Result, ScrapeError};
use crate::fetch::PageSource;
pub use record::{parse_record, PayrollRecord, HEADER};

/// Outcome of a record extraction run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RecordSummary {
    pub written: usize,
    pub skipped: usize,
}

/// Fetches and parses one payroll item page.
pub fn fetch_record<S>(source: &S, url: &str) -> Result<PayrollRecord>
where
    S: PageSource + ?Sized,
{
    let html = source.fetch(url)?;
    parse_record(&html)
}

/// Reads item URLs (one per line) from `input` and writes the header plus one
/// CSV row per URL to `out`.
///
/// Rows are held in memory until the last URL is done; a failing run writes
/// nothing to `out`.
pub fn run_records<S, R, W>(
    source: &S,
    input: R,
    mut out: W,
    config: &Config,
) -> Result<RecordSummary>
where
    S: PageSource + ?Sized,
    R: BufRead,
    W: Write,
{
    // Rows are positional and may be narrower or wider than the header.
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());
    writer.write_record(HEADER)?;

    let mut summary = RecordSummary::default();
    for line in input.lines() {
        let line = line.map_err(ScrapeError::Input)?;
        let url = line.trim();
        if url.is_empty() {
            continue;
        }

        let record = match fetch_record(source, url) {
            Ok(record) => record,
            Err(e) if config.on_failure == FailurePolicy::Skip => {
                error!(%url, error = %e, "skipping page");
                summary.skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        if record.len() != HEADER.len() {
            warn!(
                %url,
                fields = record.len(),
                expected = HEADER.len(),
                "record width differs from header"
            );
        }
        writer.write_record(record.as_slice())?;
        summary.written += 1;
    }

    let rows = writer
        .into_inner()
        .map_err(|e| ScrapeError::Output(e.into_error()))?;
    out.write_all(&rows).map_err(ScrapeError::Output)?;
    out.flush().map_err(ScrapeError::Output)?;
    info!(written = summary.written, skipped = summary.skipped, "records done");
    Ok(summary)
}
