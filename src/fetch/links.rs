// src/fetch/links.rs

use std::io::Write;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use tracing::info;

use super::{selector, PageSource};
use crate::config::Config;
use crate::error::{Result, ScrapeError};

/// Item URL embedded in a listing row's click handler.
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"http.*ano=\d*").expect("link pattern should compile"));

/// URL of listing page `page` (1-based).
pub fn listing_page_url(base: &str, page: usize) -> String {
    format!("{base}&pagina={page}")
}

/// Item links on one listing page whose text ends with `year`.
///
/// Only `<tr>` rows carrying an `onclick` attribute are considered; rows whose
/// handler holds no link are ignored. An empty `year` keeps every link.
pub fn extract_links(html: &str, year: &str) -> Result<Vec<String>> {
    let rows = selector("tr[onclick]")?;
    let doc = Html::parse_document(html);
    Ok(doc
        .select(&rows)
        .filter_map(|row| row.value().attr("onclick"))
        .filter_map(|handler| LINK_RE.find(handler))
        .map(|m| m.as_str())
        .filter(|link| link.ends_with(year))
        .map(str::to_owned)
        .collect())
}

/// Walks the listing from page 1, writing each kept link on its own line.
///
/// The portal serves a valid, empty page past the last one, so the walk stops
/// at the first page with no kept links. Returns the number of links written.
pub fn run_links<S, W>(source: &S, config: &Config, out: &mut W) -> Result<usize>
where
    S: PageSource + ?Sized,
    W: Write,
{
    let mut total = 0;
    for page in 1.. {
        let url = listing_page_url(&config.listing_url, page);
        let html = source.fetch(&url)?;
        let links = extract_links(&html, &config.year)?;
        info!(page, found = links.len(), "listing page scraped");
        if links.is_empty() {
            break;
        }
        for link in &links {
            writeln!(out, "{link}").map_err(ScrapeError::Output)?;
        }
        total += links.len();
    }
    out.flush().map_err(ScrapeError::Output)?;
    Ok(total)
}
