// src/config.rs

use std::time::Duration;

use url::Url;

use crate::error::{Result, ScrapeError};

/// Listing page of the council's salary disclosure portal. Pages are
/// addressed by appending `&pagina=<N>`.
pub const DEFAULT_LISTING_URL: &str =
    "https://www.camarademaceio.al.gov.br/transparencia/portal/salarios-subsidiosx";

pub const DEFAULT_USER_AGENT: &str = concat!("payscraper/", env!("CARGO_PKG_VERSION"));

/// What a run does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Walk the listing and print item links.
    ExtractLinks,
    /// Read item links from stdin and write CSV records.
    ProcessLinks,
}

/// How record extraction reacts to a page that fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// First failing page aborts the whole run.
    #[default]
    Abort,
    /// Log the failure and continue with the next URL.
    Skip,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    /// Suffix every kept link must end with. Empty keeps them all.
    pub year: String,
    pub listing_url: String,
    pub user_agent: String,
    /// `None` means requests may block forever.
    pub timeout: Option<Duration>,
    pub on_failure: FailurePolicy,
}

impl Config {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            year: String::new(),
            listing_url: DEFAULT_LISTING_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            on_failure: FailurePolicy::default(),
        }
    }

    /// Rejects a listing URL that is not absolute.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.listing_url).map_err(|source| ScrapeError::BaseUrl {
            url: self.listing_url.clone(),
            source,
        })?;
        Ok(())
    }
}
