// src/error.rs
use thiserror::Error;

/// Everything that can go wrong while scraping the payroll portal.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Connection, DNS or body-read failure.
    #[error("GET {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("building HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The server answered with something other than 200 OK.
    #[error("GET {url}: invalid status code {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid CSS selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    #[error("invalid base URL {url:?}: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A table row whose value does not have the expected shape.
    #[error("malformed {label:?} value: {value:?}")]
    MalformedField { label: String, value: String },

    #[error("reading standard input: {0}")]
    Input(#[source] std::io::Error),

    #[error("writing standard output: {0}")]
    Output(#[source] std::io::Error),

    #[error("writing CSV: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;
