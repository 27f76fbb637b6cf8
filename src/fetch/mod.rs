// src/fetch/mod.rs

use reqwest::blocking::Client;
use reqwest::StatusCode;
use scraper::Selector;
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, ScrapeError};

pub mod links;

/// Anything that can turn a URL into an HTML body.
pub trait PageSource {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Plain blocking HTTP GET, no retries.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(config: &Config) -> Result<Self> {
        // `timeout(None)` lifts the blocking client's 30s default.
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .cookie_store(true)
            .build()
            .map_err(ScrapeError::Client)?;
        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    fn fetch(&self, url: &str) -> Result<String> {
        debug!(%url, "GET");
        let transport = |source| ScrapeError::Transport {
            url: url.to_string(),
            source,
        };

        let resp = self.client.get(url).send().map_err(transport)?;
        // The portal answers missing pages with an empty 200, so anything
        // else is a real failure.
        if resp.status() != StatusCode::OK {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: resp.status(),
            });
        }
        resp.text().map_err(transport)
    }
}

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css.to_string(),
        reason: format!("{e:?}"),
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// Serves canned bodies; unknown URLs answer 404.
    #[derive(Default)]
    pub struct StaticSource {
        pages: HashMap<String, String>,
        pub requested: RefCell<Vec<String>>,
    }

    impl StaticSource {
        pub fn with(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }
    }

    impl PageSource for StaticSource {
        fn fetch(&self, url: &str) -> Result<String> {
            self.requested.borrow_mut().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| ScrapeError::Status {
                    url: url.to_string(),
                    status: StatusCode::NOT_FOUND,
                })
        }
    }
}
