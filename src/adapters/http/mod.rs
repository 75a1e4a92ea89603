//! HTTP catalog client
//!
//! Implements the `Catalog` port with plain GETs against the catalog base
//! URL:
//!
//! ```text
//! <base>/metadata/<name>.json
//! <base>/scripts/<name>.py
//! <base>/categories.json
//! ```

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::config::Config;
use crate::core::models::Metadata;
use crate::core::ports::{Catalog, CategoryIndex};
use crate::error::CatalogError;

/// Catalog served over HTTP
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    base_url: String,
    client: Client,
}

impl HttpCatalog {
    /// Create a client for `base_url` with a request timeout
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("pyscript/{}", crate::VERSION))
            .build()
            .map_err(|e| CatalogError::Transport {
                url: base_url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { base_url, client })
    }

    /// Create a client from the user configuration
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Transport`] if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, CatalogError> {
        Self::new(config.catalog_url(), Duration::from_secs(config.catalog.timeout_secs))
    }

    /// Base URL without trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// GET `path` as text, retrying a transport failure once
    fn get_text(&self, path: &str, what: &str) -> Result<String, CatalogError> {
        let url = self.url(path);
        match self.try_get(&url, what) {
            Err(CatalogError::Transport { message, .. }) => {
                log::warn!("request to {url} failed ({message}), retrying");
                self.try_get(&url, what)
            },
            other => other,
        }
    }

    fn try_get(&self, url: &str, what: &str) -> Result<String, CatalogError> {
        log::debug!("GET {url}");
        let transport = |e: reqwest::Error| CatalogError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().map_err(transport)?;
        let status = response.status();
        log::debug!("{status} {url}");

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            return Err(CatalogError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        response.text().map_err(transport)
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        what: &str,
    ) -> Result<T, CatalogError> {
        let body = self.get_text(path, what)?;
        serde_json::from_str(&body).map_err(|e| CatalogError::Parse {
            url: self.url(path),
            message: e.to_string(),
        })
    }
}

impl Catalog for HttpCatalog {
    fn fetch_metadata(&self, name: &str) -> Result<Metadata, CatalogError> {
        self.get_json(&format!("metadata/{name}.json"), &format!("metadata for '{name}'"))
    }

    fn fetch_script(&self, name: &str) -> Result<String, CatalogError> {
        self.get_text(&format!("scripts/{name}.py"), &format!("script '{name}'"))
    }

    fn fetch_categories(&self) -> Result<CategoryIndex, CatalogError> {
        self.get_json("categories.json", "category index")
    }
}
