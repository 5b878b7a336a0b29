// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::domain::repository::{PersistenceError, WebsiteRepository};
use crate::domain::website::{FetchError, SiteMetadataFetcher, WebsiteBookmark, WebsiteMap};

#[derive(Debug, Error)]
pub enum WebsiteError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("No bookmark stored for {0}")]
    NotFound(String),
}

/// Bookmark registry. Entries have no liveness constraint: a stored URL stays
/// stored whether or not the target is reachable.
pub struct WebsiteService {
    repository: Arc<dyn WebsiteRepository>,
    fetcher: Arc<dyn SiteMetadataFetcher>,
}

impl WebsiteService {
    pub fn new(repository: Arc<dyn WebsiteRepository>, fetcher: Arc<dyn SiteMetadataFetcher>) -> Self {
        Self { repository, fetcher }
    }

    /// Store a bookmark under `url`.
    ///
    /// When the caller supplies a title the entry is stored as given;
    /// otherwise the target page is fetched and `{title, icon}` extracted
    /// from its HTML. A failed fetch surfaces as [`WebsiteError::Fetch`] and
    /// nothing is stored.
    pub async fn add_website(
        &self,
        url: &str,
        title: Option<String>,
        icon: Option<String>,
    ) -> Result<WebsiteBookmark, WebsiteError> {
        let bookmark = match title {
            Some(title) => WebsiteBookmark { title, icon },
            None => self.fetcher.fetch_preview(url).await?,
        };

        let mut sites = self.repository.load().await?;
        sites.insert(url.to_string(), bookmark.clone());
        self.repository.store(&sites).await?;
        info!("Stored bookmark for {}", url);
        Ok(bookmark)
    }

    /// Fetch `{title, icon}` for a URL without persisting anything.
    pub async fn preview(&self, url: &str) -> Result<WebsiteBookmark, WebsiteError> {
        Ok(self.fetcher.fetch_preview(url).await?)
    }

    pub async fn delete_website(&self, url: &str) -> Result<(), WebsiteError> {
        let mut sites = self.repository.load().await?;
        if sites.remove(url).is_none() {
            return Err(WebsiteError::NotFound(url.to_string()));
        }
        self.repository.store(&sites).await?;
        info!("Removed bookmark for {}", url);
        Ok(())
    }

    pub async fn list_websites(&self) -> Result<WebsiteMap, WebsiteError> {
        Ok(self.repository.load().await?)
    }
}
