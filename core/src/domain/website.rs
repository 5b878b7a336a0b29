// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Title stored when the fetched page has no usable `<title>`.
pub const DEFAULT_TITLE: &str = "Unknown site";

/// A stored bookmark: display title plus optional favicon URL.
///
/// Doubles as the preview shape returned by `GET /api/website-info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteBookmark {
    pub title: String,
    pub icon: Option<String>,
}

/// The website-link document: bookmark URL → entry. Unlike container links,
/// entries have no liveness constraint and are never pruned.
pub type WebsiteMap = BTreeMap<String, WebsiteBookmark>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch {url}: {reason}")]
    RequestFailed { url: String, reason: String },
}

/// Port for outbound title/favicon discovery.
///
/// Implemented by [`crate::infrastructure::site_fetcher::HttpSiteFetcher`].
#[async_trait]
pub trait SiteMetadataFetcher: Send + Sync {
    /// Fetch the page at `url` and extract `{title, icon}`.
    ///
    /// A page with no title yields [`DEFAULT_TITLE`]; a page with no icon
    /// link yields `icon: None`. Only a failed request is an error.
    async fn fetch_preview(&self, url: &str) -> Result<WebsiteBookmark, FetchError>;
}
