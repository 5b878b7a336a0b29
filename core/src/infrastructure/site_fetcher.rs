// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Outbound title/favicon discovery for website bookmarks.
//!
//! One GET with a bounded timeout, then a single HTML parse. The favicon is
//! taken from the first `<link rel="icon">` or `<link rel="shortcut icon">`
//! and resolved against the final page URL, so redirects and relative hrefs
//! both come out absolute.

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

use crate::domain::website::{FetchError, SiteMetadataFetcher, WebsiteBookmark, DEFAULT_TITLE};

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpSiteFetcher {
    client: reqwest::Client,
}

impl HttpSiteFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| FetchError::RequestFailed {
                url: String::new(),
                reason: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SiteMetadataFetcher for HttpSiteFetcher {
    async fn fetch_preview(&self, url: &str) -> Result<WebsiteBookmark, FetchError> {
        let failed = |reason: String| FetchError::RequestFailed {
            url: url.to_string(),
            reason,
        };

        let response = self.client.get(url).send().await.map_err(|e| failed(e.to_string()))?;
        let final_url = response.url().clone();
        let body = response.text().await.map_err(|e| failed(e.to_string()))?;
        Ok(extract_preview(&body, &final_url))
    }
}

/// Pull `{title, icon}` out of a fetched page.
fn extract_preview(html: &str, base: &Url) -> WebsiteBookmark {
    let document = Html::parse_document(html);

    let title_selector = Selector::parse("title").unwrap();
    let icon_selector = Selector::parse(r#"link[rel="icon"], link[rel="shortcut icon"]"#).unwrap();

    let title = document
        .select(&title_selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let icon = document
        .select(&icon_selector)
        .filter_map(|el| el.value().attr("href"))
        .find_map(|href| base.join(href).ok())
        .map(|resolved| resolved.to_string());

    WebsiteBookmark { title, icon }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/docs/").unwrap()
    }

    #[test]
    fn test_extracts_title_and_relative_icon() {
        let html = r#"<html><head>
            <title>Example Docs</title>
            <link rel="icon" href="/favicon.ico">
        </head><body></body></html>"#;
        let preview = extract_preview(html, &base());
        assert_eq!(preview.title, "Example Docs");
        assert_eq!(preview.icon.as_deref(), Some("https://example.com/favicon.ico"));
    }

    #[test]
    fn test_missing_title_falls_back_to_default() {
        let preview = extract_preview("<html><head></head></html>", &base());
        assert_eq!(preview.title, DEFAULT_TITLE);
        assert_eq!(preview.icon, None);
    }

    #[test]
    fn test_whitespace_only_title_falls_back_to_default() {
        let preview = extract_preview("<html><head><title>  </title></head></html>", &base());
        assert_eq!(preview.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_shortcut_icon_rel_is_honored() {
        let html = r#"<head><link rel="shortcut icon" href="fav.png"></head>"#;
        let preview = extract_preview(html, &base());
        assert_eq!(preview.icon.as_deref(), Some("https://example.com/docs/fav.png"));
    }

    #[test]
    fn test_absolute_icon_href_is_kept() {
        let html = r#"<head><link rel="icon" href="https://cdn.example.net/i.ico"></head>"#;
        let preview = extract_preview(html, &base());
        assert_eq!(preview.icon.as_deref(), Some("https://cdn.example.net/i.ico"));
    }

    #[test]
    fn test_title_text_is_trimmed() {
        let html = "<head><title>\n   My Site \n</title></head>";
        let preview = extract_preview(html, &base());
        assert_eq!(preview.title, "My Site");
    }

    #[tokio::test]
    async fn test_fetch_preview_against_mock_server() {
        let mut server = mockito::Server::new_async().await;
        let page = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(r#"<html><head><title>Mock Home</title><link rel="icon" href="/icon.png"></head></html>"#)
            .create_async()
            .await;

        let fetcher = HttpSiteFetcher::new().unwrap();
        let preview = fetcher.fetch_preview(&server.url()).await.unwrap();
        assert_eq!(preview.title, "Mock Home");
        assert_eq!(preview.icon, Some(format!("{}/icon.png", server.url())));
        page.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_preview_surfaces_connection_failure() {
        let fetcher = HttpSiteFetcher::new().unwrap();
        // Port 9 (discard) is a safe dead endpoint.
        let result = fetcher.fetch_preview("http://127.0.0.1:9/").await;
        assert!(matches!(result, Err(FetchError::RequestFailed { .. })));
    }
}
