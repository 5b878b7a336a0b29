// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Persistence Ports
//!
//! One repository trait per stored document, interface defined here and
//! implemented in [`crate::infrastructure::config_store`]. Both documents are
//! whole-document read-modify-write: no partial updates, no transactions,
//! last writer wins.

use async_trait::async_trait;

use crate::domain::link::LinkMap;
use crate::domain::website::WebsiteMap;

/// Repository for the container-link document.
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Load the full link map (empty if the document is empty).
    async fn load(&self) -> Result<LinkMap, PersistenceError>;

    /// Replace the full link map.
    async fn store(&self, links: &LinkMap) -> Result<(), PersistenceError>;
}

/// Repository for the website-link document.
#[async_trait]
pub trait WebsiteRepository: Send + Sync {
    /// Load the full bookmark map (empty if the document is empty).
    async fn load(&self) -> Result<WebsiteMap, PersistenceError>;

    /// Replace the full bookmark map.
    async fn store(&self, sites: &WebsiteMap) -> Result<(), PersistenceError>;
}

/// Document store errors.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Failed to read document {0}: {1}")]
    Read(String, String),

    #[error("Failed to write document {0}: {1}")]
    Write(String, String),

    #[error("Malformed document {0}: {1}")]
    Serialization(String, String),
}
