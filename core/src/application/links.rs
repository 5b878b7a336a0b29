// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Link Registry Service
//!
//! Upserts launch links keyed by canonical container name and reconciles the
//! stored map against live container state on every read. Reconciliation is
//! lazy (triggered by access, not by a background sweep) and writes back
//! only when entries were actually dropped.

use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::domain::container::{ContainerRuntime, GatewayError};
use crate::domain::link::{canonical_name, reconcile, short_id, ContainerLink, LinkMap};
use crate::domain::repository::{LinkRepository, PersistenceError};

#[derive(Debug, Error)]
pub enum LinkError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub struct LinkService {
    runtime: Arc<dyn ContainerRuntime>,
    repository: Arc<dyn LinkRepository>,
}

impl LinkService {
    pub fn new(runtime: Arc<dyn ContainerRuntime>, repository: Arc<dyn LinkRepository>) -> Self {
        Self { runtime, repository }
    }

    /// Upsert the launch link for a container, or delete it when `link` is
    /// absent or empty.
    ///
    /// The key is the container's canonical name resolved via inspect; the
    /// stored entry carries the 12-character short id. The full document is
    /// rewritten on every call (read-modify-write, last writer wins).
    pub async fn set_link(&self, container_id: &str, link: Option<String>) -> Result<(), LinkError> {
        let name = self.runtime.inspect_name(container_id).await?;
        let name = canonical_name(&name).to_string();

        let mut links = self.repository.load().await?;
        match link.filter(|l| !l.is_empty()) {
            Some(link) => {
                info!("Setting launch link for container {}", name);
                links.insert(
                    name,
                    ContainerLink {
                        short_id: short_id(container_id),
                        link,
                    },
                );
            }
            None => {
                info!("Removing launch link for container {}", name);
                links.remove(&name);
            }
        }
        self.repository.store(&links).await?;
        Ok(())
    }

    /// The stored link map, pruned against one live container snapshot.
    ///
    /// Entries whose container vanished are dropped from the returned map and
    /// the pruned document is persisted: a read with a write side effect,
    /// kept explicit via the dirty flag.
    pub async fn links(&self) -> Result<LinkMap, LinkError> {
        let stored = self.repository.load().await?;
        if stored.is_empty() {
            return Ok(stored);
        }

        let live_names: HashSet<String> = self
            .runtime
            .list()
            .await?
            .into_iter()
            .map(|c| canonical_name(&c.name).to_string())
            .collect();

        let result = reconcile(stored, &live_names);
        if result.dirty {
            info!("Pruned stale container links");
            self.repository.store(&result.links).await?;
        }
        Ok(result.links)
    }
}
