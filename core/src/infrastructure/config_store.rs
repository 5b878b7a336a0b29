// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # YAML Document Store
//!
//! Four independent documents under one configurable directory:
//!
//! | Document | Contents |
//! |----------|----------|
//! | `auth.yaml` | user table, seeded with the default admin on first boot |
//! | `session_secret.yaml` | 32 random bytes (hex), generated once |
//! | `container_links.yaml` | container name → `{shortId, link}` |
//! | `website_links.yaml` | bookmark URL → `{title, icon}` |
//!
//! Every access is a whole-document read or write with no locking; the
//! single-operator deployment model accepts lost updates under concurrent
//! writers.

use rand::RngCore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use crate::domain::auth::AuthConfig;
use crate::domain::link::LinkMap;
use crate::domain::repository::{LinkRepository, PersistenceError, WebsiteRepository};
use crate::domain::website::WebsiteMap;

const AUTH_DOC: &str = "auth.yaml";
const SECRET_DOC: &str = "session_secret.yaml";
const CONTAINER_LINKS_DOC: &str = "container_links.yaml";
const WEBSITE_LINKS_DOC: &str = "website_links.yaml";

const SECRET_BYTES: usize = 32;

#[derive(Debug, Default, Serialize, Deserialize)]
struct SecretDocument {
    secret: String,
}

pub struct YamlConfigStore {
    dir: PathBuf,
}

impl YamlConfigStore {
    /// Open the document directory, creating it and any missing documents
    /// with defaults. Failure here is a startup failure.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let store = Self { dir: dir.into() };
        std::fs::create_dir_all(&store.dir)
            .map_err(|e| PersistenceError::Write(store.dir.display().to_string(), e.to_string()))?;
        store.ensure_defaults()?;
        Ok(store)
    }

    fn ensure_defaults(&self) -> Result<(), PersistenceError> {
        if !self.doc_path(AUTH_DOC).exists() {
            self.write_doc(AUTH_DOC, &AuthConfig::default())?;
            info!("Created default user table at {}", self.doc_path(AUTH_DOC).display());
        }
        if !self.doc_path(SECRET_DOC).exists() {
            let mut bytes = [0u8; SECRET_BYTES];
            rand::rng().fill_bytes(&mut bytes);
            self.write_doc(
                SECRET_DOC,
                &SecretDocument {
                    secret: hex::encode(bytes),
                },
            )?;
            info!("Generated session secret at {}", self.doc_path(SECRET_DOC).display());
        }
        if !self.doc_path(CONTAINER_LINKS_DOC).exists() {
            self.write_doc(CONTAINER_LINKS_DOC, &LinkMap::new())?;
        }
        if !self.doc_path(WEBSITE_LINKS_DOC).exists() {
            self.write_doc(WEBSITE_LINKS_DOC, &WebsiteMap::new())?;
        }
        Ok(())
    }

    /// The user table, loaded once at boot and read-only thereafter.
    pub fn auth_config(&self) -> Result<AuthConfig, PersistenceError> {
        self.read_doc(AUTH_DOC)
    }

    /// The persisted token-signing secret. Stable across restarts.
    pub fn session_secret(&self) -> Result<String, PersistenceError> {
        let doc: SecretDocument = self.read_doc(SECRET_DOC)?;
        Ok(doc.secret)
    }

    fn doc_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn read_doc<T>(&self, name: &str) -> Result<T, PersistenceError>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.doc_path(name);
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| PersistenceError::Read(display(&path), e.to_string()))?;
        // An empty document parses as YAML null; treat it as the default.
        let parsed: Option<T> = serde_yaml::from_str(&contents)
            .map_err(|e| PersistenceError::Serialization(display(&path), e.to_string()))?;
        Ok(parsed.unwrap_or_default())
    }

    fn write_doc<T: Serialize>(&self, name: &str, value: &T) -> Result<(), PersistenceError> {
        let path = self.doc_path(name);
        let yaml = serde_yaml::to_string(value)
            .map_err(|e| PersistenceError::Serialization(display(&path), e.to_string()))?;
        std::fs::write(&path, yaml).map_err(|e| PersistenceError::Write(display(&path), e.to_string()))
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

#[async_trait]
impl LinkRepository for YamlConfigStore {
    async fn load(&self) -> Result<LinkMap, PersistenceError> {
        self.read_doc(CONTAINER_LINKS_DOC)
    }

    async fn store(&self, links: &LinkMap) -> Result<(), PersistenceError> {
        self.write_doc(CONTAINER_LINKS_DOC, links)
    }
}

#[async_trait]
impl WebsiteRepository for YamlConfigStore {
    async fn load(&self) -> Result<WebsiteMap, PersistenceError> {
        self.read_doc(WEBSITE_LINKS_DOC)
    }

    async fn store(&self, sites: &WebsiteMap) -> Result<(), PersistenceError> {
        self.write_doc(WEBSITE_LINKS_DOC, sites)
    }
}
