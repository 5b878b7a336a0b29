// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A container as reported by the runtime. Read-only to this system; always
/// sourced live from the daemon, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSummary {
    pub id: String,
    /// Canonical name, leading `/` stripped.
    pub name: String,
    /// Runtime state string (`running`, `exited`, ...).
    pub status: String,
}

/// Lifecycle action requested against a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerAction {
    Start,
    Stop,
    /// Anything else the client sent. Accepted and ignored; see
    /// [`crate::application::containers::ContainerControlService::control`].
    Other(String),
}

impl From<&str> for ContainerAction {
    fn from(raw: &str) -> Self {
        match raw {
            "start" => Self::Start,
            "stop" => Self::Stop,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Container runtime unavailable: {0}")]
    RuntimeUnavailable(String),
    #[error("Container not found: {0}")]
    NotFound(String),
}

/// Port over the container runtime's management API.
///
/// Implemented by [`crate::infrastructure::docker::DockerGateway`]; tests
/// substitute scripted fakes.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// List all containers, running or not.
    async fn list(&self) -> Result<Vec<ContainerSummary>, GatewayError>;

    /// Start a container. No pre-check: starting an already-running container
    /// surfaces whatever the runtime reports.
    async fn start(&self, id: &str) -> Result<(), GatewayError>;

    /// Stop a container. Same idempotency posture as [`Self::start`].
    async fn stop(&self, id: &str) -> Result<(), GatewayError>;

    /// Resolve a container's canonical name (leading `/` stripped).
    async fn inspect_name(&self, id: &str) -> Result<String, GatewayError>;
}
