// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use bollard::container::{InspectContainerOptions, ListContainersOptions, StartContainerOptions, StopContainerOptions};
use bollard::Docker;
use tracing::info;

use crate::domain::container::{ContainerRuntime, ContainerSummary, GatewayError};
use crate::domain::link::canonical_name;

/// Ceiling on any single daemon call, in seconds.
const DAEMON_TIMEOUT_SECS: u64 = 30;

/// Docker-backed implementation of the container runtime port.
pub struct DockerGateway {
    docker: Docker,
}

impl DockerGateway {
    /// Connect to the Docker daemon (custom socket path or auto-detect).
    pub fn new(socket_path: Option<String>) -> Result<Self, GatewayError> {
        let docker = if let Some(path) = socket_path {
            #[cfg(unix)]
            let result = Docker::connect_with_unix(&path, DAEMON_TIMEOUT_SECS, bollard::API_DEFAULT_VERSION);

            #[cfg(windows)]
            let result = Docker::connect_with_named_pipe(&path, DAEMON_TIMEOUT_SECS, bollard::API_DEFAULT_VERSION);

            result.map_err(|e| {
                GatewayError::RuntimeUnavailable(format!(
                    "Failed to connect to Docker at {}: {}. \
                     Ensure Docker is running and the socket path is correct.",
                    path, e
                ))
            })?
        } else {
            Docker::connect_with_local_defaults().map_err(|e| {
                GatewayError::RuntimeUnavailable(format!(
                    "Failed to connect to Docker: {}. \
                     Check that the daemon is running (docker ps) and that the \
                     current user can access the Docker socket.",
                    e
                ))
            })?
        };

        Ok(Self { docker })
    }

    /// Verify the Docker daemon is accessible.
    pub async fn healthcheck(&self) -> Result<(), GatewayError> {
        self.docker
            .ping()
            .await
            .map_err(|e| GatewayError::RuntimeUnavailable(format!("Docker healthcheck failed: {}", e)))?;
        info!("Docker daemon reachable");
        Ok(())
    }

    fn map_error(e: bollard::errors::Error) -> GatewayError {
        match e {
            bollard::errors::Error::DockerResponseServerError {
                status_code: 404,
                message,
            } => GatewayError::NotFound(message),
            other => GatewayError::RuntimeUnavailable(other.to_string()),
        }
    }
}

#[async_trait]
impl ContainerRuntime for DockerGateway {
    async fn list(&self) -> Result<Vec<ContainerSummary>, GatewayError> {
        let containers = self
            .docker
            .list_containers(Some(ListContainersOptions::<String> {
                all: true,
                ..Default::default()
            }))
            .await
            .map_err(Self::map_error)?;

        Ok(containers
            .into_iter()
            .map(|c| ContainerSummary {
                id: c.id.unwrap_or_default(),
                name: c
                    .names
                    .as_ref()
                    .and_then(|names| names.first())
                    .map(|name| canonical_name(name).to_string())
                    .unwrap_or_default(),
                status: c.state.unwrap_or_default(),
            })
            .collect())
    }

    async fn start(&self, id: &str) -> Result<(), GatewayError> {
        self.docker
            .start_container(id, None::<StartContainerOptions<String>>)
            .await
            .map_err(Self::map_error)
    }

    async fn stop(&self, id: &str) -> Result<(), GatewayError> {
        self.docker
            .stop_container(id, None::<StopContainerOptions>)
            .await
            .map_err(Self::map_error)
    }

    async fn inspect_name(&self, id: &str) -> Result<String, GatewayError> {
        let inspect = self
            .docker
            .inspect_container(id, None::<InspectContainerOptions>)
            .await
            .map_err(Self::map_error)?;

        Ok(inspect
            .name
            .as_deref()
            .map(|name| canonical_name(name).to_string())
            .unwrap_or_else(|| id.to_string()))
    }
}
