// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::container::{ContainerAction, ContainerRuntime, ContainerSummary, GatewayError};

/// Thin control service over the container runtime port. Holds no state;
/// every call goes to the daemon fresh.
pub struct ContainerControlService {
    runtime: Arc<dyn ContainerRuntime>,
}

impl ContainerControlService {
    pub fn new(runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { runtime }
    }

    pub async fn list(&self) -> Result<Vec<ContainerSummary>, GatewayError> {
        self.runtime.list().await
    }

    /// Apply a lifecycle action to a container.
    ///
    /// Start/stop are delegated as-is with no pre-check; the runtime's
    /// verdict is surfaced unchanged. An unrecognized verb is accepted and
    /// ignored: the shipped front-end only ever sends start/stop, and this
    /// endpoint has always answered 200 for anything else.
    pub async fn control(&self, id: &str, action: &str) -> Result<(), GatewayError> {
        match ContainerAction::from(action) {
            ContainerAction::Start => {
                self.runtime.start(id).await?;
                info!("Started container {}", id);
                Ok(())
            }
            ContainerAction::Stop => {
                self.runtime.stop(id).await?;
                info!("Stopped container {}", id);
                Ok(())
            }
            ContainerAction::Other(verb) => {
                warn!("Ignoring unrecognized container action '{}' for {}", verb, id);
                Ok(())
            }
        }
    }
}
