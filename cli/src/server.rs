// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Service wiring and HTTP serving for the NavPanel daemon.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use navpanel_core::application::containers::ContainerControlService;
use navpanel_core::application::links::LinkService;
use navpanel_core::application::session::SessionService;
use navpanel_core::application::websites::WebsiteService;
use navpanel_core::infrastructure::config_store::YamlConfigStore;
use navpanel_core::infrastructure::docker::DockerGateway;
use navpanel_core::infrastructure::session_tokens::JwtTokenAuthority;
use navpanel_core::infrastructure::site_fetcher::HttpSiteFetcher;
use navpanel_core::presentation::api::{app, AppState};

pub struct ServerConfig {
    pub config_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub docker_socket: Option<String>,
}

pub async fn run(config: ServerConfig) -> Result<()> {
    // Configuration documents: created with defaults on first boot; failure
    // here is fatal.
    let store = Arc::new(
        YamlConfigStore::open(&config.config_dir)
            .context("Failed to initialize configuration documents")?,
    );
    let users = store
        .auth_config()
        .context("Failed to load user table")?;
    let secret = store
        .session_secret()
        .context("Failed to load session secret")?;

    info!(
        "Configuration loaded from {} ({} user(s))",
        config.config_dir.display(),
        users.users.len()
    );

    let gateway = Arc::new(
        DockerGateway::new(config.docker_socket.clone())
            .context("Failed to construct Docker client")?,
    );
    // A dead daemon is not fatal: login and bookmark routes stay usable and
    // container routes report 502 until it returns.
    if let Err(e) = gateway.healthcheck().await {
        warn!("{}", e);
    }

    let tokens = Arc::new(JwtTokenAuthority::new(&secret));
    let fetcher = Arc::new(HttpSiteFetcher::new().context("Failed to construct HTTP client")?);

    let state = Arc::new(AppState {
        sessions: SessionService::new(users, tokens),
        containers: ContainerControlService::new(gateway.clone()),
        links: LinkService::new(gateway, store.clone()),
        websites: WebsiteService::new(store, fetcher),
    });

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("NavPanel listening on {}", addr);

    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("HTTP server failed")?;

    info!("NavPanel shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
