// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # NavPanel Daemon
//!
//! The `navpanel` binary serves the container dashboard API: a
//! session-authenticated control plane over the local Docker daemon plus the
//! operator's launch-link and bookmark documents.
//!
//! All flags fall back to environment variables, so the binary runs unchanged
//! inside a container:
//!
//! - `--config-dir` / `CONFIG_PATH` — YAML document directory
//! - `--host` / `NAVPANEL_HOST`, `--port` / `PORT` — listen address
//! - `--docker-socket` / `DOCKER_SOCKET` — explicit daemon socket
//! - `--log-level` / `NAVPANEL_LOG_LEVEL` — tracing filter

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod server;

/// NavPanel - container dashboard control plane
#[derive(Parser)]
#[command(name = "navpanel")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding the YAML configuration documents
    #[arg(
        short,
        long,
        env = "CONFIG_PATH",
        default_value = "./config",
        value_name = "DIR"
    )]
    config_dir: PathBuf,

    /// HTTP listen host
    #[arg(long, env = "NAVPANEL_HOST", default_value = "0.0.0.0")]
    host: String,

    /// HTTP listen port
    #[arg(short, long, env = "PORT", default_value = "4000")]
    port: u16,

    /// Docker socket path (auto-detected when omitted)
    #[arg(long, env = "DOCKER_SOCKET", value_name = "PATH")]
    docker_socket: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "NAVPANEL_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    server::run(server::ServerConfig {
        config_dir: cli.config_dir,
        host: cli.host,
        port: cli.port,
        docker_socket: cli.docker_socket,
    })
    .await
}
