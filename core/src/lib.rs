// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! NavPanel core
//!
//! Domain model, application services, and infrastructure adapters for the
//! NavPanel container dashboard.
//!
//! # Architecture
//!
//! - **domain** — entities, ports, and error taxonomies
//! - **application** — services orchestrating the domain ports
//! - **infrastructure** — Docker, YAML document store, JWT, outbound fetch
//! - **presentation** — the HTTP surface (axum router and handlers)

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
