// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod auth;
pub mod container;
pub mod link;
pub mod repository;
pub mod website;
