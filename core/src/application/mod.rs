// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod containers;
pub mod links;
pub mod session;
pub mod websites;
