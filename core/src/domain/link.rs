// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Container Link Registry Domain Model
//!
//! Maps a container's human name to an operator-chosen launch URL. Entries
//! are keyed by canonical container name and carry the 12-character short id
//! of the container they were created for.
//!
//! ## Invariants
//!
//! - An entry must reference a currently-existing container name; entries for
//!   vanished containers are pruned on the next read via [`reconcile`].
//! - Reconciliation is pure: it takes the stored map plus one live-name
//!   snapshot and returns the pruned view together with a dirty flag. The
//!   caller persists only when the flag is set.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Length of the short container id stored alongside each link.
pub const SHORT_ID_LEN: usize = 12;

/// A stored launch link for one container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerLink {
    #[serde(rename = "shortId")]
    pub short_id: String,
    pub link: String,
}

/// The container-link document: canonical container name → link entry.
pub type LinkMap = BTreeMap<String, ContainerLink>;

/// Strip the runtime's leading path separator from a container name.
pub fn canonical_name(raw: &str) -> &str {
    raw.strip_prefix('/').unwrap_or(raw)
}

/// First [`SHORT_ID_LEN`] characters of a container id.
pub fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_LEN).collect()
}

/// Outcome of pruning a stored link map against live container state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// The stored map with entries for vanished containers removed.
    pub links: LinkMap,
    /// True iff any entry was dropped and the map needs rewriting.
    pub dirty: bool,
}

/// Drop entries whose container no longer exists.
///
/// Membership is checked against a single snapshot of live names, so the cost
/// is proportional to links + containers rather than their product. Names on
/// both sides are compared in canonical form.
pub fn reconcile(stored: LinkMap, live_names: &HashSet<String>) -> Reconciliation {
    let before = stored.len();
    let links: LinkMap = stored
        .into_iter()
        .filter(|(name, _)| live_names.contains(canonical_name(name)))
        .collect();
    let dirty = links.len() != before;
    Reconciliation { links, dirty }
}
