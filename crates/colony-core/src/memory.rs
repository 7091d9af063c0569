//! The cross-invocation colony state handle.
//!
//! The spawn queue and per-agent memory records are the only state shared
//! between invocations. Rather than a hidden process-wide global, the state
//! lives in an explicitly owned [`ColonyMemory`] value the caller passes
//! `&mut` into each invocation; exactly one instance exists for the process
//! lifetime. Both fields default to empty, so a freshly deserialized or
//! partially absent persisted structure is treated as a first run.

use std::collections::{BTreeMap, BTreeSet};

use colony_types::{AgentId, AgentMemory};
use serde::{Deserialize, Serialize};

use crate::queue::SpawnQueue;

/// Persisted colony state: the spawn backlog plus one memory record per
/// known agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColonyMemory {
    /// Pending production requests, FIFO.
    #[serde(default)]
    pub spawn_queue: SpawnQueue,
    /// Per-agent records keyed by agent identifier.
    #[serde(default)]
    pub agents: BTreeMap<AgentId, AgentMemory>,
}

impl ColonyMemory {
    /// Create an empty colony memory (first run).
    pub const fn new() -> Self {
        Self {
            spawn_queue: SpawnQueue::new(),
            agents: BTreeMap::new(),
        }
    }

    /// Remove records whose agent no longer exists in the host's live set.
    ///
    /// Returns the removed identifiers. All other entries are left
    /// untouched. Runs once per invocation.
    pub fn prune_stale(&mut self, live: &BTreeSet<AgentId>) -> Vec<AgentId> {
        let stale: Vec<AgentId> = self
            .agents
            .keys()
            .filter(|id| !live.contains(*id))
            .copied()
            .collect();
        for id in &stale {
            self.agents.remove(id);
        }
        stale
    }
}
