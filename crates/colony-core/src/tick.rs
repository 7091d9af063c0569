//! One full controller invocation.
//!
//! The host calls [`run_tick`] once per world tick. The invocation reads a
//! single [`RoomSnapshot`], then runs the fixed sequence:
//!
//! 1. **Release** -- working agents that report zero free capacity return
//!    to the idle pool.
//! 2. **Population Maintainer** -- top up the spawn backlog toward the
//!    target headcount.
//! 3. **Spawn Dispatcher** -- serve idle facilities from the queue front,
//!    requeuing on rejection.
//! 4. **Idle-Agent Dispatcher** -- point idle workers at the nearest
//!    reachable resource node.
//! 5. **Prune** -- drop memory records for agents no longer alive.
//!
//! No host failure aborts the invocation; everything is classified, logged,
//! and retried or deferred to the next tick, so `run_tick` is infallible.
//!
//! [`RoomSnapshot`]: colony_types::RoomSnapshot

use std::collections::BTreeSet;

use colony_types::AgentId;
use tracing::{debug, info};

use crate::config::ControllerConfig;
use crate::harvest::{self, HarvestReport};
use crate::memory::ColonyMemory;
use crate::population;
use crate::room::Room;
use crate::spawn::{self, SpawnReport};

/// Summary of a single invocation, for diagnostics only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// The host tick this invocation ran for.
    pub tick: u64,
    /// Live agents at snapshot time.
    pub existing: u32,
    /// Commands enqueued by the population maintainer.
    pub queued: u32,
    /// Spawn dispatch outcome.
    pub spawn: SpawnReport,
    /// Idle-agent dispatch outcome.
    pub harvest: HarvestReport,
    /// Working agents released back to the idle pool.
    pub released: u32,
    /// Stale memory records removed.
    pub pruned: u32,
    /// Commands still pending at the end of the invocation.
    pub queue_remaining: u32,
}

/// Execute one controller invocation against `room`.
///
/// `memory` is the single cross-invocation state handle; the caller owns
/// it for the process lifetime and passes it into every invocation.
pub fn run_tick(
    room: &mut dyn Room,
    memory: &mut ColonyMemory,
    config: &ControllerConfig,
    tick: u64,
) -> TickSummary {
    info!(tick, "controller invocation started");

    let snapshot = room.snapshot();
    let existing = u32::try_from(snapshot.agents.len()).unwrap_or(u32::MAX);

    // 1. Release agents whose gather task can no longer make progress.
    let mut released: u32 = 0;
    for agent in &snapshot.agents {
        if agent.free_capacity > 0 {
            continue;
        }
        if let Some(record) = memory.agents.get_mut(&agent.id) {
            if record.working {
                record.release();
                debug!(agent = %agent.id, "agent full, task released");
                released = released.saturating_add(1);
            }
        }
    }

    // 2. Population maintenance.
    let queued = population::maintain(
        existing,
        &mut memory.spawn_queue,
        config.target_population,
        config.role,
    );

    // 3. Spawn dispatch.
    let spawn = spawn::dispatch(room, &snapshot.facilities, memory);

    // 4. Idle-agent dispatch.
    let harvest = harvest::dispatch_idle(room, &snapshot.agents, memory, config.role);

    // 5. Prune memory of missing agents. Agents scheduled this invocation
    //    are not yet in the snapshot; count them as live.
    let live: BTreeSet<AgentId> = snapshot
        .agents
        .iter()
        .map(|a| a.id)
        .chain(spawn.spawned.iter().copied())
        .collect();
    let stale = memory.prune_stale(&live);
    for id in &stale {
        debug!(agent = %id, "pruned memory of missing agent");
    }

    let summary = TickSummary {
        tick,
        existing,
        queued,
        spawn,
        harvest,
        released,
        pruned: u32::try_from(stale.len()).unwrap_or(u32::MAX),
        queue_remaining: u32::try_from(memory.spawn_queue.len()).unwrap_or(u32::MAX),
    };
    info!(
        tick,
        existing = summary.existing,
        queued = summary.queued,
        spawned = summary.spawn.spawned.len(),
        tasked = summary.harvest.tasked,
        pruned = summary.pruned,
        queue_remaining = summary.queue_remaining,
        "controller invocation finished"
    );
    summary
}
