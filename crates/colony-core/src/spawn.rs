//! Spawn dispatch: matching idle facilities against the queue front.
//!
//! Facilities are served in host enumeration order, each consuming at most
//! one queue entry per invocation. A command popped for a facility is
//! either consumed on success or restored to the front of the queue on any
//! rejection, so commands are never silently dropped and untouched entries
//! keep their relative order.

use colony_types::{AgentId, AgentMemory, FacilitySnapshot};
use tracing::{debug, info, warn};

use crate::classify;
use crate::memory::ColonyMemory;
use crate::room::Room;

/// What the spawn dispatcher did during one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnReport {
    /// Names of agents whose creation was scheduled successfully.
    pub spawned: Vec<AgentId>,
    /// Number of rejected requests (each one requeued at the front).
    pub failures: u32,
}

/// Serve idle facilities from the front of the spawn queue.
///
/// Busy facilities are skipped. When the queue runs dry, remaining idle
/// facilities are left unserved for this invocation. On success a fresh
/// idle memory record is created under the command's name; on rejection
/// the classified reason is logged and the command goes back to the front,
/// to be retried by the next facility or the next invocation.
pub fn dispatch(
    room: &mut dyn Room,
    facilities: &[FacilitySnapshot],
    memory: &mut ColonyMemory,
) -> SpawnReport {
    let mut report = SpawnReport::default();

    for facility in facilities {
        if facility.busy {
            debug!(facility = %facility.id, "facility busy, skipping");
            continue;
        }

        let Some(command) = memory.spawn_queue.pop_front() else {
            break;
        };

        info!(facility = %facility.id, name = %command.name, "dispatching spawn from queue");
        let code = room.spawn_agent(facility.id, &command);
        if code.is_ok() {
            memory
                .agents
                .insert(command.name, AgentMemory::new(command.role));
            report.spawned.push(command.name);
        } else {
            warn!(
                facility = %facility.id,
                name = %command.name,
                ?code,
                reason = classify::message(code),
                "failed to spawn agent"
            );
            memory.spawn_queue.requeue_front(command);
            report.failures = report.failures.saturating_add(1);
        }
    }

    report
}
