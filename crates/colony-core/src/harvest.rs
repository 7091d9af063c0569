//! Idle-agent task dispatch.
//!
//! Scans the agent snapshot for idle, under-capacity agents matching the
//! targeted role and points each one at the nearest reachable resource
//! node. Reachability is the host's call (path distance, not straight-line
//! distance); an agent with nothing reachable simply stays idle this tick.

use colony_types::{AgentSnapshot, Role};
use tracing::{debug, warn};

use crate::classify;
use crate::memory::ColonyMemory;
use crate::room::Room;

/// What the idle-agent dispatcher did during one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HarvestReport {
    /// Agents that accepted a gather task this invocation.
    pub tasked: u32,
    /// Idle agents with no reachable source (left idle, non-fatal).
    pub unserved: u32,
    /// Gather requests the host rejected.
    pub failures: u32,
}

/// Issue gather tasks to every idle, under-capacity agent of `role`.
///
/// Each agent's outcome is independent: a rejected gather request or an
/// unreachable source never aborts the iteration. On an accepted request
/// the agent's memory record transitions to assigned, and a movement
/// command toward the source is issued alongside (its outcome is not
/// inspected; the host repeats movement as part of the gather task).
pub fn dispatch_idle(
    room: &mut dyn Room,
    agents: &[AgentSnapshot],
    memory: &mut ColonyMemory,
    role: Role,
) -> HarvestReport {
    let mut report = HarvestReport::default();

    for agent in agents {
        let Some(record) = memory.agents.get(&agent.id) else {
            continue;
        };
        if record.working || record.role != role || agent.free_capacity == 0 {
            continue;
        }

        let Some(source) = room.nearest_source_by_path(agent.position) else {
            warn!(agent = %agent.id, position = %agent.position, "no reachable source to harvest, agent stays idle");
            report.unserved = report.unserved.saturating_add(1);
            continue;
        };

        let code = room.harvest(agent.id, source);
        if code.is_ok() {
            if let Some(record) = memory.agents.get_mut(&agent.id) {
                record.assign();
            }
            debug!(agent = %agent.id, %source, "gather task issued");
            report.tasked = report.tasked.saturating_add(1);
        } else {
            warn!(
                agent = %agent.id,
                %source,
                ?code,
                reason = classify::message(code),
                "failed to issue gather task"
            );
            report.failures = report.failures.saturating_add(1);
        }
        let _ = room.move_toward(agent.id, source);
    }

    report
}
