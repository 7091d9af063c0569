//! Population-target maintenance.
//!
//! Each invocation, the maintainer compares a fixed target headcount
//! against existing agents plus commands already queued, and enqueues the
//! shortfall as fresh spawn commands.

use colony_types::{Role, SpawnCommand};
use tracing::info;

use crate::queue::SpawnQueue;

/// Top up the spawn backlog toward `target` and return how many commands
/// were enqueued.
///
/// The trigger condition counts both existing agents and queued commands
/// (`pending`), but the enqueued amount is the deficit against *existing
/// agents only*. Invoked repeatedly before any command is consumed, the
/// queue can therefore overshoot the target; this over-provisioning
/// asymmetry is deliberate and kept as-is. Infallible.
pub fn maintain(existing: u32, queue: &mut SpawnQueue, target: u32, role: Role) -> u32 {
    let queued_len = u32::try_from(queue.len()).unwrap_or(u32::MAX);
    let pending = existing.saturating_add(queued_len);
    info!(existing, pending, target, "population snapshot");

    if pending >= target {
        return 0;
    }

    let more = target.saturating_sub(existing);
    for _ in 0..more {
        queue.enqueue(SpawnCommand::for_role(role));
    }
    info!(queued = more, %role, "queued workers");
    more
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use colony_types::AgentId;

    use super::*;

    #[test]
    fn fills_queue_from_empty() {
        let mut queue = SpawnQueue::new();
        let queued = maintain(0, &mut queue, 10, Role::BasicWorker);
        assert_eq!(queued, 10);
        assert_eq!(queue.len(), 10);
    }

    #[test]
    fn queued_commands_have_unique_names_and_role() {
        let mut queue = SpawnQueue::new();
        maintain(0, &mut queue, 10, Role::BasicWorker);

        let names: BTreeSet<AgentId> = queue.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), 10);
        assert!(queue.iter().all(|c| c.role == Role::BasicWorker));
        assert!(queue.iter().all(|c| !c.build_config.is_empty()));
    }

    #[test]
    fn no_enqueue_at_or_above_target() {
        let mut queue = SpawnQueue::new();
        assert_eq!(maintain(10, &mut queue, 10, Role::BasicWorker), 0);
        assert_eq!(maintain(12, &mut queue, 10, Role::BasicWorker), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn deficit_is_against_existing_only() {
        // 3 existing + 4 queued = 7 pending < 10, so the maintainer tops up
        // by 10 - 3 = 7, overshooting to 11 pending. Deliberate.
        let mut queue = SpawnQueue::new();
        maintain(6, &mut queue, 10, Role::BasicWorker); // queue 4
        assert_eq!(queue.len(), 4);

        let queued = maintain(3, &mut queue, 10, Role::BasicWorker);
        assert_eq!(queued, 7);
        assert_eq!(queue.len(), 11);
    }

    #[test]
    fn queued_commands_count_toward_pending() {
        let mut queue = SpawnQueue::new();
        maintain(0, &mut queue, 10, Role::BasicWorker);
        // Same call again: 0 existing + 10 queued meets the target.
        assert_eq!(maintain(0, &mut queue, 10, Role::BasicWorker), 0);
        assert_eq!(queue.len(), 10);
    }

    #[test]
    fn zero_target_never_enqueues() {
        let mut queue = SpawnQueue::new();
        assert_eq!(maintain(0, &mut queue, 0, Role::BasicWorker), 0);
        assert!(queue.is_empty());
    }
}
