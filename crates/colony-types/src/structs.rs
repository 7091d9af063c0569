//! Core data structures: spawn commands, agent memory records, positions,
//! and the per-invocation room snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{BodyPart, Role};
use crate::ids::{AgentId, FacilityId};

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// A cell coordinate inside a room.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Column, increasing rightwards.
    pub x: u32,
    /// Row, increasing downwards.
    pub y: u32,
}

impl Position {
    /// Create a position from its coordinates.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position.
    pub const fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }

    /// Whether `other` is this cell or one of its four neighbors.
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.manhattan(other) <= 1
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Spawn commands
// ---------------------------------------------------------------------------

/// A pending production request.
///
/// Created by the population maintainer, consumed by the spawn dispatcher
/// on success. On failure the *same* value is reinserted at the front of
/// the queue; it is never duplicated or mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnCommand {
    /// Ordered part tokens describing the agent's capabilities. Non-empty.
    pub build_config: Vec<BodyPart>,
    /// Globally unique name, generated at enqueue time. The host reuses it
    /// as the created agent's identifier.
    pub name: AgentId,
    /// Role tag used later for task matching.
    pub role: Role,
    /// When the command was enqueued.
    pub queued_at: DateTime<Utc>,
}

impl SpawnCommand {
    /// Build a fresh command for `role` from the fixed role table, with a
    /// newly generated unique name.
    pub fn for_role(role: Role) -> Self {
        Self {
            build_config: role.build_config().to_vec(),
            name: AgentId::new(),
            role,
            queued_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Agent memory
// ---------------------------------------------------------------------------

/// Persisted per-agent record, keyed by [`AgentId`] in colony memory.
///
/// `working` is a two-state task flag: idle (`false`) or assigned (`true`).
/// Transitions happen at explicit points only: [`AgentMemory::assign`] when
/// a gather task is accepted by the host, [`AgentMemory::release`] when the
/// agent reports no free capacity, and record removal when the agent no
/// longer exists in the host's live set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMemory {
    /// Role assigned at creation time from the originating spawn command.
    pub role: Role,
    /// Whether the agent currently holds a task.
    pub working: bool,
}

impl AgentMemory {
    /// Fresh record for a newly created agent: idle, with the command's role.
    pub const fn new(role: Role) -> Self {
        Self {
            role,
            working: false,
        }
    }

    /// Mark the agent as holding a task.
    pub const fn assign(&mut self) {
        self.working = true;
    }

    /// Return the agent to the idle pool.
    pub const fn release(&mut self) {
        self.working = false;
    }
}

// ---------------------------------------------------------------------------
// Room snapshot
// ---------------------------------------------------------------------------

/// Read-only view of one production facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilitySnapshot {
    /// The facility's identifier.
    pub id: FacilityId,
    /// Whether the facility is currently producing an agent.
    pub busy: bool,
}

/// Read-only view of one existing agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    /// The agent's identifier.
    pub id: AgentId,
    /// Where the agent currently stands.
    pub position: Position,
    /// Remaining carry capacity, in storage units.
    pub free_capacity: u32,
}

/// One consistent view of host state, read exactly once per invocation.
///
/// Facilities appear in host enumeration order; the spawn dispatcher serves
/// them in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    /// Production facilities in the room.
    pub facilities: Vec<FacilitySnapshot>,
    /// Existing live agents in the room.
    pub agents: Vec<AgentSnapshot>,
}
