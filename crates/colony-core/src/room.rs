//! Host command surface consumed by the controller.
//!
//! The external simulation owns the world: facilities, agents, resource
//! nodes, pathfinding, and movement. The controller only reads a snapshot
//! once per invocation and issues commands back through the [`Room`] trait.
//! Implementations could be a live game server, a local simulation, or the
//! scripted [`StubRoom`] used by tests.

use std::collections::VecDeque;

use colony_types::{AgentId, FacilityId, Position, ReturnCode, RoomSnapshot, SourceId, SpawnCommand};

/// Commands and reads the controller is allowed to perform against the host.
///
/// Every command completes synchronously and reports a [`ReturnCode`];
/// failures are data, never panics, and never abort an invocation.
pub trait Room {
    /// One consistent view of facilities and agents. Called exactly once
    /// per invocation, at the start.
    fn snapshot(&self) -> RoomSnapshot;

    /// Request creation of an agent at `facility` from `command`.
    ///
    /// On [`ReturnCode::Ok`] the facility transitions to busy on the host's
    /// side and the agent will appear in the live set under
    /// `command.name`.
    fn spawn_agent(&mut self, facility: FacilityId, command: &SpawnCommand) -> ReturnCode;

    /// Nearest resource node with remaining stock, by path distance from
    /// `from` (not straight-line distance). `None` when nothing is
    /// reachable.
    fn nearest_source_by_path(&self, from: Position) -> Option<SourceId>;

    /// Ask `agent` to gather from `source`.
    fn harvest(&mut self, agent: AgentId, source: SourceId) -> ReturnCode;

    /// Ask `agent` to move toward `source`.
    fn move_toward(&mut self, agent: AgentId, source: SourceId) -> ReturnCode;
}

/// A scripted [`Room`] for exercising the controller without a host.
///
/// Outcomes are played back from queues loaded by the test; every command
/// the controller issues is recorded for assertions. When an outcome queue
/// runs dry the stub keeps answering with its final default.
#[derive(Debug, Default)]
pub struct StubRoom {
    /// Snapshot returned to the controller.
    pub snapshot: RoomSnapshot,
    /// Scripted outcomes for successive spawn requests.
    pub spawn_outcomes: VecDeque<ReturnCode>,
    /// Scripted answer for nearest-source queries.
    pub nearest_source: Option<SourceId>,
    /// Scripted outcomes for successive harvest requests.
    pub harvest_outcomes: VecDeque<ReturnCode>,
    /// Every spawn request received, in order.
    pub spawn_requests: Vec<(FacilityId, SpawnCommand)>,
    /// Every harvest request received, in order.
    pub harvest_requests: Vec<(AgentId, SourceId)>,
    /// Every move request received, in order.
    pub move_requests: Vec<(AgentId, SourceId)>,
}

impl StubRoom {
    /// Create a stub with an empty snapshot and all-success outcomes.
    pub fn new(snapshot: RoomSnapshot) -> Self {
        Self {
            snapshot,
            ..Self::default()
        }
    }
}

impl Room for StubRoom {
    fn snapshot(&self) -> RoomSnapshot {
        self.snapshot.clone()
    }

    fn spawn_agent(&mut self, facility: FacilityId, command: &SpawnCommand) -> ReturnCode {
        self.spawn_requests.push((facility, command.clone()));
        self.spawn_outcomes.pop_front().unwrap_or(ReturnCode::Ok)
    }

    fn nearest_source_by_path(&self, _from: Position) -> Option<SourceId> {
        self.nearest_source
    }

    fn harvest(&mut self, agent: AgentId, source: SourceId) -> ReturnCode {
        self.harvest_requests.push((agent, source));
        self.harvest_outcomes.pop_front().unwrap_or(ReturnCode::Ok)
    }

    fn move_toward(&mut self, agent: AgentId, source: SourceId) -> ReturnCode {
        self.move_requests.push((agent, source));
        ReturnCode::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_plays_back_scripted_outcomes() {
        let mut stub = StubRoom::new(RoomSnapshot::default());
        stub.spawn_outcomes.push_back(ReturnCode::Busy);
        stub.spawn_outcomes.push_back(ReturnCode::Ok);

        let facility = FacilityId::new();
        let command = SpawnCommand::for_role(colony_types::Role::BasicWorker);

        assert_eq!(stub.spawn_agent(facility, &command), ReturnCode::Busy);
        assert_eq!(stub.spawn_agent(facility, &command), ReturnCode::Ok);
        // Exhausted script falls back to success.
        assert_eq!(stub.spawn_agent(facility, &command), ReturnCode::Ok);
        assert_eq!(stub.spawn_requests.len(), 3);
    }

    #[test]
    fn stub_records_harvest_and_move() {
        let mut stub = StubRoom::new(RoomSnapshot::default());
        let agent = AgentId::new();
        let source = SourceId::new();

        assert_eq!(stub.harvest(agent, source), ReturnCode::Ok);
        assert_eq!(stub.move_toward(agent, source), ReturnCode::Ok);
        assert_eq!(stub.harvest_requests, vec![(agent, source)]);
        assert_eq!(stub.move_requests, vec![(agent, source)]);
    }
}
