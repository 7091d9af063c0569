//! The simulated room: facilities, agents, sources, and the host clock.
//!
//! `SimRoom` implements the controller-facing `Room` trait and additionally
//! owns the host side of the world: [`SimRoom::step`] advances production
//! timers, moves agents one cell along their shortest path, and resolves
//! gather-task extraction. The controller never calls `step`; the driving
//! loop interleaves one controller invocation with one world step.

use std::collections::{BTreeMap, BTreeSet};

use colony_core::room::Room;
use colony_types::enums::build_cost;
use colony_types::{
    AgentId, AgentSnapshot, BodyPart, FacilityId, FacilitySnapshot, Position, ReturnCode,
    RoomSnapshot, SourceId, SpawnCommand,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::debug;

use crate::error::SimError;
use crate::grid::Grid;

/// World steps a facility stays busy per body part produced.
const BUSY_STEPS_PER_PART: u32 = 3;

/// Units extracted from a source per world step while adjacent.
const EXTRACT_PER_STEP: u32 = 2;

/// Colony authority level required to operate a facility.
const REQUIRED_AUTHORITY: u8 = 1;

// ---------------------------------------------------------------------------
// Layout configuration
// ---------------------------------------------------------------------------

/// Seeded layout parameters for [`SimRoom::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimLayout {
    /// Grid width in cells.
    #[serde(default = "default_dimension")]
    pub width: u32,
    /// Grid height in cells.
    #[serde(default = "default_dimension")]
    pub height: u32,
    /// Percentage of cells blocked as terrain (0-100).
    #[serde(default = "default_blocked_pct")]
    pub blocked_pct: u32,
    /// Number of production facilities.
    #[serde(default = "default_facilities")]
    pub facilities: u32,
    /// Number of resource nodes.
    #[serde(default = "default_sources")]
    pub sources: u32,
    /// Starting stock per resource node.
    #[serde(default = "default_source_stock")]
    pub source_stock: u32,
    /// Starting colony energy pool.
    #[serde(default = "default_energy")]
    pub energy: u32,
    /// Colony authority level.
    #[serde(default = "default_authority")]
    pub authority: u8,
}

impl Default for SimLayout {
    fn default() -> Self {
        Self {
            width: default_dimension(),
            height: default_dimension(),
            blocked_pct: default_blocked_pct(),
            facilities: default_facilities(),
            sources: default_sources(),
            source_stock: default_source_stock(),
            energy: default_energy(),
            authority: default_authority(),
        }
    }
}

const fn default_dimension() -> u32 {
    20
}

const fn default_blocked_pct() -> u32 {
    15
}

const fn default_facilities() -> u32 {
    1
}

const fn default_sources() -> u32 {
    3
}

const fn default_source_stock() -> u32 {
    5_000
}

const fn default_energy() -> u32 {
    10_000
}

const fn default_authority() -> u8 {
    1
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct SimFacility {
    id: FacilityId,
    position: Position,
    /// World steps of production remaining; busy while non-zero.
    busy_for: u32,
}

#[derive(Debug, Clone)]
struct SimAgent {
    position: Position,
    capacity: u32,
    load: u32,
    /// Active gather task, if any.
    gather: Option<SourceId>,
    /// Movement target, if any.
    move_target: Option<Position>,
}

impl SimAgent {
    const fn free_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.load)
    }
}

#[derive(Debug, Clone)]
struct SimSource {
    position: Position,
    remaining: u32,
}

// ---------------------------------------------------------------------------
// The room
// ---------------------------------------------------------------------------

/// A self-contained simulated host room.
#[derive(Debug, Clone)]
pub struct SimRoom {
    grid: Grid,
    facilities: Vec<SimFacility>,
    agents: BTreeMap<AgentId, SimAgent>,
    sources: BTreeMap<SourceId, SimSource>,
    energy: u32,
    authority: u8,
    steps: u64,
}

impl SimRoom {
    /// Create an empty room over `grid` with the given energy pool and
    /// authority level.
    pub const fn new(grid: Grid, energy: u32, authority: u8) -> Self {
        Self {
            grid,
            facilities: Vec::new(),
            agents: BTreeMap::new(),
            sources: BTreeMap::new(),
            energy,
            authority,
            steps: 0,
        }
    }

    /// Generate a room from seeded random layout parameters.
    ///
    /// Terrain is scattered cell-by-cell at `blocked_pct` density, then
    /// facilities and sources are placed on distinct walkable cells.
    /// Reachability between any two placements is not guaranteed; an
    /// unreachable source is a legitimate steady state the controller
    /// already tolerates.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::LayoutTooDense`] when the walkable cells cannot
    /// host the requested placements, or a grid construction error.
    pub fn generate(seed: u64, layout: &SimLayout) -> Result<Self, SimError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut grid = Grid::new(layout.width, layout.height)?;

        for x in 0..layout.width {
            for y in 0..layout.height {
                if rng.random_range(0..100) < layout.blocked_pct {
                    grid.block(Position::new(x, y))?;
                }
            }
        }

        let mut open = grid.walkable_cells();
        let needed = usize::try_from(layout.facilities.saturating_add(layout.sources))
            .unwrap_or(usize::MAX);
        if open.len() < needed {
            return Err(SimError::LayoutTooDense {
                walkable: open.len(),
                needed,
            });
        }

        let mut room = Self::new(grid, layout.energy, layout.authority);
        for _ in 0..layout.facilities {
            if let Some(pos) = pick_cell(&mut rng, &mut open) {
                room.add_facility(pos)?;
            }
        }
        for _ in 0..layout.sources {
            if let Some(pos) = pick_cell(&mut rng, &mut open) {
                room.add_source(pos, layout.source_stock)?;
            }
        }
        Ok(room)
    }

    /// Place a production facility on a walkable cell.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OutOfBounds`] or [`SimError::Blocked`] for
    /// invalid cells.
    pub fn add_facility(&mut self, position: Position) -> Result<FacilityId, SimError> {
        self.check_cell(position)?;
        let id = FacilityId::new();
        self.facilities.push(SimFacility {
            id,
            position,
            busy_for: 0,
        });
        Ok(id)
    }

    /// Place a resource node on a walkable cell.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OutOfBounds`] or [`SimError::Blocked`] for
    /// invalid cells.
    pub fn add_source(&mut self, position: Position, stock: u32) -> Result<SourceId, SimError> {
        self.check_cell(position)?;
        let id = SourceId::new();
        self.sources.insert(
            id,
            SimSource {
                position,
                remaining: stock,
            },
        );
        Ok(id)
    }

    fn check_cell(&self, position: Position) -> Result<(), SimError> {
        if !self.grid.in_bounds(position) {
            return Err(SimError::OutOfBounds(position));
        }
        if !self.grid.is_walkable(position) {
            return Err(SimError::Blocked(position));
        }
        Ok(())
    }

    /// Advance the host world by one step.
    ///
    /// Production timers count down, agents with a movement target advance
    /// one cell along a shortest path, and agents adjacent to their gather
    /// source extract up to [`EXTRACT_PER_STEP`] units bounded by remaining
    /// stock and free capacity. A gather task that can no longer make
    /// progress is dropped host-side.
    pub fn step(&mut self) {
        self.steps = self.steps.saturating_add(1);

        for facility in &mut self.facilities {
            facility.busy_for = facility.busy_for.saturating_sub(1);
        }

        let ids: Vec<AgentId> = self.agents.keys().copied().collect();
        for id in ids {
            self.step_agent(id);
        }
    }

    fn step_agent(&mut self, id: AgentId) {
        // Movement: one cell along a shortest path.
        if let Some(agent) = self.agents.get_mut(&id) {
            if let Some(target) = agent.move_target {
                if agent.position == target {
                    agent.move_target = None;
                } else if let Some(next) = self.grid.next_step_toward(agent.position, target) {
                    agent.position = next;
                    if next == target {
                        agent.move_target = None;
                    }
                } else {
                    // Unreachable target; drop it.
                    agent.move_target = None;
                }
            }
        }

        // Extraction: requires adjacency to the source cell.
        let Some(agent) = self.agents.get(&id) else {
            return;
        };
        let Some(source_id) = agent.gather else {
            return;
        };
        let Some(source) = self.sources.get(&source_id) else {
            if let Some(agent) = self.agents.get_mut(&id) {
                agent.gather = None;
            }
            return;
        };

        if !agent.position.is_adjacent(source.position) {
            return;
        }

        let take = EXTRACT_PER_STEP
            .min(source.remaining)
            .min(agent.free_capacity());
        if take == 0 {
            // Full agent or exhausted source: the task cannot progress.
            if let Some(agent) = self.agents.get_mut(&id) {
                agent.gather = None;
            }
            return;
        }

        if let Some(source) = self.sources.get_mut(&source_id) {
            source.remaining = source.remaining.saturating_sub(take);
        }
        if let Some(agent) = self.agents.get_mut(&id) {
            agent.load = agent.load.saturating_add(take);
        }
        debug!(agent = %id, source = %source_id, take, "extracted from source");
    }

    /// World steps advanced so far.
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Remaining colony energy.
    pub const fn energy(&self) -> u32 {
        self.energy
    }

    /// Number of live agents.
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Current load carried by an agent.
    pub fn agent_load(&self, id: AgentId) -> Option<u32> {
        self.agents.get(&id).map(|a| a.load)
    }

    /// Current position of an agent.
    pub fn agent_position(&self, id: AgentId) -> Option<Position> {
        self.agents.get(&id).map(|a| a.position)
    }

    /// Remaining stock of a source.
    pub fn source_remaining(&self, id: SourceId) -> Option<u32> {
        self.sources.get(&id).map(|s| s.remaining)
    }

    /// Whether a facility is currently producing.
    pub fn facility_busy(&self, id: FacilityId) -> Option<bool> {
        self.facilities.iter().find(|f| f.id == id).map(|f| f.busy_for > 0)
    }
}

/// Remove and return a uniformly random cell from `open`.
fn pick_cell<R: Rng>(rng: &mut R, open: &mut Vec<Position>) -> Option<Position> {
    if open.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..open.len());
    Some(open.swap_remove(idx))
}

impl Room for SimRoom {
    fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            facilities: self
                .facilities
                .iter()
                .map(|f| FacilitySnapshot {
                    id: f.id,
                    busy: f.busy_for > 0,
                })
                .collect(),
            agents: self
                .agents
                .iter()
                .map(|(&id, a)| AgentSnapshot {
                    id,
                    position: a.position,
                    free_capacity: a.free_capacity(),
                })
                .collect(),
        }
    }

    fn spawn_agent(&mut self, facility: FacilityId, command: &SpawnCommand) -> ReturnCode {
        let Some(idx) = self.facilities.iter().position(|f| f.id == facility) else {
            return ReturnCode::NotOwner;
        };
        if command.build_config.is_empty() {
            return ReturnCode::InvalidArgs;
        }
        if self.authority < REQUIRED_AUTHORITY {
            return ReturnCode::AuthorityTooLow;
        }
        let Some(slot) = self.facilities.get(idx) else {
            return ReturnCode::NotOwner;
        };
        if slot.busy_for > 0 {
            return ReturnCode::Busy;
        }
        if self.agents.contains_key(&command.name) {
            return ReturnCode::NameExists;
        }
        let cost = build_cost(&command.build_config);
        let Some(remaining_energy) = self.energy.checked_sub(cost) else {
            return ReturnCode::NotEnoughResources;
        };

        self.energy = remaining_energy;
        let position = slot.position;
        let parts = u32::try_from(command.build_config.len()).unwrap_or(u32::MAX);
        if let Some(slot) = self.facilities.get_mut(idx) {
            slot.busy_for = parts.saturating_mul(BUSY_STEPS_PER_PART);
        }

        let carry_parts = command
            .build_config
            .iter()
            .filter(|p| **p == BodyPart::Carry)
            .count();
        let capacity = u32::try_from(carry_parts)
            .unwrap_or(u32::MAX)
            .saturating_mul(BodyPart::CARRY_CAPACITY);

        self.agents.insert(
            command.name,
            SimAgent {
                position,
                capacity,
                load: 0,
                gather: None,
                move_target: None,
            },
        );
        debug!(facility = %facility, name = %command.name, cost, "agent materialized");
        ReturnCode::Ok
    }

    fn nearest_source_by_path(&self, from: Position) -> Option<SourceId> {
        let goals: BTreeSet<Position> = self
            .sources
            .values()
            .filter(|s| s.remaining > 0)
            .map(|s| s.position)
            .collect();
        let found = self.grid.nearest_by_path(from, &goals)?;
        self.sources
            .iter()
            .find(|(_, s)| s.position == found && s.remaining > 0)
            .map(|(&id, _)| id)
    }

    fn harvest(&mut self, agent: AgentId, source: SourceId) -> ReturnCode {
        if !self.agents.contains_key(&agent) {
            return ReturnCode::NotOwner;
        }
        let Some(node) = self.sources.get(&source) else {
            return ReturnCode::InvalidArgs;
        };
        if node.remaining == 0 {
            return ReturnCode::NotEnoughResources;
        }
        if let Some(state) = self.agents.get_mut(&agent) {
            state.gather = Some(source);
        }
        ReturnCode::Ok
    }

    fn move_toward(&mut self, agent: AgentId, source: SourceId) -> ReturnCode {
        let Some(node) = self.sources.get(&source) else {
            return ReturnCode::InvalidArgs;
        };
        let target = node.position;
        let Some(state) = self.agents.get_mut(&agent) else {
            return ReturnCode::NotOwner;
        };
        state.move_target = Some(target);
        ReturnCode::Ok
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use colony_types::Role;

    use super::*;

    fn open_room(energy: u32) -> SimRoom {
        let grid = Grid::new(10, 10).unwrap();
        SimRoom::new(grid, energy, 1)
    }

    #[test]
    fn spawn_succeeds_and_materializes_agent() {
        let mut room = open_room(1_000);
        let facility = room.add_facility(Position::new(0, 0)).unwrap();
        let command = SpawnCommand::for_role(Role::BasicWorker);

        assert_eq!(room.spawn_agent(facility, &command), ReturnCode::Ok);
        assert_eq!(room.agent_count(), 1);
        // 2 move + 1 carry + 1 work = 250 energy.
        assert_eq!(room.energy(), 750);
        assert_eq!(room.facility_busy(facility), Some(true));
        assert_eq!(room.agent_position(command.name), Some(Position::new(0, 0)));
    }

    #[test]
    fn spawn_rejections() {
        let mut room = open_room(1_000);
        let facility = room.add_facility(Position::new(0, 0)).unwrap();
        let command = SpawnCommand::for_role(Role::BasicWorker);

        assert_eq!(
            room.spawn_agent(FacilityId::new(), &command),
            ReturnCode::NotOwner
        );

        let mut empty = command.clone();
        empty.build_config.clear();
        assert_eq!(room.spawn_agent(facility, &empty), ReturnCode::InvalidArgs);

        assert_eq!(room.spawn_agent(facility, &command), ReturnCode::Ok);
        // Facility now busy.
        assert_eq!(
            room.spawn_agent(facility, &SpawnCommand::for_role(Role::BasicWorker)),
            ReturnCode::Busy
        );
    }

    #[test]
    fn spawn_rejects_duplicate_name() {
        let mut room = open_room(1_000);
        let facility = room.add_facility(Position::new(0, 0)).unwrap();
        let other = room.add_facility(Position::new(1, 0)).unwrap();
        let command = SpawnCommand::for_role(Role::BasicWorker);

        assert_eq!(room.spawn_agent(facility, &command), ReturnCode::Ok);
        assert_eq!(room.spawn_agent(other, &command), ReturnCode::NameExists);
    }

    #[test]
    fn spawn_rejects_without_energy_or_authority() {
        let mut poor = open_room(100);
        let facility = poor.add_facility(Position::new(0, 0)).unwrap();
        let command = SpawnCommand::for_role(Role::BasicWorker);
        assert_eq!(
            poor.spawn_agent(facility, &command),
            ReturnCode::NotEnoughResources
        );

        let grid = Grid::new(5, 5).unwrap();
        let mut unauthorized = SimRoom::new(grid, 1_000, 0);
        let facility = unauthorized.add_facility(Position::new(0, 0)).unwrap();
        assert_eq!(
            unauthorized.spawn_agent(facility, &command),
            ReturnCode::AuthorityTooLow
        );
    }

    #[test]
    fn facility_frees_up_after_production() {
        let mut room = open_room(1_000);
        let facility = room.add_facility(Position::new(0, 0)).unwrap();
        let command = SpawnCommand::for_role(Role::BasicWorker);
        room.spawn_agent(facility, &command);

        // 4 parts at 3 steps each.
        for _ in 0..12 {
            assert_eq!(room.facility_busy(facility), Some(true));
            room.step();
        }
        assert_eq!(room.facility_busy(facility), Some(false));
    }

    #[test]
    fn agent_walks_to_source_and_extracts() {
        let mut room = open_room(1_000);
        let facility = room.add_facility(Position::new(0, 0)).unwrap();
        let source = room.add_source(Position::new(4, 0), 100).unwrap();
        let command = SpawnCommand::for_role(Role::BasicWorker);
        room.spawn_agent(facility, &command);
        let agent = command.name;

        assert_eq!(room.harvest(agent, source), ReturnCode::Ok);
        assert_eq!(room.move_toward(agent, source), ReturnCode::Ok);

        for _ in 0..10 {
            room.step();
        }

        let load = room.agent_load(agent).unwrap();
        assert!(load > 0, "agent should have extracted something");
        assert_eq!(room.source_remaining(source), Some(100 - load));
    }

    #[test]
    fn nearest_source_skips_empty_nodes() {
        let mut room = open_room(1_000);
        let near = room.add_source(Position::new(1, 0), 0).unwrap();
        let far = room.add_source(Position::new(5, 0), 50).unwrap();
        let _ = near;

        assert_eq!(
            room.nearest_source_by_path(Position::new(0, 0)),
            Some(far)
        );
    }

    #[test]
    fn harvest_rejects_unknown_entities() {
        let mut room = open_room(1_000);
        let source = room.add_source(Position::new(1, 1), 50).unwrap();
        assert_eq!(
            room.harvest(AgentId::new(), source),
            ReturnCode::NotOwner
        );

        let facility = room.add_facility(Position::new(0, 0)).unwrap();
        let command = SpawnCommand::for_role(Role::BasicWorker);
        room.spawn_agent(facility, &command);
        assert_eq!(
            room.harvest(command.name, SourceId::new()),
            ReturnCode::InvalidArgs
        );
    }

    #[test]
    fn generated_layout_respects_counts() {
        let layout = SimLayout {
            width: 12,
            height: 12,
            blocked_pct: 10,
            facilities: 2,
            sources: 4,
            ..SimLayout::default()
        };
        let room = SimRoom::generate(7, &layout).unwrap();
        let snapshot = room.snapshot();
        assert_eq!(snapshot.facilities.len(), 2);
        assert_eq!(room.sources.len(), 4);
        assert!(snapshot.facilities.iter().all(|f| !f.busy));
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let layout = SimLayout::default();
        let a = SimRoom::generate(42, &layout).unwrap();
        let b = SimRoom::generate(42, &layout).unwrap();
        let positions_a: Vec<Position> = a.sources.values().map(|s| s.position).collect();
        let positions_b: Vec<Position> = b.sources.values().map(|s| s.position).collect();
        assert_eq!(positions_a, positions_b);
        assert_eq!(a.energy(), b.energy());
    }

    #[test]
    fn too_dense_layout_is_an_error() {
        let layout = SimLayout {
            width: 2,
            height: 2,
            blocked_pct: 100,
            facilities: 1,
            sources: 1,
            ..SimLayout::default()
        };
        assert!(SimRoom::generate(1, &layout).is_err());
    }
}
