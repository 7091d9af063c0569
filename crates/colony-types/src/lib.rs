//! Shared type definitions for the colony controller.
//!
//! This crate holds the data model shared between the controller core and
//! any host environment implementation:
//!
//! - [`ids`] -- strongly-typed UUID identifier wrappers.
//! - [`enums`] -- closed enumerations: agent body parts, roles, and host
//!   outcome codes.
//! - [`structs`] -- spawn commands, per-agent memory records, positions,
//!   and the per-invocation room snapshot types.

pub mod enums;
pub mod ids;
pub mod structs;

pub use enums::{BodyPart, ReturnCode, Role};
pub use ids::{AgentId, FacilityId, SourceId};
pub use structs::{
    AgentMemory, AgentSnapshot, FacilitySnapshot, Position, RoomSnapshot, SpawnCommand,
};
