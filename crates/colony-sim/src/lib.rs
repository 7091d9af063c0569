//! Simulated host room for the colony controller.
//!
//! The controller is written against the `Room` trait and never owns the
//! world; this crate provides the world for local runs and integration
//! tests. A [`SimRoom`] holds a walkability grid, production facilities
//! with busy timers and a shared energy pool, resource nodes with finite
//! stock, and the agents materialized from accepted spawn commands.
//!
//! The host side of the clock is [`SimRoom::step`]: production countdown,
//! agent movement, and gather-task extraction all advance there, strictly
//! outside controller invocations.
//!
//! [`Room`]: colony_core::room::Room

pub mod error;
pub mod grid;
pub mod room;

pub use error::SimError;
pub use grid::Grid;
pub use room::{SimLayout, SimRoom};
