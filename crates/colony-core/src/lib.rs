//! Per-tick decision procedures for the colony controller.
//!
//! The controller runs three cooperating procedures once per host tick, in
//! fixed order: population-target maintenance, spawn-queue dispatch, and
//! idle-agent task dispatch. All three read one consistent snapshot of host
//! state and issue commands back through the [`Room`] trait; none block or
//! span multiple invocations.
//!
//! # Modules
//!
//! - [`classify`] -- total mapping from host outcome codes to messages.
//! - [`config`] -- controller and run settings loaded from YAML.
//! - [`harvest`] -- idle-agent task dispatch.
//! - [`memory`] -- the cross-invocation colony state handle.
//! - [`population`] -- population-target maintenance.
//! - [`queue`] -- the FIFO spawn command backlog.
//! - [`room`] -- the [`Room`] host command surface and a scripted stub.
//! - [`spawn`] -- facility-against-queue spawn dispatch.
//! - [`tick`] -- [`run_tick`], one full invocation.
//!
//! [`Room`]: room::Room
//! [`run_tick`]: tick::run_tick

pub mod classify;
pub mod config;
pub mod harvest;
pub mod memory;
pub mod population;
pub mod queue;
pub mod room;
pub mod spawn;
pub mod tick;
