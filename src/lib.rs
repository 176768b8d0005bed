//! Harmonic synthesis engine for single-phase and three-phase-plus-neutral
//! currents.
//!
//! Every engine entry point is a pure function of its inputs. A host (the
//! `triplen` CLI, or an interactive front end) owns an [`state::EngineState`]
//! and calls the engine once per tick with an advancing time offset.

pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod state;
pub mod stats;
