//! Delve - Endless-Grind RPG Simulation Core
//!
//! This crate holds the simulation only: characters, combat resolution,
//! items, inventory, quest and achievement tracking, and the run
//! orchestrator. It performs no I/O; an external renderer drives it with
//! [`game::PlayerAction`]s and displays the [`game::RunSnapshot`] it gets
//! back after every dispatch.

// Allow dead code in library - some accessors exist for embedding renderers
#![allow(dead_code)]

pub mod achievements;
pub mod character;
pub mod combat;
pub mod core;
pub mod error;
pub mod events;
pub mod game;
pub mod inventory;
pub mod items;
pub mod quests;

pub use crate::core::context::RunContext;
pub use crate::error::ActionError;
pub use crate::game::run::{PlayerAction, Run, RunPhase, RunSnapshot};
