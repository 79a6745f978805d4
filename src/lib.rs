//! # Ludo Engine
//!
//! A four-player Ludo rules engine with heuristic computer players.
//! The board is a directed node graph whose successor depends on the moving
//! token's color, so each color turns into its own home stretch.
//!
//! ## Modules
//!
//! - [`game`]: board graph, tokens, capture rules and the turn engine
//! - [`ai`]: move-scoring strategies (Aggressive, Defensive, Balanced, Random)
//! - [`simulation`]: automated lineups and per-strategy statistics
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod simulation;
