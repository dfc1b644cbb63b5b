//! Core game logic module for Snake
//!
//! This module contains the game rules without any pin, timing or terminal
//! dependencies. The console and the simulator both drive it the same way.

pub mod action;
pub mod board;
pub mod config;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use board::{Board, BoardError};
pub use config::GameConfig;
pub use engine::{GameEngine, StepOutcome, StepResult};
pub use food::{FoodPlacement, place_food};
pub use state::{GameState, Position};
