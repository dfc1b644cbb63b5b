//! LED Snake - Snake on a multiplexed 8x8 LED matrix
//!
//! This library provides:
//! - Core game logic (game module)
//! - Row/column scanning of the matrix over `embedded-hal` pins (render module)
//! - Button sampling (input module)
//! - The tick loop with its game-over sequence (console module)
//! - Simulated pins and a terminal front end for running off-hardware (sim, modes)

pub mod console;
pub mod game;
pub mod input;
pub mod modes;
pub mod render;
pub mod sim;
