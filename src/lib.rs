//! primeimg - Library for turning pixelated images into numbers
//!
//! This library provides functionality to:
//! - Read a pixelated image into a palette and pixel grid (PNG or JSON documents)
//! - Assign one decimal digit per palette color through a keystroke-level editor
//! - Detect duplicate digits and a leading zero
//! - Project the image as a grid of digits and read it out as one number

pub mod cli;
pub mod color;
pub mod config;
pub mod import;
pub mod mapping;
pub mod models;
pub mod projector;
pub mod session;
pub mod terminal;
pub mod validate;

#[cfg(feature = "wasm")]
pub mod wasm;
