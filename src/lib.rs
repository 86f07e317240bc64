//! Button-toggled conveyor relay controller.
//!
//! Exposes the pure-logic core and its adapters for integration testing.
//! The binary in `main.rs` only wires these together.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod drivers;
pub mod error;
pub mod pins;
