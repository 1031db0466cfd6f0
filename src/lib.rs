//! A terminal space-invasion arcade shooter.
//!
//! `game` holds the simulation and is independent of any terminal; `ui`,
//! `input` and `event` adapt it to ratatui and crossterm.

pub mod app;
pub mod config;
pub mod event;
pub mod game;
pub mod input;
pub mod ui;
