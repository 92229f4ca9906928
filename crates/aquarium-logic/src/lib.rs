//! Pure well-being logic for the aquarium game.
//!
//! This crate holds the fish indicator model with no rendering, storage,
//! clock, or network dependency. Functions take plain data and return new
//! data, so the same code backs the tank driver, the headless harness, and
//! any future front-end binding.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Indicator tuning, partial overrides, validation |
//! | [`indicators`] | Hunger/energy decay, feeding, derived happiness |
//! | [`status`] | Display tiers and most-urgent indicator |

pub mod config;
pub mod indicators;
pub mod status;
