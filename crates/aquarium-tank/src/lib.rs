//! Tank driver for the aquarium well-being model.
//!
//! [`aquarium_logic`] is stateless; something has to own each fish's
//! indicator snapshot and apply updates to it one at a time. This crate is
//! that owner:
//!
//! - [`tank::Tank`] keeps every fish keyed by [`tank::FishId`] and rejects
//!   events that arrive out of wall-clock order.
//! - [`schedule::TickScheduler`] turns a fixed polling interval into an
//!   explicit list of due tick instants.
//!
//! ```
//! use aquarium_logic::config::IndicatorConfig;
//! use aquarium_logic::indicators::IndicatorState;
//! use aquarium_tank::{Tank, TickScheduler};
//!
//! let config = IndicatorConfig::default();
//! let mut tank = Tank::new(config);
//! let fish = tank.spawn(IndicatorState::full());
//!
//! let mut scheduler = TickScheduler::from_config(&config, 0);
//! let reports = tank.run_until(&mut scheduler, 10_000, 100.0);
//! assert_eq!(reports.len(), 10);
//!
//! tank.feed(fish, 10_000, None).unwrap();
//! assert!(tank.feed(fish, 5_000, None).is_err());
//! ```

pub mod error;
pub mod schedule;
pub mod tank;

pub use error::TankError;
pub use schedule::TickScheduler;
pub use tank::{Fish, FishId, Tank, TickReport};
