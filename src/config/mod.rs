//! Configuration loading and management for the Commission Engine.
//!
//! This module provides the commission policy (rates, headcount divisor,
//! default VAT and the employee roster) and loads it from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use commission_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/default").unwrap();
//! println!("Roster: {:?}", loader.roster());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CommissionPolicy, PolicyConfig, RosterConfig};
