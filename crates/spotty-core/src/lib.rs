//! Core configuration model for Spotty.
//!
//! A Spotty project is described by a single `spotty.yaml` file with two
//! sections: `project` (name, remote directory, sync filters) and `instance`
//! (region, instance type, AMI, ports, docker workload, volume). This crate
//! owns the model types, the config file discovery/loading, and their
//! validation. It performs no cloud I/O.

pub mod error;
pub mod loader;
pub mod model;

pub use error::{ConfigError, Result};
pub use loader::{find_config_file, load_config};
pub use model::*;
