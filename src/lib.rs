//! rank-bandit-lab - ranking bandit simulator.
//!
//! Click models turn ranked slates into simulated clicks, exploration policies
//! choose slates from click feedback alone, and the simulator drives the two
//! against each other while accounting regret against an oracle slate.

pub mod app;
pub mod cli;
pub mod compare;
pub mod config;
pub mod core;
pub mod curves;
pub mod environment;
pub mod error;
pub mod persist;
pub mod policy;
pub mod scenario;
pub mod settings;
pub mod simulator;
pub mod sweep;
pub mod test_utils;

pub use crate::core::{ClickOutcome, DocId, Document};
pub use environment::{ClickModel, Environment, EnvironmentSpec};
pub use error::{LabError, Result};
pub use policy::{Policy, PolicyConfig};
pub use simulator::{Oracle, RoundRecord, SimulationLog, Simulator, SimulatorState, Summary};
