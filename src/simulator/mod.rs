//! Drives a policy against an environment and accounts regret.
//!
//! Each round: the policy selects a slate from the full candidate set, the
//! environment answers with clicks, the policy learns from them, and the
//! round is appended to the log with its regret against the oracle slate.

pub mod log;
pub mod oracle;

use serde::Serialize;
use tracing::{info, trace};

use crate::environment::Environment;
use crate::error::{LabError, Result};
use crate::policy::Policy;

pub use log::{RoundMetric, RoundRecord, SimulationLog, Summary};
pub use oracle::Oracle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulatorState {
    Idle,
    Running,
    Completed,
    /// A round failed; the partial log was discarded.
    Failed,
}

/// Single-use driver: `run` may be called once per instance.
#[derive(Debug)]
pub struct Simulator {
    environment: Environment,
    policy: Policy,
    state: SimulatorState,
}

impl Simulator {
    #[must_use]
    pub const fn new(environment: Environment, policy: Policy) -> Self {
        Self {
            environment,
            policy,
            state: SimulatorState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> SimulatorState {
        self.state
    }

    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    #[must_use]
    pub const fn policy(&self) -> &Policy {
        &self.policy
    }

    #[must_use]
    pub fn into_parts(self) -> (Environment, Policy) {
        (self.environment, self.policy)
    }

    pub fn run(&mut self, rounds: usize) -> Result<SimulationLog> {
        if self.state != SimulatorState::Idle {
            return Err(LabError::Usage(format!(
                "simulator already used (state: {:?}); build a fresh instance for a new run",
                self.state
            )));
        }
        if rounds == 0 {
            return Err(LabError::Usage("rounds must be >= 1".to_string()));
        }

        self.state = SimulatorState::Running;
        match self.execute(rounds) {
            Ok(log) => {
                self.state = SimulatorState::Completed;
                Ok(log)
            }
            Err(err) => {
                self.state = SimulatorState::Failed;
                Err(err)
            }
        }
    }

    fn execute(&mut self, rounds: usize) -> Result<SimulationLog> {
        let oracle = Oracle::for_environment(&self.environment)?;
        let slate_size = self.policy.slate_size();
        info!(
            policy = self.policy.name(),
            model = %self.environment.model(),
            rounds,
            slate_size,
            optimal_reward = oracle.expected_reward,
            "simulation started"
        );

        let mut log = SimulationLog::new(
            self.environment.model(),
            oracle.slate.clone(),
            oracle.expected_reward,
        );
        let mut cumulative_regret = 0.0;
        for round_index in 1..=rounds {
            let slate = self.policy.next_slate()?;
            let clicks = self.environment.select_clicks(&slate)?;
            let reward = clicks.click_count();
            let (expected_reward, instantaneous_regret) =
                oracle.regret(&self.environment, &slate)?;
            self.policy.update(&slate, &clicks)?;
            cumulative_regret += instantaneous_regret;
            trace!(
                round_index,
                slate = ?slate,
                reward,
                instantaneous_regret,
                "round complete"
            );
            log.push(RoundRecord {
                round_index,
                slate,
                clicks,
                reward,
                expected_reward,
                instantaneous_regret,
                cumulative_regret,
            });
        }

        info!(
            policy = self.policy.name(),
            total_reward = log.total_reward(),
            ctr = log.ctr(),
            cumulative_regret,
            "simulation completed"
        );
        Ok(log)
    }
}
