//! Unit-level integration suite: table-driven checks against the public API.

mod cli_command_parse_tests;
mod config_tests;
mod environment_tests;
mod policy_tests;
mod simulator_tests;
