//! Nomad Probe
//!
//! A monitoring check for Nomad clusters. It registers a job, watches the
//! client status of the job's first allocation and reports the outcome as a
//! monitoring-plugin verdict (OK, WARNING, CRITICAL or UNKNOWN).
//!
//! Architecture:
//! - Configuration: command-line flags with Nomad environment fallbacks
//! - Repositories: trait-based access to the Nomad API
//! - Job loading: JSON job files or HCL parsed by the agent
//! - Poller: fixed-interval allocation polling with a deadline
//! - Runner: sequences the steps and folds every failure into a verdict

pub mod cli;
pub mod config;
pub mod error;
pub mod job;
pub mod poller;
pub mod repository;
pub mod runner;
