//! Core domain types
//!
//! These types describe what the probe observes on the cluster (allocations),
//! what it submits (job specifications) and what it reports (verdicts).

pub mod allocation;
pub mod job;
pub mod verdict;
