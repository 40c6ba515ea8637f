//! Repository layer
//!
//! Repositories are thin adapters over the Nomad client. They expose only
//! the calls a check run makes, without any business logic.
//!
//! All repositories are trait-based so the runner and poller can be tested
//! against in-memory fakes.

mod allocations;
mod jobs;

#[cfg(test)]
pub(crate) mod fakes;

// Re-export traits
pub use allocations::AllocationRepository;
pub use jobs::JobRepository;

// Re-export implementations
pub use allocations::HttpAllocationRepository;
pub use jobs::HttpJobRepository;
