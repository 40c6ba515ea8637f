//! Data Transfer Objects for the Nomad HTTP API
//!
//! Field names follow Nomad's PascalCase wire format.

pub mod job;
