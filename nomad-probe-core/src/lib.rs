//! Nomad Probe Core
//!
//! Core types shared by the Nomad probe client and the check binary.
//!
//! This crate contains:
//! - Domain types: allocations, job specifications and monitoring verdicts
//! - DTOs: request/response bodies of the Nomad HTTP API

pub mod domain;
pub mod dto;
