//! Shared storage plumbing for the registration services
//!
//! This crate provides the pieces both services need to talk to their
//! SQLite databases: configuration, per-call connections, health checks,
//! and the storage error taxonomy.

pub mod database;
pub mod error;
