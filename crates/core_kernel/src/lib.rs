//! Core Kernel - Foundational types and utilities for the bordereaux reporting system
//!
//! This crate provides the fundamental building blocks used across all layers:
//! - Strongly-typed claim reference identifiers and the claim identity triple
//! - Ports and adapters infrastructure for external data sources

pub mod identifiers;
pub mod ports;

pub use identifiers::{ClaimIdentity, ClaimRef, LobCode, PolicyRef, YearOfAccount};
pub use ports::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata, PortError,
};
