//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence and outbound HTTP checks.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`probe`] - URL reachability probes (HTTP and no-op implementations)

pub mod persistence;
pub mod probe;
