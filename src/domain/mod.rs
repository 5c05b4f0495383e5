//! Domain layer containing business entities and logic.
//!
//! This module implements the core domain logic following Clean Architecture principles.
//! It defines entities, repository interfaces, and the rules shared by every
//! service, independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`audit`] - Creator/updater stamping applied on every save
//! - [`ownership`] - Creator-or-superuser modification guard
//! - [`url_pair`] - Bare / `www.` URL decomposition
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod audit;
pub mod entities;
pub mod ownership;
pub mod repositories;
pub mod url_pair;
