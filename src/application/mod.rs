//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - URL pairs kept in sync with their `www.` siblings
//! - [`services::reachability_service::ReachabilityService`] - Syntax and `HEAD` checks
//! - [`services::domain_service::DomainService`] - Domain records
//! - [`services::lookup_service::LookupService`] - Subdomains, categories and languages
//! - [`services::auth_service::AuthService`] - Registration, login and token authentication

pub mod services;
