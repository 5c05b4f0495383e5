//! Business logic services for the application layer.

pub mod auth_service;
pub mod domain_service;
pub mod lookup_service;
pub mod reachability_service;
pub mod url_service;

pub use auth_service::{AuthService, LoginResult, RegisterInput, Session};
pub use domain_service::{DomainInput, DomainService};
pub use lookup_service::LookupService;
pub use reachability_service::ReachabilityService;
pub use url_service::UrlService;
