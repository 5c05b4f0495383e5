//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod domains;
pub mod health;
pub mod lookups;
pub mod urls;

pub use auth::{login_handler, logout_handler, me_handler, register_handler};
pub use domains::{
    create_domain_handler, delete_domain_handler, get_domain_handler, list_domains_handler,
    update_domain_handler,
};
pub use health::health_handler;
pub use lookups::{
    create_lookup_handler, delete_lookup_handler, get_lookup_handler, list_lookups_handler,
    update_lookup_handler,
};
pub use urls::{
    create_url_handler, delete_url_handler, get_url_handler, list_urls_handler,
    update_url_handler,
};
