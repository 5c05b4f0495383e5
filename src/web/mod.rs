//! Server-rendered web pages.
//!
//! Uses Askama templates from `templates/`.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Page route configuration

pub mod handlers;
pub mod routes;
