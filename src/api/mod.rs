//! JSON API under `/api`.
//!
//! Handlers stay thin: they validate the request DTO, pull the caller's
//! [`Actor`](crate::domain::entities::Actor) from the auth middleware, and
//! hand off to a service.
//!
//! - [`dto`] - Request and response bodies
//! - [`handlers`] - One module per resource
//! - [`middleware`] - Bearer auth, rate limits, request tracing
//! - [`routes`] - Public and protected routers

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
