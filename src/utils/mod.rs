//! Utility functions for credentials.
//!
//! This module provides helper functions used across the application:
//!
//! - [`password`] - PBKDF2 password hashing and verification
//! - [`token`] - Bearer token generation and hashing

pub mod password;
pub mod token;
