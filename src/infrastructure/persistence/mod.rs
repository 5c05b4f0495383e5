//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` row structs.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] - URL pairs and sibling renames
//! - [`PgDomainRepository`] - Domain records with category/language sets
//! - [`PgLookupRepository`] - Subdomains, categories and languages
//! - [`PgUserRepository`] - User accounts
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_domain_repository;
pub mod pg_lookup_repository;
pub mod pg_token_repository;
pub mod pg_url_repository;
pub mod pg_user_repository;

pub use pg_domain_repository::PgDomainRepository;
pub use pg_lookup_repository::PgLookupRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_url_repository::PgUrlRepository;
pub use pg_user_repository::PgUserRepository;

/// Escapes `%`, `_` and `\` so user input matches literally inside `ILIKE`.
pub(crate) fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
