use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    AuthService, DomainService, LookupService, ReachabilityService, UrlService,
};
use crate::domain::audit::{Clock, SystemClock};
use crate::infrastructure::persistence::{
    PgDomainRepository, PgLookupRepository, PgTokenRepository, PgUrlRepository, PgUserRepository,
};
use crate::infrastructure::probe::UrlProbe;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PgPool>,
    pub url_service: Arc<UrlService<PgUrlRepository>>,
    pub domain_service: Arc<DomainService<PgDomainRepository>>,
    pub lookup_service: Arc<LookupService<PgLookupRepository>>,
    pub auth_service: Arc<AuthService<PgUserRepository, PgTokenRepository>>,
    pub reachability: Arc<ReachabilityService>,
}

impl AppState {
    /// Wires repositories and services around a pool.
    pub fn new(
        pool: Arc<PgPool>,
        probe: Arc<dyn UrlProbe>,
        token_signing_secret: String,
        allowed_email_domain: String,
    ) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let reachability = Arc::new(ReachabilityService::new(probe));

        let url_service = Arc::new(UrlService::new(
            Arc::new(PgUrlRepository::new(pool.clone())),
            reachability.clone(),
            clock.clone(),
        ));
        let domain_service = Arc::new(DomainService::new(
            Arc::new(PgDomainRepository::new(pool.clone())),
            clock.clone(),
        ));
        let lookup_service = Arc::new(LookupService::new(
            Arc::new(PgLookupRepository::new(pool.clone())),
            clock,
        ));
        let auth_service = Arc::new(AuthService::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgTokenRepository::new(pool.clone())),
            token_signing_secret,
            allowed_email_domain,
        ));

        Self {
            db: pool,
            url_service,
            domain_service,
            lookup_service,
            auth_service,
            reachability,
        }
    }
}
