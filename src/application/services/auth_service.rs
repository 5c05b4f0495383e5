//! Registration, login and API token authentication.

use std::sync::Arc;

use crate::domain::entities::user::DUPLICATE_EMAIL_MESSAGE;
use crate::domain::entities::{Actor, NewUser, User};
use crate::domain::repositories::{TokenRepository, UserRepository};
use crate::error::AppError;
use crate::utils::password::{DEFAULT_ITERATIONS, hash_password_with, verify_password};
use crate::utils::token::{generate_token, hash_token};
use serde_json::json;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Name recorded for tokens issued by the login endpoint.
pub const LOGIN_TOKEN_NAME: &str = "login";

/// An authenticated request: who is acting and with which token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub actor: Actor,
    pub token_id: i64,
}

/// Registration form data.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
}

/// Result of a successful login. `token` is shown to the client once.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: String,
    pub user: User,
}

/// Service for user accounts and Bearer token authentication.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison. An attacker with read-only access to the database cannot verify
/// or forge tokens without the server-side secret.
pub struct AuthService<U: UserRepository, T: TokenRepository> {
    users: Arc<U>,
    tokens: Arc<T>,
    signing_secret: String,
    allowed_email_domain: String,
    password_iterations: u32,
}

impl<U: UserRepository, T: TokenRepository> AuthService<U, T> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    /// - `allowed_email_domain` - registration only accepts emails at this domain or its subdomains
    pub fn new(
        users: Arc<U>,
        tokens: Arc<T>,
        signing_secret: String,
        allowed_email_domain: String,
    ) -> Self {
        Self {
            users,
            tokens,
            signing_secret,
            allowed_email_domain: allowed_email_domain.to_lowercase(),
            password_iterations: DEFAULT_ITERATIONS,
        }
    }

    /// Overrides the PBKDF2 iteration count for new password hashes.
    pub fn with_password_iterations(mut self, iterations: u32) -> Self {
        self.password_iterations = iterations;
        self
    }

    /// The email domain registration is restricted to.
    pub fn allowed_email_domain(&self) -> &str {
        &self.allowed_email_domain
    }

    /// Registers a staff user.
    ///
    /// # Validation
    ///
    /// - Email must be at the allowed domain (or a subdomain of it) and unused
    /// - Both passwords must match
    /// - Password must have at least 8 characters and not be entirely numeric
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if validation fails.
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn register(&self, input: RegisterInput) -> Result<User, AppError> {
        let email = normalize_email(&input.email)?;
        self.check_email_domain(&email)?;

        let user = self.create_user(email, input, false).await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Creates a superuser. The email domain restriction does not apply.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the email or password is invalid.
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_superuser(&self, input: RegisterInput) -> Result<User, AppError> {
        let email = normalize_email(&input.email)?;

        let user = self.create_user(email, input, true).await?;

        tracing::info!(user_id = user.id, "Superuser created");
        Ok(user)
    }

    async fn create_user(
        &self,
        email: String,
        input: RegisterInput,
        is_superuser: bool,
    ) -> Result<User, AppError> {
        validate_password(&input.password1, &input.password2)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(
                DUPLICATE_EMAIL_MESSAGE,
                json!({"field": "email"}),
            ));
        }

        let password = input.password1;
        let iterations = self.password_iterations;
        let password_hash =
            tokio::task::spawn_blocking(move || hash_password_with(&password, iterations))
                .await
                .map_err(|e| {
                    AppError::internal("Password hashing failed", json!({"reason": e.to_string()}))
                })?;

        self.users
            .create(NewUser {
                email,
                first_name: input.first_name.trim().to_string(),
                last_name: input.last_name.trim().to_string(),
                password_hash,
                is_staff: true,
                is_superuser,
            })
            .await
    }

    /// Checks credentials and issues a new Bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the email is unknown or the
    /// password does not match.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let invalid = || {
            AppError::unauthorized(
                "Invalid email or password",
                json!({"reason": "Invalid credentials"}),
            )
        };

        let email = email.trim().to_lowercase();
        let user = self.users.find_by_email(&email).await?.ok_or_else(invalid)?;

        let password = password.to_string();
        let encoded = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify_password(&password, &encoded))
            .await
            .map_err(|e| {
                AppError::internal("Password check failed", json!({"reason": e.to_string()}))
            })?;

        if !valid {
            tracing::warn!(user_id = user.id, "Failed login attempt");
            return Err(invalid());
        }

        let token = self.issue_token(user.id, LOGIN_TOKEN_NAME).await?;

        tracing::info!(user_id = user.id, "User logged in");
        Ok(LoginResult { token, user })
    }

    /// Creates a token for `user_id` and returns the raw value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the user does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn issue_token(&self, user_id: i64, name: &str) -> Result<String, AppError> {
        let token = generate_token();
        let token_hash = hash_token(&self.signing_secret, &token);

        self.tokens.create_token(user_id, name, &token_hash).await?;

        Ok(token)
    }

    /// Authenticates a raw token against stored credentials.
    ///
    /// On successful authentication, updates the `last_used` timestamp for
    /// monitoring and audit purposes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if:
    /// - Token hash does not match any stored credentials
    /// - Token has been revoked
    /// - The token's user no longer exists
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<Session, AppError> {
        let unauthorized = || {
            AppError::unauthorized("Unauthorized", json!({"reason": "Invalid or revoked token"}))
        };

        let token_hash = hash_token(&self.signing_secret, token);

        let api_token = self
            .tokens
            .find_active(&token_hash)
            .await?
            .ok_or_else(unauthorized)?;

        let user = self
            .users
            .find_by_id(api_token.user_id)
            .await?
            .ok_or_else(unauthorized)?;

        let _ = self.tokens.update_last_used(api_token.id).await;

        Ok(Session {
            actor: user.actor(),
            token_id: api_token.id,
        })
    }

    /// Revokes the token a session was authenticated with.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn logout(&self, session: &Session) -> Result<(), AppError> {
        self.tokens.revoke_token(session.token_id).await?;
        tracing::info!(user_id = session.actor.user_id, "User logged out");
        Ok(())
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_user(&self, id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({"id": id})))
    }

    fn check_email_domain(&self, email: &str) -> Result<(), AppError> {
        let domain = email.rsplit_once('@').map(|(_, d)| d).unwrap_or_default();
        let allowed = &self.allowed_email_domain;

        let accepted = domain == allowed
            || domain
                .strip_suffix(allowed.as_str())
                .is_some_and(|prefix| prefix.ends_with('.') && prefix.len() > 1);

        if !accepted {
            return Err(AppError::bad_request(
                format!("Emails ending with {allowed} are only accepted."),
                json!({"field": "email", "allowed_domain": allowed}),
            ));
        }
        Ok(())
    }
}

/// Trims an email and lowercases it, requiring a `local@domain` shape.
fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(AppError::bad_request(
            "Enter a valid email address.",
            json!({"field": "email"}),
        ));
    }
    Ok(email)
}

fn validate_password(password1: &str, password2: &str) -> Result<(), AppError> {
    if password1 != password2 {
        return Err(AppError::bad_request(
            "The two password fields didn't match.",
            json!({"field": "password2"}),
        ));
    }
    if password1.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::bad_request(
            format!(
                "This password is too short. It must contain at least {MIN_PASSWORD_LENGTH} characters."
            ),
            json!({"field": "password1", "min": MIN_PASSWORD_LENGTH}),
        ));
    }
    if password1.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::bad_request(
            "This password is entirely numeric.",
            json!({"field": "password1"}),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{ApiToken, MockTokenRepository, MockUserRepository};
    use chrono::Utc;

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    fn service(
        users: MockUserRepository,
        tokens: MockTokenRepository,
    ) -> AuthService<MockUserRepository, MockTokenRepository> {
        AuthService::new(
            Arc::new(users),
            Arc::new(tokens),
            test_secret(),
            "ada.edu.az".to_string(),
        )
        .with_password_iterations(1_000)
    }

    fn user(id: i64, password_hash: String) -> User {
        User {
            id,
            email: "leyla@ada.edu.az".to_string(),
            first_name: "Leyla".to_string(),
            last_name: "Aliyeva".to_string(),
            password_hash,
            is_staff: true,
            is_superuser: false,
            created_at: Utc::now(),
        }
    }

    fn api_token(id: i64, user_id: i64) -> ApiToken {
        ApiToken {
            id,
            user_id,
            name: LOGIN_TOKEN_NAME.to_string(),
            token_hash: String::new(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        }
    }

    fn register_input(email: &str, password1: &str, password2: &str) -> RegisterInput {
        RegisterInput {
            first_name: " Leyla ".to_string(),
            last_name: "Aliyeva".to_string(),
            email: email.to_string(),
            password1: password1.to_string(),
            password2: password2.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_creates_staff_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().times(1).returning(|_| Ok(None));
        users
            .expect_create()
            .withf(|u| {
                u.email == "leyla@ada.edu.az"
                    && u.first_name == "Leyla"
                    && u.is_staff
                    && !u.is_superuser
                    && u.password_hash.starts_with("pbkdf2_sha256$1000$")
            })
            .times(1)
            .returning(|u| Ok(user(1, u.password_hash)));

        let result = service(users, MockTokenRepository::new())
            .register(register_input(" Leyla@ADA.edu.az", "s3cret-pass", "s3cret-pass"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_register_accepts_subdomain_email() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users.expect_create().returning(|u| Ok(user(1, u.password_hash)));

        let result = service(users, MockTokenRepository::new())
            .register(register_input("a@students.ada.edu.az", "s3cret-pass", "s3cret-pass"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_register_rejects_foreign_email_domain() {
        let mut users = MockUserRepository::new();
        users.expect_create().times(0);
        let svc = service(users, MockTokenRepository::new());

        for email in ["a@gmail.com", "a@notada.edu.az", "a@ada.edu.az.evil.com", "no-at-sign"] {
            let err = svc
                .register(register_input(email, "s3cret-pass", "s3cret-pass"))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Validation { .. }), "{email}");
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(user(1, String::new()))));
        users.expect_create().times(0);

        let err = service(users, MockTokenRepository::new())
            .register(register_input("leyla@ada.edu.az", "s3cret-pass", "s3cret-pass"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(err.to_string(), DUPLICATE_EMAIL_MESSAGE);
    }

    #[tokio::test]
    async fn test_create_superuser_skips_domain_check() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_create()
            .withf(|u| u.email == "root@example.com" && u.is_staff && u.is_superuser)
            .times(1)
            .returning(|u| Ok(user(1, u.password_hash)));

        let result = service(users, MockTokenRepository::new())
            .create_superuser(register_input("root@example.com", "s3cret-pass", "s3cret-pass"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_superuser_still_checks_password() {
        let mut users = MockUserRepository::new();
        users.expect_create().times(0);

        let err = service(users, MockTokenRepository::new())
            .create_superuser(register_input("root@example.com", "12345678", "12345678"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "This password is entirely numeric.");
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("s3cret-pass", "s3cret-pass").is_ok());
        assert!(validate_password("s3cret-pass", "other-pass").is_err());
        assert!(validate_password("short1", "short1").is_err());
        assert!(validate_password("1234567890", "1234567890").is_err());
    }

    #[tokio::test]
    async fn test_login_issues_hashed_token() {
        let encoded = hash_password_with("s3cret-pass", 1_000);

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .withf(|email| email == "leyla@ada.edu.az")
            .returning(move |_| Ok(Some(user(1, encoded.clone()))));

        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_create_token()
            .withf(|user_id, name, hash| *user_id == 1 && name == LOGIN_TOKEN_NAME && hash.len() == 64)
            .times(1)
            .returning(|user_id, _, _| Ok(api_token(7, user_id)));

        let result = service(users, tokens)
            .login("Leyla@ada.edu.az", "s3cret-pass")
            .await
            .unwrap();

        assert_eq!(result.token.len(), 43);
        assert_eq!(result.user.id, 1);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let encoded = hash_password_with("s3cret-pass", 1_000);

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user(1, encoded.clone()))));

        let mut tokens = MockTokenRepository::new();
        tokens.expect_create_token().times(0);

        let result = service(users, tokens).login("leyla@ada.edu.az", "guess").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let token = "valid-token";
        let expected_hash = hash_token(&test_secret(), token);

        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_find_active()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(|_| Ok(Some(api_token(7, 1))));
        tokens
            .expect_update_last_used()
            .withf(|id| *id == 7)
            .times(1)
            .returning(|_| Ok(()));

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id, String::new()))));

        let session = service(users, tokens).authenticate(token).await.unwrap();

        assert_eq!(session.token_id, 7);
        assert_eq!(session.actor.user_id, 1);
        assert!(!session.actor.is_superuser);
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let mut tokens = MockTokenRepository::new();
        tokens.expect_find_active().times(1).returning(|_| Ok(None));

        let result = service(MockUserRepository::new(), tokens)
            .authenticate("invalid-token")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_logout_revokes_session_token() {
        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_revoke_token()
            .withf(|id| *id == 7)
            .times(1)
            .returning(|_| Ok(()));

        let session = Session {
            actor: Actor::new(1, "leyla@ada.edu.az".to_string(), false),
            token_id: 7,
        };

        assert!(service(MockUserRepository::new(), tokens).logout(&session).await.is_ok());
    }
}
