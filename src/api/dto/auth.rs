//! DTOs for registration, login and the current user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::{LoginResult, RegisterInput};
use crate::domain::entities::User;

/// Body of `POST /api/auth/register`. Also decoded from the web form.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 150, message = "This field is required"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 150, message = "This field is required"))]
    pub last_name: String,

    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,

    pub password1: String,

    pub password2: String,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(r: RegisterRequest) -> Self {
        Self {
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            password1: r.password1,
            password2: r.password2,
        }
    }
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// A user as shown to API clients. The password hash is never exposed.
#[derive(Debug, Serialize)]
pub struct UserItem {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserItem {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            is_staff: u.is_staff,
            is_superuser: u.is_superuser,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserItem,
}

impl From<LoginResult> for LoginResponse {
    fn from(r: LoginResult) -> Self {
        Self {
            token: r.token,
            user: r.user.into(),
        }
    }
}
