//! User accounts and the acting user passed into every operation.

use chrono::{DateTime, Utc};

/// Message returned when an email is already registered.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "An user with that email already exists.";

/// A registered user.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The [`Actor`] this user acts as.
    pub fn actor(&self) -> Actor {
        Actor::new(self.id, self.email.clone(), self.is_superuser)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Input data for creating a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

/// The authenticated user performing an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i64,
    pub email: String,
    pub is_superuser: bool,
}

impl Actor {
    pub fn new(user_id: i64, email: String, is_superuser: bool) -> Self {
        Self {
            user_id,
            email,
            is_superuser,
        }
    }
}
