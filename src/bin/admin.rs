//! CLI administration tool for data-collector.
//!
//! Manages users and API tokens and shows record counts without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a superuser (prompts for missing values)
//! cargo run --bin admin -- user create-superuser --email admin@ada.edu.az
//!
//! # Grant or remove superuser rights
//! cargo run --bin admin -- user promote leyla@ada.edu.az
//! cargo run --bin admin -- user demote leyla@ada.edu.az
//!
//! # Issue a token for a user
//! cargo run --bin admin -- token create --email leyla@ada.edu.az --name "Import script"
//!
//! # Revoke a token
//! cargo run --bin admin -- token revoke "Import script"
//!
//! # Record counts
//! cargo run --bin admin -- stats
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required for `token create` and
//!   `user create-superuser`): must match the server's value
//! - `ALLOWED_EMAIL_DOMAIN` (optional): only used to build the auth service

use data_collector::application::services::{AuthService, RegisterInput};
use data_collector::domain::entities::User;
use data_collector::domain::repositories::{TokenRepository, UserRepository};
use data_collector::infrastructure::persistence::{PgTokenRepository, PgUserRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

type Auth = AuthService<PgUserRepository, PgTokenRepository>;

/// CLI tool for managing data-collector.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show record counts
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a superuser
    CreateSuperuser {
        #[arg(short, long)]
        email: Option<String>,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,
    },

    /// Grant superuser rights
    Promote { email: String },

    /// Remove superuser rights
    Demote { email: String },

    /// List all users
    List,
}

#[derive(Subcommand)]
enum TokenAction {
    /// Issue a new API token for a user
    Create {
        /// Owner of the token
        #[arg(short, long)]
        email: String,

        /// Token name (e.g., "Import script")
        #[arg(short, long)]
        name: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List tokens
    List {
        /// Only tokens of this user
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Token { action } => handle_token_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn auth_service(pool: &PgPool) -> Result<Auth> {
    let secret =
        std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;
    if secret.is_empty() {
        anyhow::bail!("TOKEN_SIGNING_SECRET must not be empty");
    }
    let allowed_domain =
        std::env::var("ALLOWED_EMAIL_DOMAIN").unwrap_or_else(|_| "ada.edu.az".to_string());

    let pool = Arc::new(pool.clone());
    Ok(AuthService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgTokenRepository::new(pool)),
        secret,
        allowed_domain,
    ))
}

async fn find_user(repo: &PgUserRepository, email: &str) -> Result<User> {
    repo.find_by_email(&email.trim().to_lowercase())
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("No user with email {email}"))
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    match action {
        UserAction::CreateSuperuser {
            email,
            first_name,
            last_name,
        } => create_superuser(pool, email, first_name, last_name).await,
        UserAction::Promote { email } => set_superuser(&repo, &email, true).await,
        UserAction::Demote { email } => set_superuser(&repo, &email, false).await,
        UserAction::List => list_users(&repo).await,
    }
}

async fn create_superuser(
    pool: &PgPool,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
) -> Result<()> {
    println!("{}", "👤 Create superuser".bright_blue().bold());
    println!();

    let auth = auth_service(pool)?;

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let first_name = match first_name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("First name")
            .allow_empty(true)
            .interact_text()?,
    };
    let last_name = match last_name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Last name")
            .allow_empty(true)
            .interact_text()?,
    };
    let password: String = Password::new().with_prompt("Password").interact()?;
    let confirmation: String = Password::new()
        .with_prompt("Password (again)")
        .interact()?;

    let user = auth
        .create_superuser(RegisterInput {
            first_name,
            last_name,
            email,
            password1: password,
            password2: confirmation,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create superuser: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ Superuser created:".green().bold(),
        user.email.cyan()
    );

    Ok(())
}

async fn set_superuser(repo: &PgUserRepository, email: &str, is_superuser: bool) -> Result<()> {
    let user = find_user(repo, email).await?;

    if user.is_superuser == is_superuser {
        let state = if is_superuser { "already" } else { "not" };
        println!(
            "{}",
            format!("⚠️  {} is {state} a superuser", user.email).yellow()
        );
        return Ok(());
    }

    repo.set_superuser(user.id, is_superuser)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update user: {}", e))?;

    let verb = if is_superuser { "promoted" } else { "demoted" };
    println!(
        "{}",
        format!("✅ {} {verb}", user.email).green().bold()
    );

    Ok(())
}

/// Lists users with their role.
///
/// # Output Format
///
/// ```text
///   ID  Email                          Name                 Role
///   ────────────────────────────────────────────────────────────────────
///   1   admin@ada.edu.az               Admin                SUPERUSER
///   2   leyla@ada.edu.az               Leyla Aliyeva        STAFF
/// ```
async fn list_users(repo: &PgUserRepository) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        return Ok(());
    }

    println!(
        "  {:<4} {:<30} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "Email".bright_white().bold(),
        "Name".bright_white().bold(),
        "Role".bright_white().bold()
    );
    println!("  {}", "─".repeat(70).bright_black());

    for user in &users {
        let role = if user.is_superuser {
            "SUPERUSER".magenta()
        } else if user.is_staff {
            "STAFF".green()
        } else {
            "USER".normal()
        };

        println!(
            "  {:<4} {:<30} {:<20} {}",
            user.id.to_string().bright_black(),
            user.email.cyan(),
            user.full_name(),
            role
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn handle_token_action(action: TokenAction, pool: &PgPool) -> Result<()> {
    let pool_arc = Arc::new(pool.clone());
    let users = PgUserRepository::new(pool_arc.clone());
    let tokens = PgTokenRepository::new(pool_arc);

    match action {
        TokenAction::Create { email, name, yes } => {
            create_token(pool, &users, &email, name, yes).await
        }
        TokenAction::List { email } => list_tokens(&users, &tokens, email).await,
        TokenAction::Revoke { name_or_id } => revoke_token(&tokens, name_or_id).await,
    }
}

/// Issues a token with interactive prompts.
///
/// Only the HMAC of the token is stored; the raw value is shown once.
async fn create_token(
    pool: &PgPool,
    users: &PgUserRepository,
    email: &str,
    name: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let auth = auth_service(pool)?;
    let user = find_user(users, email).await?;

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("cli")
            .interact_text()?,
    };

    println!("  User: {}", user.email.cyan());
    println!("  Name: {}", token_name.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let token_value = auth
        .issue_token(user.id, &token_name)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!("  Token: {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/urls",
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

async fn list_tokens(
    users: &PgUserRepository,
    tokens: &PgTokenRepository,
    email: Option<String>,
) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let user_id = match email {
        Some(email) => Some(find_user(users, &email).await?.id),
        None => None,
    };

    let tokens = tokens
        .list_tokens(user_id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        return Ok(());
    }

    println!(
        "  {:<4} {:<6} {:<24} {:<18} {:<18} {:<10}",
        "ID".bright_white().bold(),
        "User".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Last used".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(86).bright_black());

    for token in &tokens {
        let status = if token.is_revoked() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };
        let last_used = token
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<4} {:<6} {:<24} {:<18} {:<18} {}",
            token.id.to_string().bright_black(),
            token.user_id,
            token.name.cyan(),
            token.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black(),
            last_used.bright_black(),
            status
        );
    }

    println!();
    println!("  Total: {}", tokens.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Revokes a token by ID (numeric input) or exact name, after confirmation.
async fn revoke_token(repo: &PgTokenRepository, name_or_id: String) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    let token = match name_or_id.parse::<i64>() {
        Ok(id) => repo
            .find_by_id(id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
        Err(_) => repo
            .find_by_name(&name_or_id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
    };

    let token = token.context("Token not found")?;

    if token.is_revoked() {
        println!("{}", "⚠️  This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token: {}", token.name.cyan());
    println!("  ID:    {}", token.id.to_string().bright_black());
    println!("  User:  {}", token.user_id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    println!("{}", "✅ Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Displays record counts per table.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let counts = [
        ("URLs", "SELECT COUNT(*) FROM urls"),
        ("Domains", "SELECT COUNT(*) FROM domains"),
        ("Subdomains", "SELECT COUNT(*) FROM subdomains"),
        ("Categories", "SELECT COUNT(*) FROM categories"),
        ("Languages", "SELECT COUNT(*) FROM languages"),
        ("Users", "SELECT COUNT(*) FROM users"),
        (
            "Active tokens",
            "SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL",
        ),
    ];

    for (label, sql) in counts {
        let count: i64 = sqlx::query_scalar(sql).fetch_one(pool).await?;
        println!(
            "  {:<15}{}",
            format!("{label}:"),
            count.to_string().bright_green().bold()
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations applied: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
