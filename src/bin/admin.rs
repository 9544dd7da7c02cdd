//! CLI administration tool for biomedical-portal.
//!
//! Manages login accounts in the `user` table without going through the
//! web UI. Passwords are encoded with the same encoder the server uses
//! (`PASSWORD_ENCODER`), so created accounts can log in immediately.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prompts for anything not given)
//! cargo run --bin admin -- user create --username alice --authority ROLE_USER
//!
//! # List users
//! cargo run --bin admin -- user list
//!
//! # Disable / enable a user
//! cargo run --bin admin -- user disable alice
//! cargo run --bin admin -- user enable alice
//!
//! # Change the granted authority
//! cargo run --bin admin -- user grant alice ROLE_ADMIN
//!
//! # Reset a password
//! cargo run --bin admin -- user passwd alice
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `PASSWORD_ENCODER` (optional): `argon2` (default) or `noop`

use biomedical_portal::domain::entities::NewUser;
use biomedical_portal::domain::repositories::UserAccountRepository;
use biomedical_portal::infrastructure::persistence::PgUserRepository;
use biomedical_portal::security::{EncoderKind, PasswordEncoder};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing biomedical-portal accounts.
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
    /// Manage login accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Account management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new account
    Create {
        #[arg(short, long)]
        username: Option<String>,

        /// Granted authority, e.g. ROLE_USER or ROLE_ADMIN
        #[arg(short, long)]
        authority: Option<String>,

        /// Create the account disabled
        #[arg(long)]
        disabled: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all accounts
    List,

    /// Allow an account to log in
    Enable { username: String },

    /// Prevent an account from logging in
    Disable { username: String },

    /// Replace the account's authority (use "-" to remove it)
    Grant { username: String, authority: String },

    /// Set a new password
    Passwd { username: String },
}

/// Database operation subcommands.
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
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches account management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    match action {
        UserAction::Create {
            username,
            authority,
            disabled,
            yes,
        } => create_user(&repo, username, authority, !disabled, yes).await?,
        UserAction::List => list_users(&repo).await?,
        UserAction::Enable { username } => {
            repo.set_enabled(&username, true)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to enable user: {}", e))?;
            println!("{} {}", "✅ Enabled".green().bold(), username.cyan());
        }
        UserAction::Disable { username } => {
            repo.set_enabled(&username, false)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to disable user: {}", e))?;
            println!("{} {}", "🔒 Disabled".yellow().bold(), username.cyan());
        }
        UserAction::Grant {
            username,
            authority,
        } => {
            let authority = (authority != "-").then_some(authority);
            repo.set_authority(&username, authority.as_deref())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to update authority: {}", e))?;
            println!(
                "{} {} -> {}",
                "✅ Authority updated".green().bold(),
                username.cyan(),
                authority.as_deref().unwrap_or("(none)").bright_white()
            );
        }
        UserAction::Passwd { username } => {
            let encoded = prompt_encoded_password()?;
            repo.set_password(&username, &encoded)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to set password: {}", e))?;
            println!("{} {}", "✅ Password updated for".green().bold(), username.cyan());
        }
    }

    Ok(())
}

/// Creates an account with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for username and authority (or use provided)
/// 2. Prompt for the password twice
/// 3. Encode it with the configured encoder
/// 4. Confirm creation (unless `--yes` flag)
/// 5. Insert the row
async fn create_user(
    repo: &PgUserRepository,
    username: Option<String>,
    authority: Option<String>,
    enabled: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create Account".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let authority = match authority {
        Some(a) => a,
        None => Input::new()
            .with_prompt("Authority")
            .with_initial_text("ROLE_USER")
            .interact_text()?,
    };

    let password = prompt_encoded_password()?;

    println!();
    println!("{}", "Account details:".bright_white().bold());
    println!("  Username:  {}", username.cyan());
    println!("  Authority: {}", authority.cyan());
    println!(
        "  Enabled:   {}",
        if enabled { "yes".green() } else { "no".red() }
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this account?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let account = repo
        .create_user(NewUser {
            username,
            password,
            enabled,
            authority: Some(authority),
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!(
        "{} (id {})",
        "✅ Account created successfully!".green().bold(),
        account.id.to_string().bright_black()
    );
    println!();

    Ok(())
}

/// Lists all accounts.
///
/// # Output Format
///
/// ```text
/// 📋 Accounts
///
///   ID  Username             Authority       Created              Status
///   ───────────────────────────────────────────────────────────────────────
///   1   alice                ROLE_USER       2024-01-15 10:30     ENABLED
///   2   bob                  ROLE_ADMIN      2024-01-16 14:20     DISABLED
/// ```
async fn list_users(repo: &PgUserRepository) -> Result<()> {
    println!("{}", "📋 Accounts".bright_blue().bold());
    println!();

    let users = repo
        .list_users()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No accounts found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<20} {:<15} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Authority".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for user in &users {
        let status = if user.enabled {
            "ENABLED".green()
        } else {
            "DISABLED".red()
        };

        println!(
            "  {:<3} {:<20} {:<15} {:<20} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            user.authority.as_deref().unwrap_or("-"),
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Reads a password twice and encodes it with `PASSWORD_ENCODER`.
fn prompt_encoded_password() -> Result<String> {
    let kind: EncoderKind = match std::env::var("PASSWORD_ENCODER") {
        Ok(value) => value.parse()?,
        Err(_) => EncoderKind::default(),
    };

    if kind == EncoderKind::NoOp {
        println!(
            "{}",
            "⚠️  PASSWORD_ENCODER=noop: the password is stored in plain text".yellow()
        );
    }

    let raw = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    let encoder = kind.build();
    encoder
        .encode(&raw)
        .map_err(|e| anyhow::anyhow!("Failed to encode password: {}", e))
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

            let users: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "user""#)
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Accounts:   {}", users.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
