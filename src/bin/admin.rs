//! CLI administration tool for wecare-gate.
//!
//! Provides commands for creating administrators, approving doctors and
//! checking the database without requiring HTTP API access. Administrators
//! cannot self-register over HTTP; this tool is the only way to create one.
//!
//! # Usage
//!
//! ```bash
//! # Create an administrator (interactive)
//! cargo run --bin admin -- user create-admin
//!
//! # List doctors awaiting approval
//! cargo run --bin admin -- doctor pending
//!
//! # Approve a doctor
//! cargo run --bin admin -- doctor approve dr.house@example.com
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` (required): PostgreSQL connection
//! - `JWT_SECRET` (required): same key as the server

use wecare_gate::application::services::{AuthService, DoctorService, TokenService};
use wecare_gate::config::Config;
use wecare_gate::domain::entities::{Gender, NewAccount, Role};
use wecare_gate::domain::repositories::UserRepository;
use wecare_gate::infrastructure::persistence::PgUserRepository;
use wecare_gate::utils::password::MAX_PASSWORD_LENGTH;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password, Select};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing wecare-gate.
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
    /// Manage accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Doctor approval
    Doctor {
        #[command(subcommand)]
        action: DoctorAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create an administrator account
    CreateAdmin {
        /// Email address (prompted if omitted)
        #[arg(short, long)]
        email: Option<String>,

        /// Generate a random password instead of prompting
        #[arg(short, long)]
        generate_password: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DoctorAction {
    /// List doctors awaiting approval
    Pending,

    /// Approve a doctor by email
    Approve {
        email: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
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

    let database_url = Config::load_database_url()?;
    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Doctor { action } => handle_doctor_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn user_repository(pool: &PgPool) -> Arc<PgUserRepository> {
    Arc::new(PgUserRepository::new(Arc::new(pool.clone())))
}

/// Dispatches account commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    match action {
        UserAction::CreateAdmin {
            email,
            generate_password,
            yes,
        } => {
            let secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
            let tokens = Arc::new(TokenService::new(secret.as_bytes(), 0));
            let service = AuthService::new(user_repository(pool), tokens);

            create_admin(&service, email, generate_password, yes).await?;
        }
    }

    Ok(())
}

/// Creates an administrator with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for account fields (email may come from `--email`)
/// 2. Prompt for the password twice, or generate one
/// 3. Show a summary and confirm (unless `--yes`)
/// 4. Hash with Argon2id and insert
async fn create_admin(
    service: &AuthService,
    email: Option<String>,
    generate_password: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create Administrator".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let first_name: String = Input::new().with_prompt("First name").interact_text()?;
    let last_name: String = Input::new().with_prompt("Last name").interact_text()?;
    let date_of_birth: String = Input::new()
        .with_prompt("Date of birth (YYYY-MM-DD)")
        .validate_with(|input: &String| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .map(|_| ())
                .map_err(|_| "Expected YYYY-MM-DD")
        })
        .interact_text()?;
    let phone_number: String = Input::new()
        .with_prompt("Phone number")
        .validate_with(|input: &String| {
            if input.len() >= 10 {
                Ok(())
            } else {
                Err("At least 10 digits")
            }
        })
        .interact_text()?;

    let genders = [Gender::Male, Gender::Female, Gender::Other];
    let gender_index = Select::new()
        .with_prompt("Gender")
        .items(&genders.iter().map(|g| g.as_str()).collect::<Vec<_>>())
        .default(0)
        .interact()?;
    let address: String = Input::new().with_prompt("Address").interact_text()?;

    let password = if generate_password {
        let generated = generate_password_value();
        println!("{}", "✨ Generated password".green());
        generated
    } else {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .validate_with(|input: &String| {
                if (8..=MAX_PASSWORD_LENGTH).contains(&input.len()) {
                    Ok(())
                } else {
                    Err("Between 8 and 128 characters")
                }
            })
            .interact()?
    };

    println!();
    println!("{}", "Account details:".bright_white().bold());
    println!("  Email: {}", email.cyan());
    println!("  Name:  {} {}", first_name.cyan(), last_name.cyan());
    println!("  Role:  {}", Role::Admin.as_str().bright_magenta());
    if generate_password {
        println!("  Password: {}", password.bright_yellow().bold());
        println!();
        println!(
            "{}",
            "⚠️  IMPORTANT: Save this password now! It is not stored in plain text."
                .red()
                .bold()
        );
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this administrator?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let account = NewAccount {
        email,
        first_name,
        last_name,
        date_of_birth: NaiveDate::parse_from_str(&date_of_birth, "%Y-%m-%d")?,
        phone_number,
        gender: genders[gender_index],
        address,
    };

    let user = service
        .create_admin(account, password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create administrator: {}", e))?;

    println!();
    println!("{}", "✅ Administrator created successfully!".green().bold());
    println!("  ID: {}", user.id.to_string().bright_black());
    println!();

    Ok(())
}

/// Dispatches doctor approval commands.
async fn handle_doctor_action(action: DoctorAction, pool: &PgPool) -> Result<()> {
    let repo = user_repository(pool);
    let service = DoctorService::new(repo.clone());

    match action {
        DoctorAction::Pending => list_pending(&service).await?,
        DoctorAction::Approve { email, yes } => approve_doctor(repo, &service, email, yes).await?,
    }

    Ok(())
}

/// Lists doctors awaiting approval.
///
/// # Output Format
///
/// ```text
/// 🩺 Pending Doctors
///
///   Email                          Name                 Specialization  License
///   ──────────────────────────────────────────────────────────────────────────────
///   dr.house@example.com           Gregory House        NEUROLOGY       LIC-123
/// ```
async fn list_pending(service: &DoctorService) -> Result<()> {
    println!("{}", "🩺 Pending Doctors".bright_blue().bold());
    println!();

    let pending = service
        .pending()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list doctors: {}", e))?;

    if pending.is_empty() {
        println!("{}", "  No doctors awaiting approval".green());
        return Ok(());
    }

    println!(
        "  {:<30} {:<20} {:<15} {:<15}",
        "Email".bright_white().bold(),
        "Name".bright_white().bold(),
        "Specialization".bright_white().bold(),
        "License".bright_white().bold()
    );
    println!("  {}", "─".repeat(80).bright_black());

    for (user, doctor) in &pending {
        println!(
            "  {:<30} {:<20} {:<15} {}",
            user.email.cyan(),
            user.full_name(),
            doctor.specialization.as_str().bright_black(),
            doctor.medical_license_number
        );
    }

    println!();
    println!(
        "  Total: {}",
        pending.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Approves the doctor registered under `email`.
async fn approve_doctor(
    repo: Arc<PgUserRepository>,
    service: &DoctorService,
    email: String,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "✔️  Approve Doctor".bright_blue().bold());
    println!();

    let user = repo
        .find_by_email(&email)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("User not found")?;

    if user.role != Role::Doctor {
        anyhow::bail!("{} is a {}, not a doctor", email, user.role);
    }

    let approved = service
        .approval_status(user.id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    if approved {
        println!("{}", "⚠️  This doctor is already approved".yellow());
        return Ok(());
    }

    println!("  Doctor: {}", user.full_name().cyan());
    println!("  Email:  {}", user.email.bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Approve this doctor?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .approve(user.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to approve doctor: {}", e))?;

    println!();
    println!("{}", "✅ Doctor approved!".green().bold());
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
            let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Users:      {}", users.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}

/// Generates a random password.
///
/// # Format
///
/// - Length: 20 characters
/// - Character set: A-Z, a-z, 0-9
fn generate_password_value() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const PASSWORD_LEN: usize = 20;

    let mut rng = rand::rng();

    (0..PASSWORD_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
