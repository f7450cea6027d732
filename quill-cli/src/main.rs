// Quill - A personal blogging platform built with Rust
// Copyright (C) 2025 Quill Project Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use quill_core::AdminUser;
use quill_db::repositories::AdminUserRepository;
use sqlx::SqlitePool;
use std::io::Write;

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Quill CLI tool for database and admin management")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database and seed defaults
    Init,

    /// Admin account management commands
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Create a new admin account
    Create {
        /// Username
        username: String,
        /// Password (will prompt if not provided)
        #[arg(long)]
        password: Option<String>,
    },

    /// Change an admin account's password
    Password {
        /// Username
        username: String,
        /// New password (will prompt if not provided)
        #[arg(long)]
        password: Option<String>,
    },

    /// List all admin accounts
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Get database URL from environment
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:quill.db".to_string());

    match cli.command {
        Commands::Init => init_database(&database_url).await,
        Commands::Admin { command } => {
            let pool = connect_database(&database_url).await?;
            handle_admin_command(command, pool).await
        }
    }
}

async fn init_database(database_url: &str) -> Result<()> {
    println!("Initializing database at: {}", database_url);

    let pool = quill_db::init_database(database_url).await?;
    quill_db::seed_defaults(&pool).await?;

    println!("Database initialized successfully!");
    Ok(())
}

async fn connect_database(database_url: &str) -> Result<SqlitePool> {
    // Use the shared init_database which also ensures migrations are run
    quill_db::init_database(database_url).await
}

async fn handle_admin_command(command: AdminCommands, pool: SqlitePool) -> Result<()> {
    let repo = AdminUserRepository::new(pool.clone());

    match command {
        AdminCommands::Create { username, password } => {
            println!("Creating admin account: {}", username);

            // Get password
            let password = match password {
                Some(pwd) => pwd,
                None => {
                    print!("Password: ");
                    std::io::stdout().flush()?;
                    rpassword::read_password().context("Failed to read password")?
                }
            };

            let user = AdminUser::new(username, &password)?;

            if let Err(e) = user.is_valid() {
                anyhow::bail!("Invalid admin data: {}", e);
            }

            let user_id = repo
                .create(&user)
                .await
                .context("Failed to create admin account")?;

            println!("Admin account created successfully with ID: {}", user_id);
            Ok(())
        }

        AdminCommands::Password { username, password } => {
            println!("Changing password for {}", username);

            let mut user = repo
                .find_by_username(&username)
                .await?
                .ok_or_else(|| anyhow!("Admin account not found"))?;

            // Get password
            let password = match password {
                Some(p) => p,
                None => {
                    print!("New password: ");
                    std::io::stdout().flush()?;
                    rpassword::read_password()?
                }
            };

            user.set_password(&password)?;

            let user_id = user.id.ok_or_else(|| anyhow!("Admin account has no ID"))?;
            repo.update_password(user_id, &user.password_hash).await?;

            println!("Password changed successfully!");
            Ok(())
        }

        AdminCommands::List => {
            let users = repo.list().await?;

            if users.is_empty() {
                println!("No admin accounts found. Use 'quill admin create' to add one.");
            } else {
                println!("Found {} admin account(s):", users.len());
                for user in users {
                    let id = user
                        .id
                        .map(|id| id.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "  {:<4} {:<24} created {}",
                        id,
                        user.username,
                        user.created_at.format("%Y-%m-%d %H:%M")
                    );
                }
            }
            Ok(())
        }
    }
}
