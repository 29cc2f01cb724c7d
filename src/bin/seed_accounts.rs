//! Seed default accounts into the user store.
//!
//! Creates two admin and two regular accounts for local development.
//! Accounts whose email already exists are skipped, so the tool is safe to
//! run repeatedly.

use anyhow::Result;
use clap::Parser;
use newsdesk_backend::auth::models::Role;
use newsdesk_backend::auth::password::hash_password;
use newsdesk_backend::auth::UserStore;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(about = "Seed default newsdesk accounts")]
struct Args {
    /// Path to the SQLite database
    #[arg(long, env = "DATABASE_PATH", default_value = "./newsdesk.db")]
    database_path: String,
}

const DEFAULT_ACCOUNTS: &[(&str, &str, &str, Role)] = &[
    ("admin1", "admin1@admin.com", "admin1", Role::Admin),
    ("admin2", "admin2@admin.com", "admin2", Role::Admin),
    ("user1", "user1@user.com", "user1", Role::User),
    ("user2", "user2@user.com", "user2", Role::User),
];

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let store = UserStore::new(&args.database_path)?;

    for (name, email, password, role) in DEFAULT_ACCOUNTS {
        if store.find_by_email(email)?.is_some() {
            info!("Account {} already seeded, skipping", email);
            continue;
        }

        let hash = hash_password(password)?;
        store.create_user(name, email, &hash, role.clone())?;
        info!("Seeded {} account: {}", role.as_str(), email);
    }

    Ok(())
}
