// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::{AccountArgs, Cli, Commands};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use folio_core::auth::{normalize_email, password, queries};
use folio_core::models::auth::Role;
use folio_core::validation::Checker;
use folio_core::validation::account::check_new_password;

mod cli;
mod logging;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init()?;

    let args = Cli::parse();

    match args.command {
        Commands::CreateAdmin(account) => create_admin(account).await?,
        Commands::ChangePassword(account) => change_password(account).await?,
        Commands::HashPassword { password } => {
            check_password(&password)?;
            println!("{}", password::hash_password(&password)?);
        }
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn check_password(password: &str) -> Result<()> {
    let mut c = Checker::new();
    check_new_password(&mut c, "password", password);
    c.finish()?;
    Ok(())
}

fn check_account(account: &AccountArgs) -> Result<()> {
    let mut c = Checker::new();
    c.email("email", account.email.trim());
    check_new_password(&mut c, "password", &account.password);
    c.finish()?;
    Ok(())
}

async fn connect(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await?;
    folio_core::migrate::migrate(&pool).await?;
    Ok(pool)
}

async fn create_admin(account: AccountArgs) -> Result<()> {
    check_account(&account)?;
    let pool = connect(&account.database_url).await?;
    let hash = password::hash_password(&account.password)?;
    let created = queries::create_account(&pool, &account.email, &hash, Role::Admin).await?;
    log::info!("created admin account {} ({})", created.email, created.id);
    Ok(())
}

async fn change_password(account: AccountArgs) -> Result<()> {
    check_account(&account)?;
    let pool = connect(&account.database_url).await?;
    let hash = password::hash_password(&account.password)?;
    let email = normalize_email(&account.email);
    if !queries::update_password_hash_by_email(&pool, &email, &hash).await? {
        return Err(Error::Custom(format!("no account for {email}")));
    }
    log::info!("password updated for {email}");
    Ok(())
}
