use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "folio_cli", about = "Folio operator commands", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an administrator account.
    CreateAdmin(AccountArgs),
    /// Replace an account's password.
    ChangePassword(AccountArgs),
    /// Print the bcrypt hash of a password, for seeding by hand.
    HashPassword {
        #[arg(long, env = "FOLIO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Print the version.
    Version,
}

#[derive(Args, Debug)]
pub struct AccountArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long, env = "FOLIO_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/folio"
    )]
    pub database_url: String,
}
