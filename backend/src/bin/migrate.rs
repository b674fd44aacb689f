//! Apply pending schema migrations to the calculations database.
//!
//! ```text
//! migrate --database-url postgres://calc@localhost/calc
//! DATABASE_URL=postgres://calc@localhost/calc migrate
//! ```

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(Debug, Parser)]
#[command(about = "Apply pending database migrations")]
struct Cli {
    /// PostgreSQL URL; falls back to `DATABASE_URL`.
    #[arg(long)]
    database_url: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let url = cli
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .ok_or_else(|| eyre!("pass --database-url or set DATABASE_URL"))?;

    let mut conn = PgConnection::establish(&url).wrap_err("failed to connect to database")?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| eyre!("migration failed: {err}"))?;
    for version in &applied {
        println!("applied {version}");
    }
    if applied.is_empty() {
        println!("schema is up to date");
    }
    Ok(())
}
