use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::info;

use connection::PgPool;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub fn run_migrations(pool: &PgPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    info!("applied {} pending migrations", applied.len());
    Ok(())
}

pub mod connection;
pub mod models;
pub mod schema;
pub mod store;

pub use store::PgStore;
