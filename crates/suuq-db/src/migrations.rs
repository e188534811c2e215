//! # Database Migrations
//!
//! Embedded SQL migrations, applied on startup.
//!
//! ## Collections
//! ```text
//! ┌──────────────────┬───────────────────────────────────────────────────┐
//! │ Table            │ Holds                                             │
//! ├──────────────────┼───────────────────────────────────────────────────┤
//! │ products         │ listings + moderation status                      │
//! │ notifications    │ owner messages written on moderation              │
//! │ admins           │ user id → role flag                               │
//! │ contacts         │ contact form submissions                          │
//! │ kv_slots         │ local key-value slots (cart_<userId>)             │
//! └──────────────────┴───────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the `migrations/sqlite` directory.
///
/// The `sqlx::migrate!()` macro embeds every SQL file at compile time.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// Idempotent: applied migrations are tracked in `_sqlx_migrations`.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns `(total_migrations, applied_migrations)` for diagnostics.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((total, applied as usize))
}
