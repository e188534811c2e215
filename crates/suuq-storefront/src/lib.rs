//! # suuq-storefront: Marketplace Services
//!
//! The application layer of the Suuq marketplace: cart, moderation,
//! product submission, catalog and contact form, each talking to the
//! outside world only through [`ports`].
//!
//! ## Module Organization
//! ```text
//! suuq_storefront/
//! ├── lib.rs              ◄─── You are here (wiring & tracing)
//! ├── config.rs           ◄─── StorefrontConfig (TOML + SUUQ_* env)
//! ├── error.rs            ◄─── StorefrontError, ErrorCode
//! ├── ports.rs            ◄─── Traits for every collaborator
//! ├── imaging.rs          ◄─── Downscale + JPEG re-encode
//! ├── adapters/
//! │   ├── db.rs           ◄─── suuq-db repositories as ports
//! │   ├── imgbb.rs        ◄─── Image host over HTTP
//! │   └── memory.rs       ◄─── In-process fakes
//! ├── state/
//! │   └── cart.rs         ◄─── CartStore (persisted per user)
//! └── services/
//!     ├── catalog.rs      ◄─── Home, browse, profile, detail
//!     ├── contact.rs      ◄─── Contact form
//!     ├── moderation.rs   ◄─── ModerationBoard (admin only)
//!     └── submission.rs   ◄─── Upload form → pending product
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing()              RUST_LOG or info,suuq=debug,sqlx=warn  │
//! │  2. StorefrontConfig::load()    defaults → file → env → validate       │
//! │  3. connect(&config)            SQLite + migrations, image host client │
//! │  4. services per session        CartStore::open, ModerationBoard::open │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod adapters;
pub mod config;
pub mod error;
pub mod imaging;
pub mod ports;
pub mod services;
pub mod state;

use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use suuq_db::{Database, DbConfig};

pub use config::StorefrontConfig;
pub use error::{ErrorCode, ErrorResponse, StorefrontError, StorefrontResult};
pub use ports::Ports;
pub use services::{Catalog, ContactForm, ImageUpload, ModerationBoard, SubmissionService};
pub use state::{CartStore, CartSummary};

/// Installs the global tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=suuq=trace` - Show trace for suuq crates only
/// - Default: `info,suuq=debug,sqlx=warn`
///
/// Calling it twice is harmless; the second call does nothing.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,suuq=debug,sqlx=warn"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Opens the database and the image host described by `config`.
pub async fn connect(config: &StorefrontConfig) -> StorefrontResult<Ports> {
    let db = Database::new(db_config(&config.database.path)?).await?;
    info!(path = ?config.database.path, "Database connected and migrations applied");

    let images = adapters::ImgbbHost::from_settings(&config.image_host)?;
    info!(endpoint = %config.image_host.endpoint, "Image host configured");

    Ok(Ports::from_database(&db, Arc::new(images)))
}

fn db_config(path: &Path) -> StorefrontResult<DbConfig> {
    if path == Path::new(":memory:") {
        return Ok(DbConfig::in_memory());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| StorefrontError::Config(format!("{}: {}", parent.display(), e)))?;
    }

    Ok(DbConfig::new(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_in_memory() {
        init_tracing();

        let mut config = StorefrontConfig::default();
        config.database.path = ":memory:".into();
        config.image_host.api_key = "test-key".into();

        let ports = connect(&config).await.unwrap();
        assert!(ports.products.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_connect_without_api_key_fails() {
        let mut config = StorefrontConfig::default();
        config.database.path = ":memory:".into();

        assert!(matches!(
            connect(&config).await,
            Err(StorefrontError::Config(_))
        ));
    }
}
