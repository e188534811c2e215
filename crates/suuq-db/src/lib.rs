//! # suuq-db: Document Store Layer for Suuq
//!
//! This crate provides persistence for the Suuq marketplace.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Suuq Data Flow                                   │
//! │                                                                         │
//! │  Storefront service (ModerationBoard::approve)                         │
//! │       │                                                                 │
//! │       ▼  through a port trait                                          │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     suuq-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────────┐  ┌──────────────┐ │   │
//! │  │   │   Database    │    │   Repositories    │  │  Migrations  │ │   │
//! │  │   │   (pool.rs)   │    │                   │  │  (embedded)  │ │   │
//! │  │   │               │    │ ProductRepository │  │              │ │   │
//! │  │   │ SqlitePool    │◄───│ NotificationRepo  │  │ 001_initial  │ │   │
//! │  │   │ Connection    │    │ AdminRepository   │  │   _schema    │ │   │
//! │  │   │ Management    │    │ ContactRepository │  │              │ │   │
//! │  │   │               │    │ KvRepository      │  │              │ │   │
//! │  │   └───────────────┘    └───────────────────┘  └──────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - One repository per collection
//!
//! ## Usage
//!
//! ```rust,ignore
//! use suuq_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("suuq.db")).await?;
//!
//! let pending = db.products().list_by_status(ProductStatus::Pending).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::admin::AdminRepository;
pub use repository::contact::ContactRepository;
pub use repository::kv::KvRepository;
pub use repository::notification::NotificationRepository;
pub use repository::product::ProductRepository;
