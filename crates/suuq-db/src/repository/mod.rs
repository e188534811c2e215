//! # Repository Module
//!
//! One repository per document collection.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Collections and Repositories                         │
//! │                                                                         │
//! │  Storefront port               Repository              Table           │
//! │  ───────────────               ──────────              ─────           │
//! │  ProductStore      ──────────► ProductRepository ────► products        │
//! │  NotificationSink  ──────────► NotificationRepository► notifications   │
//! │  AdminDirectory    ──────────► AdminRepository ──────► admins          │
//! │  ContactInbox      ──────────► ContactRepository ────► contacts        │
//! │  KeyValueStore     ──────────► KvRepository ─────────► kv_slots        │
//! │                                                                         │
//! │  The port impls live in suuq-storefront; repositories stay plain.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Listings and moderation status
//! - [`NotificationRepository`](notification::NotificationRepository) - Owner notifications
//! - [`AdminRepository`](admin::AdminRepository) - Administrator lookup
//! - [`ContactRepository`](contact::ContactRepository) - Contact form messages
//! - [`KvRepository`](kv::KvRepository) - Key-value slots

pub mod admin;
pub mod contact;
pub mod kv;
pub mod notification;
pub mod product;
