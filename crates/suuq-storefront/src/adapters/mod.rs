//! # Adapters
//!
//! Concrete implementations of the [`ports`](crate::ports).
//!
//! - [`db`] - SQLite repositories from `suuq-db`
//! - [`imgbb`] - ImgBB-compatible image host over HTTP
//! - [`memory`] - In-process fakes for tests and local development

pub mod db;
pub mod imgbb;
pub mod memory;

pub use imgbb::ImgbbHost;
