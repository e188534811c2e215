//! Storefront services.
//!
//! Each service holds a clone of [`Ports`](crate::ports::Ports) and is cheap
//! to construct per request or per session.

pub mod catalog;
pub mod contact;
pub mod moderation;
pub mod submission;

pub use catalog::Catalog;
pub use contact::ContactForm;
pub use moderation::{ModerationBoard, StatusCounts};
pub use submission::{ImageUpload, SubmissionService};
