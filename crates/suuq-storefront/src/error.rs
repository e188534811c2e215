//! # Storefront Error Type
//!
//! Unified error type for every storefront service.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Suuq                                   │
//! │                                                                         │
//! │  Service call (e.g. ModerationBoard::approve)                          │
//! │       │                                                                 │
//! │       ├── no session ──────────────► Unauthenticated                    │
//! │       ├── not in admins ───────────► Forbidden                          │
//! │       ├── bad form / file ─────────► Validation(ValidationError)        │
//! │       ├── already approved ────────► InvalidTransition                  │
//! │       ├── product gone ────────────► NotFound                           │
//! │       └── DB / image host failed ──► Upstream { service, message }      │
//! │                                                                         │
//! │  The UI shows `user_message()`; logs get the full `Display` text.       │
//! │  Nothing is retried.                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use suuq_core::{CoreError, ModerationAction, ProductStatus, ValidationError};
use suuq_db::DbError;

/// Errors returned by storefront services.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// The operation needs a signed-in user.
    #[error("Please log in to continue")]
    Unauthenticated,

    /// The signed-in user is not an administrator.
    #[error("User {user_id} is not an administrator")]
    Forbidden { user_id: String },

    /// Form or file input was rejected before any network call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A moderation action is not allowed from the product's current status.
    #[error("Cannot {action} product {product_id}: status is {from}")]
    InvalidTransition {
        product_id: String,
        from: ProductStatus,
        action: ModerationAction,
    },

    /// The referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A collaborator (document store, image host, key-value store) failed.
    #[error("{service} failed: {message}")]
    Upstream { service: String, message: String },

    /// Configuration could not be loaded or is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl StorefrontError {
    /// Creates an Upstream error.
    pub fn upstream(service: impl Into<String>, message: impl ToString) -> Self {
        StorefrontError::Upstream {
            service: service.into(),
            message: message.to_string(),
        }
    }

    /// Creates a NotFound error.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StorefrontError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Machine-readable code for the frontend.
    pub fn code(&self) -> ErrorCode {
        match self {
            StorefrontError::Unauthenticated => ErrorCode::Unauthenticated,
            StorefrontError::Forbidden { .. } => ErrorCode::Forbidden,
            StorefrontError::Validation(_) => ErrorCode::ValidationError,
            StorefrontError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            StorefrontError::NotFound { .. } => ErrorCode::NotFound,
            StorefrontError::Upstream { .. } => ErrorCode::UpstreamFailure,
            StorefrontError::Config(_) => ErrorCode::Internal,
        }
    }

    /// Message safe to show to the acting user.
    ///
    /// Validation messages are shown as-is so the user can fix the form;
    /// upstream details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            StorefrontError::Unauthenticated => "Please log in to continue".to_string(),
            StorefrontError::Forbidden { .. } => {
                "You do not have permission to do that".to_string()
            }
            StorefrontError::Validation(e) => e.to_string(),
            StorefrontError::InvalidTransition { action, from, .. } => {
                format!(
                    "This product is already {} and cannot be {}",
                    from,
                    action.past_tense()
                )
            }
            StorefrontError::NotFound { entity, .. } => format!("{} not found", entity),
            StorefrontError::Upstream { .. } => {
                "Something went wrong. Please try again.".to_string()
            }
            StorefrontError::Config(_) => "The storefront is not configured correctly".to_string(),
        }
    }

    /// Serializable form for the frontend.
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code(),
            message: self.user_message(),
        }
    }
}

/// Error codes for frontend responses.
///
/// ## Usage in Frontend
/// ```typescript
/// switch (e.code) {
///   case 'UNAUTHENTICATED': navigate('/login'); break;
///   case 'VALIDATION_ERROR': showFormError(e.message); break;
///   default: alert(e.message);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Unauthenticated,
    Forbidden,
    ValidationError,
    InvalidTransition,
    NotFound,
    UpstreamFailure,
    Internal,
}

/// What the frontend receives when a call fails.
///
/// ```json
/// { "code": "VALIDATION_ERROR", "message": "You can only upload up to 3 images" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

/// Converts database errors.
///
/// Missing records keep their meaning; everything else is an upstream failure
/// of the document store.
impl From<DbError> for StorefrontError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => StorefrontError::NotFound { entity, id },
            other => {
                tracing::error!(error = %other, "Document store operation failed");
                StorefrontError::upstream("database", other)
            }
        }
    }
}

/// Converts core errors.
impl From<CoreError> for StorefrontError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidTransition {
                product_id,
                from,
                action,
            } => StorefrontError::InvalidTransition {
                product_id,
                from,
                action,
            },
            CoreError::Validation(e) => StorefrontError::Validation(e),
        }
    }
}

/// Result type for storefront operations.
pub type StorefrontResult<T> = Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_not_found_keeps_meaning() {
        let err: StorefrontError = DbError::not_found("Product", "p-1").into();
        assert!(matches!(err, StorefrontError::NotFound { .. }));
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[test]
    fn test_db_failure_is_upstream() {
        let err: StorefrontError = DbError::QueryFailed("disk I/O error".into()).into();
        assert!(matches!(err, StorefrontError::Upstream { ref service, .. } if service == "database"));
        assert_eq!(err.user_message(), "Something went wrong. Please try again.");
    }

    #[test]
    fn test_core_errors_convert() {
        let err: StorefrontError = CoreError::InvalidTransition {
            product_id: "p-1".into(),
            from: ProductStatus::Approved,
            action: ModerationAction::Approve,
        }
        .into();
        assert_eq!(err.code(), ErrorCode::InvalidTransition);
        assert_eq!(
            err.user_message(),
            "This product is already approved and cannot be approved"
        );

        let err: StorefrontError = CoreError::InvalidTransition {
            product_id: "p-1".into(),
            from: ProductStatus::Rejected,
            action: ModerationAction::Reject,
        }
        .into();
        assert_eq!(
            err.user_message(),
            "This product is already rejected and cannot be rejected"
        );

        let err: StorefrontError = CoreError::Validation(ValidationError::NoImages).into();
        assert_eq!(err.user_message(), "At least one image is required");
    }

    #[test]
    fn test_response_serialization() {
        let json = serde_json::to_value(StorefrontError::Unauthenticated.to_response()).unwrap();
        assert_eq!(json["code"], "UNAUTHENTICATED");
        assert_eq!(json["message"], "Please log in to continue");
    }
}
