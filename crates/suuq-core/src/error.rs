//! # Error Types
//!
//! Domain-specific error types for suuq-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  suuq-core errors (this file)                                          │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Form / upload input failures                   │
//! │                                                                         │
//! │  suuq-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  suuq-storefront errors                                                │
//! │  └── StorefrontError  - What the acting user sees                      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StorefrontError → UI message      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::{ModerationAction, ProductStatus};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A moderation action was attempted from a state that does not allow it.
    ///
    /// ## When This Occurs
    /// - Approving a product that is already approved or rejected
    /// - Rejecting a product that is already approved or rejected
    #[error("Cannot {action} product {product_id}: status is {from}")]
    InvalidTransition {
        product_id: String,
        from: ProductStatus,
        action: ModerationAction,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are raised before any network call so the user can correct the
/// form and retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range (e.g. a cart quantity above the line limit).
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid phone number, invalid price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// At least one image must be attached.
    #[error("At least one image is required")]
    NoImages,

    /// Too many images attached to a single submission.
    #[error("You can only upload up to {max} images")]
    TooManyImages { max: usize },

    /// Uploaded file is not an image.
    #[error("{file} is not an image (content type {content_type})")]
    NotAnImage { file: String, content_type: String },

    /// Uploaded file is above the size ceiling.
    #[error("{file} is {size} bytes; each image must be at most {max} bytes")]
    FileTooLarge { file: String, size: usize, max: usize },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Shorthand for [`ValidationError::InvalidFormat`].
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_message() {
        let err = CoreError::InvalidTransition {
            product_id: "p-1".to_string(),
            from: ProductStatus::Approved,
            action: ModerationAction::Reject,
        };
        assert_eq!(
            err.to_string(),
            "Cannot reject product p-1: status is approved"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("name").to_string(), "name is required");
        assert_eq!(
            ValidationError::TooManyImages { max: 3 }.to_string(),
            "You can only upload up to 3 images"
        );
    }

    #[test]
    fn test_out_of_range_message() {
        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 999,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::NoImages.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
