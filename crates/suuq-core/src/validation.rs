//! # Validation Module
//!
//! Input validation for the upload and contact forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web form                                                     │
//! │  ├── `required` attributes, number inputs                              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront services (Rust)                                   │
//! │  └── THIS MODULE: every rule re-checked before any network call        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK (price_cents >= 0)                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use suuq_core::validation::{validate_phone, validate_image_count};
//!
//! assert!(validate_phone("+252617211084").is_ok());
//! assert!(validate_image_count(0, 3).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Category, ProductDraft, SellerInfo};
use crate::MIN_PHONE_DIGITS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 5000;
const MAX_SHORT_FIELD_LEN: usize = 200;

// =============================================================================
// Validated Listing
// =============================================================================

/// Product form input that passed every rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedListing {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub price: Money,
    pub seller_info: SellerInfo,
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required free-text field and returns it trimmed.
///
/// ## Example
/// ```rust
/// use suuq_core::validation::validate_required;
///
/// assert_eq!(validate_required("location", "  Hodan ", 50).unwrap(), "Hodan");
/// assert!(validate_required("location", "   ", 50).is_err());
/// ```
pub fn validate_required(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Validates a product name.
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    validate_required("name", name, MAX_NAME_LEN)
}

/// Validates a seller phone number.
///
/// ## Rules
/// Same as the web form pattern `^\+?[0-9]{10,}$`:
/// - Optional leading `+`
/// - Then only ASCII digits, at least 10 of them
/// - No spaces or separators
///
/// ## Example
/// ```rust
/// use suuq_core::validation::validate_phone;
///
/// assert!(validate_phone("0617211084").is_ok());
/// assert!(validate_phone("+252 617211084").is_err());
/// assert!(validate_phone("12345").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);

    if digits.is_empty() {
        return Err(ValidationError::required("phone"));
    }

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(
            "phone",
            "must contain only digits, optionally starting with +",
        ));
    }

    if digits.len() < MIN_PHONE_DIGITS {
        return Err(ValidationError::invalid_format(
            "phone",
            format!("must have at least {} digits", MIN_PHONE_DIGITS),
        ));
    }

    Ok(())
}

/// Validates an email address.
///
/// Only the shape `local@domain` is checked; the authentication service
/// owns real verification.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = validate_required("email", email, MAX_SHORT_FIELD_LEN)?;

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email)
        }
        _ => Err(ValidationError::invalid_format(
            "email",
            "must look like name@example.com",
        )),
    }
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates the seller block of the upload form.
pub fn validate_seller_info(seller: &SellerInfo) -> ValidationResult<SellerInfo> {
    let name = validate_required("seller name", &seller.name, MAX_SHORT_FIELD_LEN)?;
    let email = validate_email(&seller.email)?;
    let phone = seller.phone.trim().to_string();
    validate_phone(&phone)?;
    let location = validate_required("location", &seller.location, MAX_SHORT_FIELD_LEN)?;

    Ok(SellerInfo {
        name,
        email,
        phone,
        location,
    })
}

/// Validates the whole upload form.
///
/// ## User Workflow
/// ```text
/// Seller fills the upload form
///      │
///      ▼
/// validate_draft() ← THIS FUNCTION
///      │
///      ├── missing field?   → "name is required"
///      ├── bad price?       → "price has invalid format: ..."
///      ├── unknown category → "category must be one of: [...]"
///      ├── bad phone?       → "phone has invalid format: ..."
///      │
///      └── OK → images are processed and uploaded
/// ```
pub fn validate_draft(draft: &ProductDraft) -> ValidationResult<ValidatedListing> {
    let name = validate_product_name(&draft.name)?;
    let description = validate_required("description", &draft.description, MAX_DESCRIPTION_LEN)?;
    let category: Category = draft.category.parse()?;
    let price = Money::parse_decimal(&draft.price)?;
    let seller_info = validate_seller_info(&draft.seller_info)?;

    Ok(ValidatedListing {
        name,
        description,
        category,
        price,
        seller_info,
    })
}

/// Validates a contact form submission, returning the trimmed fields.
pub fn validate_contact(
    name: &str,
    email: &str,
    subject: &str,
    message: &str,
) -> ValidationResult<(String, String, String, String)> {
    Ok((
        validate_required("name", name, MAX_SHORT_FIELD_LEN)?,
        validate_email(email)?,
        validate_required("subject", subject, MAX_SHORT_FIELD_LEN)?,
        validate_required("message", message, MAX_DESCRIPTION_LEN)?,
    ))
}

// =============================================================================
// Upload Validators
// =============================================================================

/// Validates how many images are attached to a submission.
///
/// ## Rules
/// - At least one image
/// - At most `max` images
pub fn validate_image_count(count: usize, max: usize) -> ValidationResult<()> {
    if count == 0 {
        return Err(ValidationError::NoImages);
    }

    if count > max {
        return Err(ValidationError::TooManyImages { max });
    }

    Ok(())
}

/// Validates a single selected file before any processing.
///
/// ## Rules
/// - Content type must start with `image/`
/// - Size must not exceed `max_bytes`
///
/// ## Example
/// ```rust
/// use suuq_core::validation::validate_image_file;
///
/// assert!(validate_image_file("a.png", "image/png", 1024, 5 * 1024 * 1024).is_ok());
/// assert!(validate_image_file("a.pdf", "application/pdf", 1024, 5 * 1024 * 1024).is_err());
/// ```
pub fn validate_image_file(
    file_name: &str,
    content_type: &str,
    size: usize,
    max_bytes: usize,
) -> ValidationResult<()> {
    if !content_type.trim().to_ascii_lowercase().starts_with("image/") {
        return Err(ValidationError::NotAnImage {
            file: file_name.to_string(),
            content_type: content_type.to_string(),
        });
    }

    if size > max_bytes {
        return Err(ValidationError::FileTooLarge {
            file: file_name.to_string(),
            size,
            max: max_bytes,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
