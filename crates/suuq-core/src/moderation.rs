//! # Moderation Module
//!
//! The product status state machine and the owner notifications that
//! accompany each administrator decision.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Moderation Transitions                             │
//! │                                                                         │
//! │   from \ action      approve        reject         delete               │
//! │   ─────────────      ───────        ──────         ──────               │
//! │   pending            → approved     → rejected     → (removed)          │
//! │   approved           ✗ invalid      ✗ invalid      → (removed)          │
//! │   rejected           ✗ invalid      ✗ invalid      → (removed)          │
//! │                                                                         │
//! │   approved and rejected are terminal; there is no resubmission path.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult};
use crate::types::{ModerationAction, Notification, Product, ProductStatus};

// =============================================================================
// Transitions
// =============================================================================

/// Outcome of a permitted moderation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The product moves to a new status.
    SetStatus(ProductStatus),
    /// The product is removed from the store.
    Remove,
}

/// Checks whether `action` is permitted on a product in status `from`.
///
/// ## Example
/// ```rust
/// use suuq_core::moderation::{transition, Transition};
/// use suuq_core::{ModerationAction, ProductStatus};
///
/// assert_eq!(
///     transition("p-1", ProductStatus::Pending, ModerationAction::Approve).unwrap(),
///     Transition::SetStatus(ProductStatus::Approved)
/// );
/// assert!(transition("p-1", ProductStatus::Rejected, ModerationAction::Approve).is_err());
/// ```
pub fn transition(
    product_id: &str,
    from: ProductStatus,
    action: ModerationAction,
) -> CoreResult<Transition> {
    match (from, action) {
        (_, ModerationAction::Delete) => Ok(Transition::Remove),
        (ProductStatus::Pending, ModerationAction::Approve) => {
            Ok(Transition::SetStatus(ProductStatus::Approved))
        }
        (ProductStatus::Pending, ModerationAction::Reject) => {
            Ok(Transition::SetStatus(ProductStatus::Rejected))
        }
        (from, action) => Err(CoreError::InvalidTransition {
            product_id: product_id.to_string(),
            from,
            action,
        }),
    }
}

/// Error for a status write that found the product already resolved.
///
/// `target` is the status the write tried to set; it names the action
/// reported back (approved → approve, anything else → reject).
pub fn stale_write(product_id: &str, current: ProductStatus, target: ProductStatus) -> CoreError {
    let action = match target {
        ProductStatus::Approved => ModerationAction::Approve,
        _ => ModerationAction::Reject,
    };
    CoreError::InvalidTransition {
        product_id: product_id.to_string(),
        from: current,
        action,
    }
}

/// Applies a status transition to a local copy of a product, stamping the
/// timestamps the store would write.
///
/// - approve: `approved_at` and `updated_at`
/// - reject: `updated_at`
pub fn apply(product: &mut Product, status: ProductStatus, now: DateTime<Utc>) {
    product.status = status;
    product.updated_at = Some(now);
    if status == ProductStatus::Approved {
        product.approved_at = Some(now);
    }
}

// =============================================================================
// Owner Notifications
// =============================================================================

/// Message sent to the owner after an administrator decision.
pub fn notification_message(action: ModerationAction, product_name: &str) -> String {
    match action {
        ModerationAction::Approve => format!(
            "Your product \"{}\" has been approved and is now live on the marketplace.",
            product_name
        ),
        ModerationAction::Reject => format!(
            "Your product \"{}\" has been rejected. Please review our guidelines and try again.",
            product_name
        ),
        ModerationAction::Delete => format!(
            "Your product \"{}\" has been deleted from the marketplace.",
            product_name
        ),
    }
}

/// Builds the unread owner notification for an action on `product`.
pub fn owner_notification(
    product: &Product,
    action: ModerationAction,
    now: DateTime<Utc>,
) -> Notification {
    Notification {
        user_id: product.user_id.clone(),
        message: notification_message(action, &product.name),
        product_name: product.name.clone(),
        created_at: now,
        read: false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
