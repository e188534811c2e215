//! # Moderation Board
//!
//! The administrator's review queue: approve, reject or delete submissions.
//!
//! ## Action Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  approve(id)                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. ensure_admin ───────── no session ──► Unauthenticated              │
//! │       │                  └ not admin ───► Forbidden                    │
//! │       ▼                                                                 │
//! │  2. get_product ────────── missing ─────► NotFound                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. transition(status, action) ── not pending ──► InvalidTransition    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. update_status, then re-read ── mismatch ──► Upstream               │
//! │     (pending rows only) ── resolved meanwhile ──► InvalidTransition    │
//! │     (delete: delete_product)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  5. notify owner ───────── fails ───────► logged, action still Ok      │
//! │                                                                         │
//! │  ALWAYS: refresh() from the store, whatever happened above.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use suuq_core::catalog::{moderation_view, StatusFilter};
use suuq_core::moderation::{owner_notification, transition, Transition};
use suuq_core::{ModerationAction, Product, ProductStatus, Session};

use crate::error::{StorefrontError, StorefrontResult};
use crate::ports::Ports;

/// Number of products per status, for the board's tab badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub total: usize,
}

/// Admin-only moderation state for one session.
///
/// The product list is never edited locally; it is replaced by a fresh read
/// from the store after every action.
pub struct ModerationBoard {
    ports: Ports,
    session: Option<Session>,
    filter: StatusFilter,
    products: Vec<Product>,
}

impl ModerationBoard {
    /// Creates an empty board. Call [`refresh`](Self::refresh) to load it.
    pub fn new(ports: &Ports, session: Option<Session>) -> Self {
        ModerationBoard {
            ports: ports.clone(),
            session,
            filter: StatusFilter::default(),
            products: Vec::new(),
        }
    }

    /// Creates a board and loads it. Fails for non-administrators.
    pub async fn open(ports: &Ports, session: Option<Session>) -> StorefrontResult<Self> {
        let mut board = Self::new(ports, session);
        board.refresh().await?;
        Ok(board)
    }

    /// Checks that the session belongs to an administrator.
    pub async fn ensure_admin(&self) -> StorefrontResult<&Session> {
        let session = self
            .session
            .as_ref()
            .ok_or(StorefrontError::Unauthenticated)?;

        if !self.ports.admins.is_admin(&session.user_id).await? {
            warn!(user_id = %session.user_id, "Moderation attempted by non-admin");
            return Err(StorefrontError::Forbidden {
                user_id: session.user_id.clone(),
            });
        }

        Ok(session)
    }

    /// Reloads every product from the store.
    pub async fn refresh(&mut self) -> StorefrontResult<()> {
        self.ensure_admin().await?;
        self.products = self.ports.products.list_products().await?;
        debug!(count = self.products.len(), "Moderation board refreshed");
        Ok(())
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Approves a pending product and notifies its owner.
    pub async fn approve(&mut self, product_id: &str) -> StorefrontResult<()> {
        self.act(product_id, ModerationAction::Approve).await
    }

    /// Rejects a pending product and notifies its owner.
    pub async fn reject(&mut self, product_id: &str) -> StorefrontResult<()> {
        self.act(product_id, ModerationAction::Reject).await
    }

    /// Deletes a product in any status and notifies its owner.
    pub async fn delete(&mut self, product_id: &str) -> StorefrontResult<()> {
        self.act(product_id, ModerationAction::Delete).await
    }

    async fn act(&mut self, product_id: &str, action: ModerationAction) -> StorefrontResult<()> {
        let outcome = self.perform(product_id, action).await;

        if let Err(e) = &outcome {
            warn!(product_id = %product_id, %action, error = %e, "Moderation action failed");
        }

        // An action failure outranks a refresh failure.
        match (outcome, self.refresh().await) {
            (Err(e), _) => Err(e),
            (Ok(()), Err(e)) => {
                warn!(error = %e, "Board refresh failed after moderation action");
                Err(e)
            }
            (Ok(()), Ok(())) => Ok(()),
        }
    }

    async fn perform(&self, product_id: &str, action: ModerationAction) -> StorefrontResult<()> {
        let admin = self.ensure_admin().await?;
        let products = &self.ports.products;

        let product = products
            .get_product(product_id)
            .await?
            .ok_or_else(|| StorefrontError::not_found("Product", product_id))?;

        let now = Utc::now();
        match transition(&product.id, product.status, action)? {
            Transition::SetStatus(status) => {
                products.update_status(&product.id, status, now).await?;
                self.verify_status(&product.id, status).await?;
            }
            Transition::Remove => products.delete_product(&product.id).await?,
        }

        info!(
            admin = %admin.user_id,
            product_id = %product.id,
            %action,
            "Moderation action applied"
        );

        let notification = owner_notification(&product, action, now);
        if let Err(e) = self.ports.notifications.notify(&notification).await {
            warn!(
                owner = %product.user_id,
                product_id = %product.id,
                error = %e,
                "Owner notification failed"
            );
        }

        Ok(())
    }

    /// Re-reads the product and checks the stored status.
    async fn verify_status(&self, product_id: &str, expected: ProductStatus) -> StorefrontResult<()> {
        let stored = self.ports.products.get_product(product_id).await?;
        match stored.map(|p| p.status) {
            Some(status) if status == expected => Ok(()),
            other => {
                error!(product_id = %product_id, expected = %expected, stored = ?other, "Status write not visible");
                Err(StorefrontError::upstream(
                    "database",
                    "Failed to update product status",
                ))
            }
        }
    }

    // =========================================================================
    // Views
    // =========================================================================

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    /// Products matching the current filter.
    pub fn products(&self) -> Vec<Product> {
        moderation_view(&self.products, self.filter)
    }

    /// Everything loaded by the last refresh.
    pub fn all_products(&self) -> &[Product] {
        &self.products
    }

    pub fn counts(&self) -> StatusCounts {
        self.products
            .iter()
            .fold(StatusCounts::default(), |mut counts, p| {
                match p.status {
                    ProductStatus::Pending => counts.pending += 1,
                    ProductStatus::Approved => counts.approved += 1,
                    ProductStatus::Rejected => counts.rejected += 1,
                }
                counts.total += 1;
                counts
            })
    }
}
