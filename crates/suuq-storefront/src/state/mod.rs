//! # State Module
//!
//! Per-session state held by the storefront.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────┐          ┌──────────────────────────────┐    │
//! │  │      CartStore       │          │        KeyValueStore         │    │
//! │  │                      │  set /   │                              │    │
//! │  │  Mutex<              │  remove  │  cart_alice = [{...}, ...]   │    │
//! │  │    session, Cart     │ ───────► │  cart_bob   = [...]          │    │
//! │  │  >                   │ ◄─────── │                              │    │
//! │  └──────────────────────┘   get    └──────────────────────────────┘    │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartStore: tokio Mutex held across the slot write                   │
//! │  • Two processes sharing a slot: last write wins                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;

pub use cart::{CartStore, CartSummary};
