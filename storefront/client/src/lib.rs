//! # Medica storefront client
//!
//! Over-the-counter medicine storefront with three roles: customer, seller
//! and admin. All business data lives in the Medica backend, this crate only
//! talks to it.
//!
//! ## Layout
//! - [`api`]: REST transport, envelope decoding, cookie forwarding
//! - [`services`]: one wrapper per backend area
//! - [`cart`]: local cart mirror with optimistic updates and rollback
//! - [`checkout`]: order summary and order placement
//! - [`guard`]: role checks and dashboard redirects
//! - [`state`]: the [`state::Storefront`] handed to front ends
//!
//! ## Flow
//! - Build a [`config::Config`], create a [`state::Storefront`]
//! - The session and cart are fetched once on creation
//! - Cart mutations show up locally at once and are undone if the backend says no
//! - Checkout posts a cash-on-delivery order, then empties the cart
//!
//! ## Notes
//! - Totals are always derived from the cached cart lines. A server-side total
//!   is never consulted, so promotions or taxes applied by the backend would
//!   not show up here
//! - Nothing is retried
pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod format;
pub mod guard;
pub mod models;
pub mod services;
pub mod state;

pub use api::{ApiClient, Reply};
pub use cart::{CartItem, CartStore, Notice};
pub use checkout::{Checkout, OrderSummary, PlacedOrder};
pub use config::Config;
pub use error::{Error, Result};
pub use guard::{Access, Role};
pub use state::Storefront;
