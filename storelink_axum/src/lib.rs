//! Axum integration for the storelink identity federation library.
//!
//! Provides a ready-made router for the federation endpoints and an
//! `AuthUser` extractor for protecting application routes.
//!
//! ```no_run
//! use axum::Router;
//! use storelink_axum::{SL_ROUTE_PREFIX, federation_router};
//!
//! # async fn build() {
//! storelink::init().await.expect("store init failed");
//!
//! let app: Router = Router::new().nest(SL_ROUTE_PREFIX.as_str(), federation_router());
//! # }
//! ```

mod error;
mod federation;
mod session;

pub use federation::federation_router;
pub use session::{AuthRejection, AuthUser};

// Re-exported so integrators only need this crate in scope
pub use storelink::{SESSION_COOKIE_NAME, SL_ROUTE_PREFIX, SessionSnapshot, SessionUser};
