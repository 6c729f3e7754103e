//! # flover-api
//!
//! HTTP API layer for the Flovermaps checkout backend.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check (204) |
//! | POST | `/create-checkout-session` | Create a Stripe checkout session |
//! | GET | `/session?id=...` | Read a session back after payment |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
