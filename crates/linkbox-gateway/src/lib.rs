//! HTTP gateway for the linkbox URL shortener.
//!
//! Translates HTTP requests into [`Shortener`](linkbox_core::Shortener)
//! calls and wraps every result in a `{ success, data | error }` envelope.

pub mod app;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use state::AppState;
