//! Core types and traits for the linkbox URL shortener.
//!
//! This crate provides the types shared by the persisters, the
//! shortener store and the HTTP gateway.

pub mod error;
pub mod persister;
pub mod record;
pub mod shortcode;
pub mod shortener;

pub use error::{Result, StoreError};
pub use persister::{LinkMap, Persister};
pub use record::{LinkRecord, Resolution, ShortenedLink};
pub use shortcode::ShortCode;
pub use shortener::Shortener;
