//! URL shortener store implementation.
//!
//! This crate provides [`ShortLinkStore`], the owner of the link mapping.
//! Core types are re-exported from `linkbox_core`.

pub mod service;
pub mod settings;

pub use linkbox_core::{LinkRecord, Resolution, ShortenedLink, Shortener, StoreError};
pub use service::ShortLinkStore;
pub use settings::StoreSettings;
