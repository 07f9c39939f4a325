//! Pressroom Core - Shared domain types.
//!
//! This crate provides the types shared by every Pressroom component:
//! - `blog` - Article catalog HTTP service
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP. The optional `postgres` feature adds `sqlx` encoding for
//! ids and row decoding for the models.
//!
//! # Modules
//!
//! - [`types`] - Type-safe ids, emails, and slugs
//! - [`models`] - Users, categories, articles, and enriched articles
//! - [`seed`] - The YAML seed document used to populate a store

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod seed;
pub mod types;

pub use models::*;
pub use types::*;
