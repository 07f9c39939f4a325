//! Business logic services for the blog.
//!
//! # Services
//!
//! - `newsletter` - Newsletter signup validation and hand-off

pub mod newsletter;

pub use newsletter::{LogMailingList, MailingList, NewsletterError};
