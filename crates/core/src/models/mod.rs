//! Blog domain models.
//!
//! These mirror the persisted rows one-to-one, except [`ArticleWithDetails`],
//! which is an article joined with its author and categories.

pub mod article;
pub mod category;
pub mod user;

pub use article::{Article, ArticleCategory, ArticleWithDetails};
pub use category::Category;
pub use user::User;
