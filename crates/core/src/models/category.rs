//! Category model.

use serde::{Deserialize, Serialize};

use crate::types::CategoryId;

/// An article category such as "Tutorials".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}
