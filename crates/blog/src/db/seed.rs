//! Load resolved seed records into the `blog` schema.

use pressroom_core::seed::SeedRecords;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{info, instrument};

use crate::store::StoreError;

/// Replace all blog data with `records`.
///
/// Runs in a single transaction: existing rows are truncated (identity
/// sequences restarted), then users, categories, articles, and links are
/// inserted in that order. Database-assigned ids must equal the ids assigned
/// by [`SeedDocument::materialize`](pressroom_core::seed::SeedDocument::materialize).
///
/// # Errors
///
/// Returns `StoreError::Database` if any statement fails, or
/// `StoreError::DataCorruption` if the database assigns an unexpected id.
/// Nothing is committed on error.
#[instrument(skip_all, fields(articles = records.articles.len()))]
pub async fn load_seed(pool: &PgPool, records: &SeedRecords) -> Result<(), StoreError> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "TRUNCATE blog.article_categories, blog.articles, blog.categories, blog.users \
         RESTART IDENTITY CASCADE",
    )
    .execute(&mut *tx)
    .await?;

    for user in &records.users {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO blog.users (username, password, full_name, bio, avatar_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.full_name)
        .bind(&user.bio)
        .bind(&user.avatar_url)
        .fetch_one(&mut *tx)
        .await?;
        expect_id("user", user.id.as_i32(), id)?;
    }

    for category in &records.categories {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO blog.categories (name, slug) VALUES ($1, $2) RETURNING id",
        )
        .bind(&category.name)
        .bind(&category.slug)
        .fetch_one(&mut *tx)
        .await?;
        expect_id("category", category.id.as_i32(), id)?;
    }

    for article in &records.articles {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO blog.articles \
             (title, slug, excerpt, content, featured_image_url, reading_time, \
              author_id, published_at, is_featured) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING id",
        )
        .bind(&article.title)
        .bind(&article.slug)
        .bind(&article.excerpt)
        .bind(&article.content)
        .bind(&article.featured_image_url)
        .bind(article.reading_time)
        .bind(article.author_id)
        .bind(article.published_at)
        .bind(article.is_featured)
        .fetch_one(&mut *tx)
        .await?;
        expect_id("article", article.id.as_i32(), id)?;
    }

    insert_links(&mut tx, records).await?;

    tx.commit().await?;

    info!(
        users = records.users.len(),
        categories = records.categories.len(),
        articles = records.articles.len(),
        links = records.article_categories.len(),
        "Seed data loaded"
    );
    Ok(())
}

async fn insert_links(
    tx: &mut Transaction<'_, Postgres>,
    records: &SeedRecords,
) -> Result<(), StoreError> {
    for link in &records.article_categories {
        sqlx::query("INSERT INTO blog.article_categories (article_id, category_id) VALUES ($1, $2)")
            .bind(link.article_id)
            .bind(link.category_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

fn expect_id(kind: &str, expected: i32, actual: i32) -> Result<(), StoreError> {
    if expected == actual {
        Ok(())
    } else {
        Err(StoreError::DataCorruption(format!(
            "{kind} inserted with id {actual}, expected {expected}"
        )))
    }
}
