//! # Product Repository
//!
//! Database operations for products.
//!
//! Stock changes arrive here through two doors only: a full `update` (user
//! edits the product) or `set_quantity` (the ledger applying a transaction's
//! stock rule). Nothing in this module decides *what* the new quantity is.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use keeper_core::Product;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products, sorted by name.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                id, name, category, cost_cents, sale_price_cents,
                quantity, supplier, min_stock, image, created_at, updated_at
            FROM products
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - product found
    /// * `Ok(None)` - product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                id, name, category, cost_cents, sale_price_cents,
                quantity, supplier, min_stock, image, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product (id and timestamps already assigned).
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, category, cost_cents, sale_price_cents,
                quantity, supplier, min_stock, image, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.cost_cents)
        .bind(product.sale_price_cents)
        .bind(product.quantity)
        .bind(&product.supplier)
        .bind(product.min_stock)
        .bind(&product.image)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing product, stamping `updated_at`.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - product doesn't exist
    pub async fn update(&self, product: &Product, now: DateTime<Utc>) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                category = ?3,
                cost_cents = ?4,
                sale_price_cents = ?5,
                quantity = ?6,
                supplier = ?7,
                min_stock = ?8,
                image = ?9,
                updated_at = ?10
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.cost_cents)
        .bind(product.sale_price_cents)
        .bind(product.quantity)
        .bind(&product.supplier)
        .bind(product.min_stock)
        .bind(&product.image)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Sets a product's stock level to an absolute value.
    ///
    /// The new value is computed by the caller from the transaction's stock
    /// rule; this method just persists it.
    pub async fn set_quantity(&self, id: &str, quantity: i64, now: DateTime<Utc>) -> DbResult<()> {
        debug!(id = %id, quantity = %quantity, "Setting product quantity");

        let result = sqlx::query(
            r#"
            UPDATE products SET quantity = ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Deletes a product.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
