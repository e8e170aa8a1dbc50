use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Asset record: a held position owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Asset {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    pub quantity: f64,
    pub cost_basis: f64,
    #[serde(skip_serializing)]
    pub owner_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Asset {
    pub async fn list_by_owner(db: &PgPool, owner_id: i64) -> anyhow::Result<Vec<Asset>> {
        let rows = sqlx::query_as::<_, Asset>(
            r#"
            SELECT id, name, asset_type, quantity, cost_basis, owner_id, created_at
            FROM assets
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn create(
        db: &PgPool,
        owner_id: i64,
        name: &str,
        asset_type: &str,
        quantity: f64,
        cost_basis: f64,
    ) -> anyhow::Result<Asset> {
        let asset = sqlx::query_as::<_, Asset>(
            r#"
            INSERT INTO assets (name, asset_type, quantity, cost_basis, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, asset_type, quantity, cost_basis, owner_id, created_at
            "#,
        )
        .bind(name)
        .bind(asset_type)
        .bind(quantity)
        .bind(cost_basis)
        .bind(owner_id)
        .fetch_one(db)
        .await?;
        Ok(asset)
    }

    /// Ownership-filtered lookup: `None` for an unknown id and for an id
    /// owned by someone else, indistinguishably.
    pub async fn find_by_owner(
        db: &PgPool,
        owner_id: i64,
        asset_id: i64,
    ) -> anyhow::Result<Option<Asset>> {
        let asset = sqlx::query_as::<_, Asset>(
            r#"
            SELECT id, name, asset_type, quantity, cost_basis, owner_id, created_at
            FROM assets
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(asset_id)
        .bind(owner_id)
        .fetch_optional(db)
        .await?;
        Ok(asset)
    }

    /// Writes the full field set; callers merge partial updates beforehand.
    pub async fn update(
        db: &PgPool,
        owner_id: i64,
        asset_id: i64,
        name: &str,
        asset_type: &str,
        quantity: f64,
        cost_basis: f64,
    ) -> anyhow::Result<Option<Asset>> {
        let asset = sqlx::query_as::<_, Asset>(
            r#"
            UPDATE assets
            SET name = $3, asset_type = $4, quantity = $5, cost_basis = $6
            WHERE id = $1 AND owner_id = $2
            RETURNING id, name, asset_type, quantity, cost_basis, owner_id, created_at
            "#,
        )
        .bind(asset_id)
        .bind(owner_id)
        .bind(name)
        .bind(asset_type)
        .bind(quantity)
        .bind(cost_basis)
        .fetch_optional(db)
        .await?;
        Ok(asset)
    }

    pub async fn delete(db: &PgPool, owner_id: i64, asset_id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1 AND owner_id = $2")
            .bind(asset_id)
            .bind(owner_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
