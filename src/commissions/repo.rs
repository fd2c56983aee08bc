use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::commissions::repo_types::{Commission, NewCommission};

#[async_trait]
pub trait CommissionStore: Send + Sync {
    async fn create(&self, new: NewCommission) -> anyhow::Result<Commission>;
    async fn list(&self) -> anyhow::Result<Vec<Commission>>;
    /// Returns `false` when no row has that id.
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
    /// Deletes every row whose name is not in `keep`; returns the number removed.
    async fn delete_all_except(&self, keep: &[String]) -> anyhow::Result<u64>;
}

#[derive(Clone)]
pub struct PgCommissionStore {
    db: PgPool,
}

impl PgCommissionStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommissionStore for PgCommissionStore {
    async fn create(&self, new: NewCommission) -> anyhow::Result<Commission> {
        let row = sqlx::query_as::<_, Commission>(
            r#"
            INSERT INTO commissions (commision_name, commision_desc, commision_image, is_taken)
            VALUES ($1, $2, $3, FALSE)
            RETURNING id, commision_name, commision_desc, commision_image, is_taken
            "#,
        )
        .bind(&new.name)
        .bind(&new.desc)
        .bind(new.image.as_deref()) // Option<&[u8]> → NULL allowed
        .fetch_one(&self.db)
        .await
        .context("insert commission")?;
        Ok(row)
    }

    async fn list(&self) -> anyhow::Result<Vec<Commission>> {
        let rows = sqlx::query_as::<_, Commission>(
            r#"
            SELECT id, commision_name, commision_desc, commision_image, is_taken
              FROM commissions
             ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list commissions")?;
        Ok(rows)
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM commissions WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete commission")?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_all_except(&self, keep: &[String]) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM commissions WHERE NOT (commision_name = ANY($1))")
            .bind(keep.to_vec())
            .execute(&self.db)
            .await
            .context("bulk delete commissions")?;
        Ok(res.rows_affected())
    }
}

#[cfg(test)]
pub use memory::MemoryCommissionStore;
