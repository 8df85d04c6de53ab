//! Ledger write operations: groupings, new assets, status transitions.

use anyhow::Result;

use super::db::{unix_timestamp, Ledger};
use super::types::{AssetId, AssetStatus, Grouping, LedgerError, NewAsset};

impl Ledger {
    /// Insert or refresh a champion row.
    pub async fn upsert_grouping(&self, grouping: &Grouping) -> Result<()> {
        let now = unix_timestamp();
        sqlx::query(
            r#"
            INSERT INTO groupings (id, name, title, lore, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                title = excluded.title,
                lore = excluded.lore,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&grouping.id)
        .bind(&grouping.name)
        .bind(&grouping.title)
        .bind(&grouping.lore)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert a new `Pending` asset. Returns false if the id already exists;
    /// an existing row (and its status) is never touched.
    pub async fn insert_asset_if_absent(&self, asset: &NewAsset) -> Result<bool> {
        let now = unix_timestamp();
        let r = sqlx::query(
            r#"
            INSERT OR IGNORE INTO assets (
                id, number, raw_name, owner_id, status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(asset.id)
        .bind(asset.number)
        .bind(&asset.raw_name)
        .bind(&asset.owner_id)
        .bind(AssetStatus::Pending.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(r.rows_affected() == 1)
    }

    /// Write `status` for one asset if the transition is legal.
    ///
    /// The check and the write happen in one UPDATE, so concurrent writers for
    /// the same asset cannot interleave between them.
    pub async fn update_status(&self, id: AssetId, status: AssetStatus) -> Result<()> {
        let sources = status.allowed_sources();
        let placeholders = (0..sources.len())
            .map(|i| format!("?{}", i + 4))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE assets SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status IN ({})",
            placeholders
        );
        let mut query = sqlx::query(&sql)
            .bind(status.as_str())
            .bind(unix_timestamp())
            .bind(id);
        for source in sources {
            query = query.bind(source.as_str());
        }
        let r = query.execute(&self.pool).await?;
        if r.rows_affected() == 1 {
            tracing::debug!(asset = id, %status, "status written");
            return Ok(());
        }

        match self.get_status(id).await? {
            None => Err(LedgerError::UnknownAsset(id).into()),
            Some(from) => Err(LedgerError::IllegalTransition {
                id,
                from,
                to: status,
            }
            .into()),
        }
    }
}
