//! Ledger read operations: single asset, bulk listing by status, counts.

use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::db::Ledger;
use super::types::{AssetId, AssetRecord, AssetStatus, Grouping, StatusCounts};

const ASSET_COLUMNS: &str = r#"
    a.id, a.number, a.raw_name, a.owner_id, g.name AS owner_name,
    a.status, a.updated_at
"#;

fn asset_from_row(row: &SqliteRow) -> Result<AssetRecord> {
    let status: String = row.get("status");
    Ok(AssetRecord {
        id: row.get("id"),
        number: row.get("number"),
        raw_name: row.get("raw_name"),
        owner_id: row.get("owner_id"),
        owner_name: row.get("owner_name"),
        status: status.parse()?,
        updated_at: row.get("updated_at"),
    })
}

impl Ledger {
    /// Fetch one asset joined with its grouping's display name.
    pub async fn get_asset(&self, id: AssetId) -> Result<Option<AssetRecord>> {
        let sql = format!(
            "SELECT {} FROM assets a JOIN groupings g ON g.id = a.owner_id WHERE a.id = ?1",
            ASSET_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(asset_from_row).transpose()
    }

    /// List assets whose status is one of `statuses`, ordered by id.
    pub async fn list_assets_by_status(&self, statuses: &[AssetStatus]) -> Result<Vec<AssetRecord>> {
        if statuses.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = (1..=statuses.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT {} FROM assets a JOIN groupings g ON g.id = a.owner_id \
             WHERE a.status IN ({}) ORDER BY a.id ASC",
            ASSET_COLUMNS, placeholders
        );
        let mut query = sqlx::query(&sql);
        for status in statuses {
            query = query.bind(status.as_str());
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(asset_from_row).collect()
    }

    /// Current status of one asset, or None if it is not in the ledger.
    pub async fn get_status(&self, id: AssetId) -> Result<Option<AssetStatus>> {
        let row = sqlx::query("SELECT status FROM assets WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(r) => Ok(Some(r.get::<String, _>("status").parse()?)),
            None => Ok(None),
        }
    }

    /// Ids of the assets already stored for a grouping (ingestion skips these).
    pub async fn known_asset_ids(&self, owner_id: &str) -> Result<Vec<AssetId>> {
        let rows = sqlx::query("SELECT id FROM assets WHERE owner_id = ?1 ORDER BY id ASC")
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(|r| r.get("id")).collect())
    }

    pub async fn get_grouping(&self, id: &str) -> Result<Option<Grouping>> {
        let row = sqlx::query("SELECT id, name, title, lore FROM groupings WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| Grouping {
            id: r.get("id"),
            name: r.get("name"),
            title: r.get("title"),
            lore: r.get("lore"),
        }))
    }

    pub async fn status_counts(&self) -> Result<StatusCounts> {
        let rows = sqlx::query("SELECT status, COUNT(*) AS n FROM assets GROUP BY status")
            .fetch_all(&self.pool)
            .await?;
        let mut counts = StatusCounts::default();
        for row in rows {
            let status: String = row.get("status");
            let n: i64 = row.get("n");
            counts.add(status.parse()?, n.max(0) as u64);
        }
        Ok(counts)
    }
}
