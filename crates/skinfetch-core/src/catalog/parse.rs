//! Catalog JSON documents (only the fields ingestion reads).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::ledger::{Grouping, NewAsset};

/// `champion.json`: every champion keyed by id.
#[derive(Debug, Deserialize)]
pub struct ChampionIndex {
    pub data: BTreeMap<String, ChampionSummary>,
}

#[derive(Debug, Deserialize)]
pub struct ChampionSummary {
    pub id: String,
    pub name: String,
}

/// `champion/<id>.json`: one champion with lore and skins, keyed by id.
#[derive(Debug, Deserialize)]
pub struct ChampionDocument {
    pub data: BTreeMap<String, ChampionDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChampionDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub lore: String,
    #[serde(default)]
    pub skins: Vec<SkinEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkinEntry {
    /// Numeric id sent as a string, e.g. `"103000"`.
    pub id: String,
    pub num: i64,
    pub name: String,
}

/// Name the catalog uses for a champion's base skin.
pub const DEFAULT_SKIN_NAME: &str = "default";

impl ChampionDetail {
    pub fn grouping(&self) -> Grouping {
        Grouping {
            id: self.id.clone(),
            name: self.name.clone(),
            title: self.title.clone(),
            lore: self.lore.clone(),
        }
    }

    /// Skins as ledger rows; the base skin becomes `Original <Name>`.
    pub fn assets(&self) -> Result<Vec<NewAsset>> {
        self.skins
            .iter()
            .map(|skin| {
                let id: i64 = skin
                    .id
                    .trim()
                    .parse()
                    .with_context(|| format!("skin id {:?} of {} is not numeric", skin.id, self.id))?;
                let raw_name = if skin.name == DEFAULT_SKIN_NAME {
                    format!("Original {}", self.name)
                } else {
                    skin.name.clone()
                };
                Ok(NewAsset {
                    id,
                    number: skin.num,
                    raw_name,
                    owner_id: self.id.clone(),
                })
            })
            .collect()
    }
}

impl ChampionDocument {
    /// The single champion in the document.
    pub fn into_detail(self, id: &str) -> Result<ChampionDetail> {
        let mut data = self.data;
        data.remove(id)
            .or_else(|| data.into_values().next())
            .ok_or_else(|| anyhow::anyhow!("champion document for {} has no data", id))
    }
}
