//! Candidate URL resolution.
//!
//! The image host cannot be queried by skin name; it can only be asked for a
//! filename guessed from its naming and sharding conventions. Several
//! historical conventions exist, so each asset yields an ordered list of
//! candidates, most likely first. Everything here is pure.

mod naming;
mod shard;

pub use naming::{canonical_name, collapsed_name, derive_names, suffix_token_name};
pub use shard::{remote_file_name, shard_prefix, REMOTE_SUFFIX};

use crate::ledger::{AssetId, AssetRecord};

/// One guessed remote location for an asset. The position in the list is the try order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub asset_id: AssetId,
    /// Local file stem and remote name stem, e.g. `Ahri_Original`.
    pub derived_name: String,
    pub url: String,
}

/// Maps asset records to candidate lists against one image host.
#[derive(Debug, Clone)]
pub struct Resolver {
    base_url: String,
}

impl Resolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Ordered, non-empty candidate list for `asset`.
    pub fn candidates(&self, asset: &AssetRecord) -> Vec<Candidate> {
        derive_names(&asset.raw_name, &asset.owner_name, &asset.owner_id)
            .into_iter()
            .map(|derived_name| Candidate {
                asset_id: asset.id,
                url: self.url_for(&derived_name),
                derived_name,
            })
            .collect()
    }

    /// Sharded URL for one derived name:
    /// `{base}/{h[0]}/{h[0..2]}/{name}Skin_HD.jpg/revision/latest?cb=12`, `h = md5(file)`.
    pub fn url_for(&self, derived_name: &str) -> String {
        let file = remote_file_name(derived_name);
        let (first, first_two) = shard_prefix(&file);
        let raw = format!(
            "{}/{}/{}/{}/revision/latest?cb=12",
            self.base_url, first, first_two, file
        );
        // Percent-encode anything a request line cannot carry (non-ASCII, spaces).
        url::Url::parse(&raw).map(|u| u.to_string()).unwrap_or(raw)
    }
}
