//! Local artifact cache: path mapping, existence probe, atomic commit.
//!
//! An artifact is written to `<name>.jpg.<n>.part` and renamed into place, so a
//! present `<name>.jpg` is always complete and is the proof of acquisition.
//! `<n>` is unique per commit: assets of different champions can share a
//! derived name and be committed at the same time.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::AsyncWriteExt;

/// Extension of every committed artifact.
pub const ARTIFACT_EXT: &str = "jpg";

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

static COMMIT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Path for one commit's temp file: `a.jpg` + token 7 → `a.jpg.<pid>-7.part`.
pub fn temp_path(final_path: &Path, token: u64) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(format!(".{}-{}{}", std::process::id(), token, TEMP_SUFFIX));
    PathBuf::from(o)
}

#[derive(Debug, Clone)]
pub struct ArtifactCache {
    dir: PathBuf,
}

impl ArtifactCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `dir/<derived_name>.jpg`
    pub fn path_for(&self, derived_name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", derived_name, ARTIFACT_EXT))
    }

    pub fn contains(&self, derived_name: &str) -> bool {
        self.path_for(derived_name).is_file()
    }

    /// Write `bytes` as the artifact for `derived_name`, creating directories on demand.
    pub async fn commit(&self, derived_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let final_path = self.path_for(derived_name);
        if let Some(parent) = final_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create artifact dir {}", parent.display()))?;
        }

        let tmp = temp_path(&final_path, COMMIT_SEQ.fetch_add(1, Ordering::Relaxed));
        let mut file = tokio::fs::File::create(&tmp)
            .await
            .with_context(|| format!("create {}", tmp.display()))?;
        file.write_all(bytes)
            .await
            .with_context(|| format!("write {}", tmp.display()))?;
        file.sync_all().await.context("artifact sync failed")?;
        drop(file);

        if let Err(e) = tokio::fs::rename(&tmp, &final_path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e).with_context(|| {
                format!("failed to rename {} to {}", tmp.display(), final_path.display())
            });
        }
        Ok(final_path)
    }
}
