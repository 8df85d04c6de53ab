//! Hash-sharded remote paths.

/// Appended to every derived name to form the remote filename.
pub const REMOTE_SUFFIX: &str = "Skin_HD.jpg";

pub fn remote_file_name(derived_name: &str) -> String {
    format!("{}{}", derived_name, REMOTE_SUFFIX)
}

/// First hex digit and first two hex digits of `md5(file_name)`.
pub fn shard_prefix(file_name: &str) -> (String, String) {
    let digest = hex::encode(md5::compute(file_name.as_bytes()).0);
    (digest[..1].to_string(), digest[..2].to_string())
}
