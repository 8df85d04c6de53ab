//! Derived-name conventions for splash art filenames.

/// `nameA`: skin name without the champion name, `/`, `:` and whitespace,
/// prefixed with the champion name (spaces as `_`).
///
/// `("Original Ahri", "Ahri")` → `"Ahri_Original"`,
/// `("K/DA Ahri", "Ahri")` → `"Ahri_KDA"`.
pub fn canonical_name(raw_name: &str, owner_name: &str) -> String {
    let without_owner = if owner_name.is_empty() {
        raw_name.to_string()
    } else {
        raw_name.replacen(owner_name, "", 1)
    };
    let stem: String = without_owner
        .chars()
        .filter(|c| *c != '/' && *c != ':' && !c.is_whitespace())
        .collect();
    let prefix = owner_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{}_{}", prefix, stem)
}

/// `nameB`: last `_` token of `nameA`, for sources that keep only the suffix.
pub fn suffix_token_name(name_a: &str) -> &str {
    name_a.rsplit('_').next().unwrap_or(name_a)
}

/// `nameC`: champion id, `_`, then every `_` token of `nameA` run together.
pub fn collapsed_name(owner_id: &str, name_a: &str) -> String {
    let joined: String = name_a.split('_').collect();
    format!("{}_{}", owner_id, joined)
}

/// `[nameA, nameB, nameC]` with empty and repeated names dropped (first wins).
pub fn derive_names(raw_name: &str, owner_name: &str, owner_id: &str) -> Vec<String> {
    let name_a = canonical_name(raw_name, owner_name);
    let name_b = suffix_token_name(&name_a).to_string();
    let name_c = collapsed_name(owner_id, &name_a);

    let mut out: Vec<String> = Vec::with_capacity(3);
    for name in [name_a, name_b, name_c] {
        if !name.is_empty() && !out.contains(&name) {
            out.push(name);
        }
    }
    out
}
