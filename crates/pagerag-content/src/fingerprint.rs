use std::collections::BTreeMap;

use serde_json::json;
use sha2::{Digest, Sha256};

use crate::page::PageFields;

/// SHA-256 fingerprint of a page's indexable identity, for change tracking
/// in logs. Canonical form: sorted-key JSON over id, title, url, searchable
/// content, content type, last-updated and language.
pub fn page_fingerprint(page: &dyn PageFields) -> String {
    let mut fields: BTreeMap<&str, serde_json::Value> = BTreeMap::new();
    fields.insert("id", json!(page.id().0));
    fields.insert("title", json!(page.title()));
    fields.insert("url", json!(page.full_url().unwrap_or_default()));
    fields.insert("content", json!(page.searchable_content().join(" ")));
    fields.insert("type", json!(page.content_type()));
    fields.insert(
        "last_updated",
        page.last_published_at()
            .map(|at| json!(at.to_rfc3339()))
            .unwrap_or(serde_json::Value::Null),
    );
    fields.insert("language", json!(page.locale()));

    let canonical = serde_json::to_string(&fields).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}
