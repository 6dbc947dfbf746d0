use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a failing rule result.
///
/// Identity fields:
/// - rule_id
/// - code
/// - target (settings key or `source:<name>`)
pub fn fingerprint_for_result(rule_id: &str, code: &str, target: &str) -> String {
    let canonical = [rule_id, code, target].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
