//! SHA-256 checksum utility for change detection.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 checksum of a string as lowercase hex.
///
/// Stable across runs, processes, and platforms for identical content.
pub fn compute_checksum(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)
}
