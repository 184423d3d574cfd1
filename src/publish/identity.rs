use sha2::{Digest, Sha256};

/// Length of the hex identifier prefix used for post filenames.
const ID_LEN: usize = 10;

/// Derive the stable identifier for an entry.
///
/// First 10 lowercase hex characters of SHA-256 over the entry's link, or
/// over its title when the link is empty. Identical input always yields the
/// identical identifier; accidental collisions between distinct entries are
/// accepted rather than mitigated.
pub fn entry_id(link: &str, title: &str) -> String {
    let key = if link.is_empty() { title } else { link };
    let hash = Sha256::digest(key.as_bytes());
    let hex = format!("{:x}", hash);
    hex[..ID_LEN].to_string()
}
