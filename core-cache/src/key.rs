//! Cache key derivation
//!
//! A cache key is the on-disk name of a cached asset. The same source URL
//! always maps to the same key, distinct URLs map to distinct keys, and the
//! result is safe to use as a single filesystem path component.

use sha2::{Digest, Sha256};
use url::Url;

use crate::error::{CacheError, Result};

/// Parse a caller-supplied source URL string.
pub fn parse_source_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|_| CacheError::InvalidSourceUrl(raw.to_string()))
}

/// Derive the cache key for a source URL.
///
/// The key is the lowercase hex SHA-256 of the URL with its fragment
/// stripped (fragments never reach the server, so they cannot change the
/// payload), plus the URL path's file extension when it has one, keeping
/// cached media recognizable to external tooling.
pub fn derive_cache_key(url: &Url) -> String {
    let mut normalized = url.clone();
    normalized.set_fragment(None);

    let mut hasher = Sha256::new();
    hasher.update(normalized.as_str().as_bytes());
    let digest = format!("{:x}", hasher.finalize());

    match path_extension(&normalized) {
        Some(ext) => format!("{}.{}", digest, ext),
        None => digest,
    }
}

fn path_extension(url: &Url) -> Option<String> {
    let name = url.path().rsplit('/').next()?;
    let (stem, ext) = name.rsplit_once('.')?;

    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    Some(ext.to_ascii_lowercase())
}
