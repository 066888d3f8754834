// SPDX-License-Identifier: Apache-2.0
//! Signing-key derivation and the process-global signing-key cache.

use std::collections::HashMap;
use std::sync::Mutex;

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts a key of any length");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// Derive the SigV4 signing key via four chained HMAC-SHA-256 calls.
/// `short_date` is `YYYYMMDD` UTC.
#[must_use]
pub fn derive_signing_key(secret_access_key: &str, short_date: &str, region: &str, service: &str) -> [u8; 32] {
    let k_date = hmac_sha256(format!("AWS4{secret_access_key}").as_bytes(), short_date.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, service.as_bytes());
    hmac_sha256(&k_service, b"aws4_request")
}

/// Sign `message` with a previously derived `signing_key`, returning the
/// hex-encoded signature — the final HMAC of the string-to-sign.
#[must_use]
pub fn sign(signing_key: &[u8; 32], message: &str) -> String {
    hex::encode(hmac_sha256(signing_key, message.as_bytes()))
}

/// Default bounded capacity for [`SigningKeyCache`] ("e.g., 300").
pub const DEFAULT_CACHE_CAPACITY: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    secret_access_key: String,
    region: String,
    service: String,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    signing_key: [u8; 32],
    derived_on: String,
}

/// A bounded, LRU-evicted cache from `(secret, region, service)` to a
/// derived signing key, valid only on the UTC date it was derived.
/// Process-global, concurrently readable and writable under a single
/// mutex.
///
/// A stale entry (derived on a prior date) is never returned from
/// [`Self::get_or_derive`] as-is: it is simply recomputed and the cache
/// entry replaced. Stale reads always trigger a recompute safely, since
/// entries are content-addressable.
#[derive(Debug)]
pub struct SigningKeyCache {
    capacity: usize,
    inner: Mutex<SigningKeyCacheInner>,
}

#[derive(Debug, Default)]
struct SigningKeyCacheInner {
    entries: HashMap<CacheKey, CacheEntry>,
    /// Most-recently-used key is at the back.
    recency: Vec<CacheKey>,
}

impl SigningKeyCacheInner {
    fn touch(&mut self, key: &CacheKey) {
        if let Some(pos) = self.recency.iter().position(|k| k == key) {
            let k = self.recency.remove(pos);
            self.recency.push(k);
        } else {
            self.recency.push(key.clone());
        }
    }

    fn evict_if_over(&mut self, capacity: usize) {
        while self.entries.len() > capacity && !self.recency.is_empty() {
            let oldest = self.recency.remove(0);
            self.entries.remove(&oldest);
        }
    }
}

impl Default for SigningKeyCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl SigningKeyCache {
    /// Build an empty cache with the given bounded `capacity`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { capacity, inner: Mutex::new(SigningKeyCacheInner::default()) }
    }

    /// Return the signing key for `(secret_access_key, region, service)`
    /// on `short_date` (UTC `YYYYMMDD`), deriving and caching it if
    /// absent or stale.
    pub fn get_or_derive(&self, secret_access_key: &str, short_date: &str, region: &str, service: &str) -> [u8; 32] {
        let key = CacheKey {
            secret_access_key: secret_access_key.to_string(),
            region: region.to_string(),
            service: service.to_string(),
        };
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(entry) = inner.entries.get(&key) {
            if entry.derived_on == short_date {
                let signing_key = entry.signing_key;
                inner.touch(&key);
                return signing_key;
            }
        }
        let signing_key = derive_signing_key(secret_access_key, short_date, region, service);
        inner.entries.insert(key.clone(), CacheEntry { signing_key, derived_on: short_date.to_string() });
        inner.touch(&key);
        inner.evict_if_over(self.capacity);
        signing_key
    }

    /// Current number of cached entries, for tests/diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner).entries.len()
    }

    /// `true` if the cache currently holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_day_signs_are_identical_next_day_differs() {
        let cache = SigningKeyCache::new(10);
        let k1 = cache.get_or_derive("secret", "20150830", "us-east-1", "iam");
        let k2 = cache.get_or_derive("secret", "20150830", "us-east-1", "iam");
        assert_eq!(k1, k2);
        let k3 = cache.get_or_derive("secret", "20150831", "us-east-1", "iam");
        assert_ne!(k1, k3);
    }

    #[test]
    fn eviction_respects_capacity() {
        let cache = SigningKeyCache::new(2);
        cache.get_or_derive("a", "20250101", "us-east-1", "s3");
        cache.get_or_derive("b", "20250101", "us-east-1", "s3");
        cache.get_or_derive("c", "20250101", "us-east-1", "s3");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn derivation_matches_published_known_answer_signature() {
        // Published SigV4 test vector: derived key used to sign the
        // string-to-sign must produce the documented signature.
        let key = derive_signing_key("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY", "20150830", "us-east-1", "iam");
        let string_to_sign = "AWS4-HMAC-SHA256\n\
            20150830T123600Z\n\
            20150830/us-east-1/iam/aws4_request\n\
            f536975d06c0309214f805bb90ccff089219ecd68b2577efef23edd43b7e1a59";
        let signature = sign(&key, string_to_sign);
        assert_eq!(signature, "5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7");
    }
}
