//! Time-bounded cache of signed URLs, keyed by canonical path.
//!
//! Entries live for a fixed TTL measured on the injected [`Clock`]. There is
//! no size bound: the keyspace is bounded by catalog size times the handful
//! of display sizes the frontend requests. Expired entries are dropped when
//! they are next read.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::clock::Clock;

struct CachedUrl {
    signed_url: String,
    stored_at: u64,
}

/// Shared signed URL cache
pub struct SignedUrlCache {
    entries: RwLock<HashMap<String, CachedUrl>>,
    ttl_secs: u64,
    clock: Arc<dyn Clock>,
}

impl SignedUrlCache {
    pub fn new(ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl_secs,
            clock,
        }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    fn is_live(&self, entry: &CachedUrl, now: u64) -> bool {
        now < entry.stored_at.saturating_add(self.ttl_secs)
    }

    /// Get a signed URL if present and not expired
    pub fn get(&self, canonical_path: &str) -> Option<String> {
        self.get_at(canonical_path, self.clock.now_secs())
    }

    /// Like [`get`](Self::get), judged at the given instant
    pub fn get_at(&self, canonical_path: &str, now: u64) -> Option<String> {
        {
            // Entries are plain strings, so a poisoned lock still holds consistent data
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            match entries.get(canonical_path) {
                Some(entry) if self.is_live(entry, now) => {
                    return Some(entry.signed_url.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // Another writer may have refreshed the entry in between
        if entries
            .get(canonical_path)
            .is_some_and(|entry| !self.is_live(entry, now))
        {
            entries.remove(canonical_path);
            tracing::debug!(canonical_path, "Signed URL cache: dropped expired entry");
        }
        None
    }

    /// Whether a non-expired entry exists
    pub fn has(&self, canonical_path: &str) -> bool {
        let now = self.clock.now_secs();
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(canonical_path)
            .is_some_and(|entry| self.is_live(entry, now))
    }

    /// Store a signed URL, replacing any previous entry for the path
    pub fn set(&self, canonical_path: String, signed_url: String) {
        self.set_at(canonical_path, signed_url, self.clock.now_secs());
    }

    /// Store a signed URL as of `stored_at`.
    ///
    /// Callers minting a token pass the instant its expiry was computed from,
    /// so the entry cannot outlive the token.
    pub fn set_at(&self, canonical_path: String, signed_url: String, stored_at: u64) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            canonical_path,
            CachedUrl {
                signed_url,
                stored_at,
            },
        );
    }

    /// Number of stored entries, including expired ones not yet dropped
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
