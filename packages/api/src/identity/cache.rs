//! Short-lived cache of resolved sessions.
//!
//! Keyed by a blake3 hash of the bearer token so raw tokens never sit in
//! memory longer than the request that carried them. Lookups and inserts can
//! race; the worst case is both requests resolving the same user and the
//! later insert winning, which is harmless. The clock is injectable so expiry
//! is testable without sleeping.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::identity::UserInfo;

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct Entry {
    user: UserInfo,
    expires_at: Instant,
}

pub struct SessionCache {
    entries: DashMap<String, Entry>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SessionCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        SessionCache {
            entries: DashMap::new(),
            ttl,
            clock,
        }
    }

    fn cache_key(token: &str) -> String {
        blake3::hash(token.as_bytes()).to_hex().to_string()
    }

    pub fn get(&self, token: &str) -> Option<UserInfo> {
        let key = Self::cache_key(token);
        let now = self.clock.now();

        let hit = self
            .entries
            .get(&key)
            .and_then(|entry| (entry.expires_at > now).then(|| entry.user.clone()));

        if hit.is_none() {
            // Expired entries are dropped lazily on the next miss.
            self.entries.remove_if(&key, |_, entry| entry.expires_at <= now);
        }
        hit
    }

    pub fn insert(&self, token: &str, user: UserInfo) {
        let now = self.clock.now();
        // get only drops the key it was asked for; entries for tokens that
        // are never presented again get swept here.
        self.entries.retain(|_, entry| entry.expires_at > now);
        self.entries.insert(
            Self::cache_key(token),
            Entry {
                user,
                expires_at: now + self.ttl,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
