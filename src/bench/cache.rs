//! Time-bounded voice list cache.

use crate::tts::Voice;
use std::time::{Duration, Instant};

#[derive(Clone)]
struct CacheEntry {
    voices: Vec<Voice>,
    created_at: Instant,
}

impl CacheEntry {
    fn new(voices: Vec<Voice>) -> Self {
        Self {
            voices,
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
}

/// Single-slot cache for the voice listing, owned by the session.
pub struct VoiceCache {
    entry: Option<CacheEntry>,
    ttl: Duration,
    stats: CacheStats,
}

impl VoiceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entry: None,
            ttl,
            stats: CacheStats::default(),
        }
    }

    /// Cached voices if present and younger than the TTL. Expired entries are dropped.
    pub fn get(&mut self) -> Option<&[Voice]> {
        if self.entry.as_ref().is_some_and(|e| e.is_expired(self.ttl)) {
            self.entry = None;
        }
        match &self.entry {
            Some(entry) => {
                self.stats.hits += 1;
                Some(&entry.voices)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    pub fn set(&mut self, voices: Vec<Voice>) {
        self.entry = Some(CacheEntry::new(voices));
    }

    pub fn invalidate(&mut self) {
        if self.entry.take().is_some() {
            self.stats.invalidations += 1;
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
