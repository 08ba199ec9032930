//! Bounded cache of finished forward queries.
//!
//! A root search probes a fresh `p` on nearly every step, so a map keyed by
//! `(N, p)` would grow with every search. This cache has a fixed number of
//! slots instead: each query maps to one slot, and storing a query evicts
//! whatever occupied its slot before.

use std::fmt;

use crate::utils::{mix64, pairing_szudzik, MyHash};

/// Largest supported `bits`; larger requests are clamped.
pub const MAX_CACHE_BITS: usize = 20;

/// A forward query `(N, p)`, with `p` identified by its exact bit pattern.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct QueryKey {
    n: u64,
    p_bits: u64,
}

impl QueryKey {
    pub fn new(n: usize, p: f64) -> Self {
        Self {
            n: n as u64,
            p_bits: p.to_bits(),
        }
    }

    pub fn n(&self) -> usize {
        self.n as usize
    }

    pub fn p(&self) -> f64 {
        f64::from_bits(self.p_bits)
    }
}

impl MyHash for QueryKey {
    fn hash(&self) -> u64 {
        // Nearby probabilities differ only in their low mantissa bits.
        mix64(pairing_szudzik(self.n, mix64(self.p_bits)))
    }
}

#[derive(Debug, Copy, Clone)]
struct Slot {
    key: QueryKey,
    value: f64,
}

/// Direct-mapped cache from `(N, p)` to `P(N, p)`.
#[derive(Debug, Clone)]
pub struct ResultCache {
    slots: Vec<Option<Slot>>,
    mask: u64,
    hits: usize,
    misses: usize,
    evictions: usize,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ResultCache {
    /// Creates a cache with `2^bits` slots.
    pub fn new(bits: usize) -> Self {
        let size = 1usize << bits.min(MAX_CACHE_BITS);
        Self {
            slots: vec![None; size],
            mask: (size - 1) as u64,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of stored results.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Stored results overwritten by a different query.
    pub fn evictions(&self) -> usize {
        self.evictions
    }

    /// Fraction of lookups that hit, `0` before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }

    /// Drops every stored result; statistics are kept.
    pub fn clear(&mut self) {
        self.slots.fill(None);
    }

    fn slot(&self, key: &QueryKey) -> usize {
        (key.hash() & self.mask) as usize
    }

    /// Returns the stored `P(n, p)`, if any.
    pub fn get(&mut self, n: usize, p: f64) -> Option<f64> {
        let key = QueryKey::new(n, p);
        let found = self.slots[self.slot(&key)];
        match found {
            Some(slot) if slot.key == key => {
                self.hits += 1;
                Some(slot.value)
            }
            _ => {
                self.misses += 1;
                None
            }
        }
    }

    /// Stores `P(n, p) = value`.
    pub fn insert(&mut self, n: usize, p: f64, value: f64) {
        let key = QueryKey::new(n, p);
        let idx = self.slot(&key);
        if matches!(self.slots[idx], Some(slot) if slot.key != key) {
            self.evictions += 1;
        }
        self.slots[idx] = Some(Slot { key, value });
    }
}

impl fmt::Display for ResultCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} slots, {} hits, {} misses ({:.1}% hit rate), {} evictions",
            self.len(),
            self.capacity(),
            self.hits,
            self.misses,
            100.0 * self.hit_rate(),
            self.evictions
        )
    }
}
