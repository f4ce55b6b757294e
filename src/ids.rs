//! Short random identifiers for nodes and edges.
//!
//! Ids are seven lowercase base-36 characters. Each new id is checked against
//! the ids already in use, so a collision regenerates instead of silently
//! aliasing two records.

#[cfg(test)]
#[path = "ids_test.rs"]
mod ids_test;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ID_LEN: usize = 7;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Source of fresh ids.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    rng: StdRng,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Generator seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    /// Deterministic generator for tests and reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// A random id with no uniqueness check.
    pub fn next_id(&mut self) -> String {
        (0..ID_LEN)
            .map(|_| {
                let idx = self.rng.random_range(0..ID_ALPHABET.len());
                ID_ALPHABET[idx] as char
            })
            .collect()
    }

    /// A random id for which `taken` returns false.
    pub fn fresh<F>(&mut self, taken: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        loop {
            let id = self.next_id();
            if !taken(&id) {
                return id;
            }
            tracing::debug!(id = %id, "id collision, regenerating");
        }
    }
}
