//! Persisted social-proof counter
//!
//! Read-modify-write of one integer per device. Availability wins over
//! durability: a broken store degrades to the floor and writes fail
//! silently, the page always gets a number.

use rand::Rng;

use super::store::KeyValueStore;
use crate::settings::SocialProofSettings;

pub struct PersistentCounterStore<S, R> {
    store: S,
    rng: R,
}

impl<S: KeyValueStore, R: Rng> PersistentCounterStore<S, R> {
    pub fn new(store: S, rng: R) -> Self {
        Self { store, rng }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Stored value at `key`, or `floor` if it is absent, unparsable, below
    /// the floor, or the store cannot be read.
    pub fn read_or_init(&self, key: &str, floor: u64) -> u64 {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return floor,
            Err(e) => {
                log::warn!("Reading {:?} failed ({}), using floor {}", key, e, floor);
                return floor;
            }
        };
        match raw.trim().parse::<u64>() {
            Ok(n) if n >= floor => n,
            Ok(n) => {
                log::debug!("Stored {:?} = {} is below floor {}", key, n, floor);
                floor
            }
            Err(_) => {
                log::warn!("Stored {:?} is not a count: {:?}", key, raw);
                floor
            }
        }
    }

    /// Add a random step in `[0, max_step)` and write the result back.
    ///
    /// The new value is returned even if the write fails. A `max_step` of 0
    /// leaves the value unchanged.
    pub fn increment_and_persist(&mut self, key: &str, floor: u64, max_step: u64) -> u64 {
        let current = self.read_or_init(key, floor);
        let delta = if max_step == 0 {
            0
        } else {
            self.rng.random_range(0..max_step)
        };
        let next = current.saturating_add(delta);

        if let Err(e) = self.store.set(key, &next.to_string()) {
            log::warn!("Could not persist {:?} = {} ({})", key, next, e);
        }
        next
    }

    /// One mount's worth of social proof, using the configured key and bounds
    pub fn bump(&mut self, settings: &SocialProofSettings) -> u64 {
        self.increment_and_persist(&settings.storage_key, settings.floor, settings.max_step)
    }
}
