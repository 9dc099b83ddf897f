//! Tracker log stores and the key-value storage they persist to.

pub mod log;
pub mod storage;

pub use log::*;
pub use storage::*;

use crate::trackers::{
    arthritis::ArthritisEntry, congestion::CongestionEntry, gi::GiEntry, migraine::MigraineEntry,
    mood::MoodEntry, orthostatic::OrthostaticEntry, respiratory::RespiratoryEntry, skin::SkinEntry,
};
use std::sync::Arc;

/// One log store per tracker, opened once over a shared storage and passed by reference.
pub struct TrackerStores {
    pub migraine: LogStore<MigraineEntry>,
    pub mood: LogStore<MoodEntry>,
    pub arthritis: LogStore<ArthritisEntry>,
    pub orthostatic: LogStore<OrthostaticEntry>,
    pub skin: LogStore<SkinEntry>,
    pub respiratory: LogStore<RespiratoryEntry>,
    pub congestion: LogStore<CongestionEntry>,
    pub gi: LogStore<GiEntry>,
}

impl TrackerStores {
    pub fn open(storage: Arc<dyn Storage>) -> Self {
        Self {
            migraine: LogStore::open(storage.clone()),
            mood: LogStore::open(storage.clone()),
            arthritis: LogStore::open(storage.clone()),
            orthostatic: LogStore::open(storage.clone()),
            skin: LogStore::open(storage.clone()),
            respiratory: LogStore::open(storage.clone()),
            congestion: LogStore::open(storage.clone()),
            gi: LogStore::open(storage),
        }
    }

    pub fn in_memory() -> Self {
        Self::open(Arc::new(MemoryStorage::new()))
    }
}
