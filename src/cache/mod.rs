//! Session cache for looked-up profiles
//!
//! Profiles are stored as JSON files keyed by username. Each entry carries an
//! expiry timestamp marking the end of the session it was written in; once a
//! session is over the entry is no longer served.

mod manager;

pub use manager::{CacheManager, CachedData};
