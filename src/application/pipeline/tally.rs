use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::value_objects::{LandmarkCategory, LandmarkSet};

/// Landmark counters shared by every classification task.
///
/// All operations are lock-free `fetch_add`s, so concurrent increments are
/// never lost. Reads are only meaningful once writers have quiesced; the
/// limiter's `wait()` barrier provides the happens-before edge.
#[derive(Debug, Default)]
pub struct LandmarkTally {
    categories: [AtomicU64; LandmarkCategory::COUNT],
    documents_with_landmarks: AtomicU64,
}

impl LandmarkTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self, category: LandmarkCategory) {
        self.categories[category.index()].fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_documents_with_landmarks(&self) {
        self.documents_with_landmarks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the classification of one document.
    ///
    /// Each category in the set is counted once, and the document counter
    /// moves by exactly one when the set holds a named landmark. Returns
    /// whether the document is selected for output.
    pub fn record(&self, landmarks: &LandmarkSet) -> bool {
        for category in landmarks.iter() {
            self.increment(category);
        }

        let selected = landmarks.has_landmark();
        if selected {
            self.increment_documents_with_landmarks();
        }
        selected
    }

    /// Add a finished snapshot into this tally
    pub fn absorb(&self, snapshot: &TallySnapshot) {
        for category in LandmarkCategory::ALL {
            self.categories[category.index()].fetch_add(snapshot.count(category), Ordering::Relaxed);
        }
        self.documents_with_landmarks
            .fetch_add(snapshot.documents_with_landmarks, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> TallySnapshot {
        let mut categories = [0u64; LandmarkCategory::COUNT];
        for category in LandmarkCategory::ALL {
            categories[category.index()] = self.categories[category.index()].load(Ordering::Relaxed);
        }
        TallySnapshot {
            categories,
            documents_with_landmarks: self.documents_with_landmarks.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of a [`LandmarkTally`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TallySnapshot {
    categories: [u64; LandmarkCategory::COUNT],
    documents_with_landmarks: u64,
}

impl TallySnapshot {
    pub fn count(&self, category: LandmarkCategory) -> u64 {
        self.categories[category.index()]
    }

    pub fn documents_with_landmarks(&self) -> u64 {
        self.documents_with_landmarks
    }

    /// Per-category counts in report order
    pub fn iter(&self) -> impl Iterator<Item = (LandmarkCategory, u64)> + '_ {
        LandmarkCategory::ALL
            .into_iter()
            .map(move |category| (category, self.count(category)))
    }
}

impl Serialize for TallySnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(LandmarkCategory::COUNT))?;
        for (category, count) in self.iter() {
            map.serialize_entry(category.as_str(), &count)?;
        }
        map.end()
    }
}
