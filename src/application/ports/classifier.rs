#[cfg(test)]
use mockall::automock;

use crate::domain::value_objects::LandmarkSet;

/// Port for landmark detection over a raw document.
///
/// Implementations must be pure: no I/O, no shared mutable state, and no
/// failure mode. Undecodable input yields an empty set.
#[cfg_attr(test, automock)]
pub trait Classifier: Send + Sync {
    /// Landmark categories declared anywhere in `content`
    fn classify(&self, content: &[u8]) -> LandmarkSet;
}
