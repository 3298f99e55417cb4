use super::LandmarkCategory;

/// Set of landmark categories declared by one document
///
/// Stored as a bitmask indexed by [`LandmarkCategory::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LandmarkSet {
    bits: u16,
}

impl LandmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: LandmarkCategory) {
        self.bits |= 1 << category.index();
    }

    pub fn contains(&self, category: LandmarkCategory) -> bool {
        self.bits & (1 << category.index()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// True when at least one of the eight named landmark roles is present.
    /// A set holding only `Other` does not qualify.
    pub fn has_landmark(&self) -> bool {
        self.bits & !(1 << LandmarkCategory::Other.index()) != 0
    }

    /// Categories in report order
    pub fn iter(&self) -> impl Iterator<Item = LandmarkCategory> + '_ {
        LandmarkCategory::ALL
            .into_iter()
            .filter(move |category| self.contains(*category))
    }
}

impl FromIterator<LandmarkCategory> for LandmarkSet {
    fn from_iter<I: IntoIterator<Item = LandmarkCategory>>(iter: I) -> Self {
        let mut set = LandmarkSet::new();
        for category in iter {
            set.insert(category);
        }
        set
    }
}

impl std::fmt::Display for LandmarkSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.iter().map(|c| c.as_str()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
